//! Default output filename derivation.
//!
//! When no `--output` is given the result is written to the current
//! directory under a name derived from the input:
//!
//! - `photos/cat.jpg` at 100x100 → `cat_100x100.jpg`
//! - `https://example.com/a/b.png?s=1` at 20x10 → `b_20x10.png`
//! - `noext` at 5x5 → `noext_5x5`
//!
//! Only the last path component is used; for URLs the query and fragment
//! are ignored and the segment is percent-decoded (`my%20cat.jpg` →
//! `my cat_…jpg`). Inputs with no usable file name fall back to the stem
//! `image`.

use crate::imaging::Size;
use percent_encoding::percent_decode_str;
use reqwest::Url;
use std::path::Path;

const FALLBACK_STEM: &str = "image";

/// Last path component of a path or URL, if any.
fn last_component(input: &str) -> Option<String> {
    if let Ok(url) = Url::parse(input) {
        if matches!(url.scheme(), "http" | "https" | "file") {
            return url
                .path_segments()?
                .filter(|s| !s.is_empty())
                .next_back()
                .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned());
        }
    }
    Path::new(input)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
}

/// Build `<stem>_<width>x<height>[.<ext>]` from `input`.
pub fn default_output_filename(input: &str, size: Size) -> String {
    let name = last_component(input).unwrap_or_default();
    let name = Path::new(&name);

    let stem = name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_STEM.to_string());
    let ext = name
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    format!("{stem}_{size}{ext}")
}

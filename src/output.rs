//! CLI output formatting.
//!
//! # Output Format
//!
//! ```text
//! Original image size: 400x300
//!     Source: photos/cat.jpg
//! Resized image size: 133x100 (scale 0.3333)
//! Cropped image size: 100x100 (offset 16,0)
//! Resized image saved to: cat_100x100.jpg (JPEG)
//! ```
//!
//! Failures go to stderr:
//!
//! ```text
//! Error: Could not load image from cat.jpg: no such file
//! ```
//!
//! # Architecture
//!
//! `format_*` functions return `Vec<String>` or `String` and are pure.
//! `print_*` wrappers write them out.

use crate::pipeline::{PipelineError, PipelineEvent};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Lines describing one completed pipeline stage.
pub fn format_event(event: &PipelineEvent) -> Vec<String> {
    match event {
        PipelineEvent::Loaded { source, size } => vec![
            format!("Original image size: {size}"),
            format!("{}Source: {source}", indent(1)),
        ],
        PipelineEvent::Resized { size, ratio } => {
            vec![format!("Resized image size: {size} (scale {ratio:.4})")]
        }
        PipelineEvent::Cropped { window } => vec![format!(
            "Cropped image size: {} (offset {},{})",
            window.size, window.x, window.y
        )],
        PipelineEvent::Saved { path, format } => vec![format!(
            "Resized image saved to: {} ({format})",
            path.display()
        )],
    }
}

/// One-line human-readable failure message.
pub fn format_error(error: &PipelineError) -> String {
    format!("Error: {error}")
}

pub fn print_event(event: &PipelineEvent) {
    for line in format_event(event) {
        println!("{line}");
    }
}

pub fn print_error(error: &PipelineError) {
    eprintln!("{}", format_error(error));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{ImagingError, Rect, Size};
    use crate::sink::OutputFormat;
    use crate::source::SourceError;
    use std::path::PathBuf;

    #[test]
    fn loaded_shows_size_and_source() {
        let lines = format_event(&PipelineEvent::Loaded {
            source: "photos/cat.jpg".into(),
            size: Size::new(400, 300),
        });
        assert_eq!(
            lines,
            vec![
                "Original image size: 400x300",
                "    Source: photos/cat.jpg"
            ]
        );
    }

    #[test]
    fn resized_shows_scale() {
        let lines = format_event(&PipelineEvent::Resized {
            size: Size::new(133, 100),
            ratio: 1.0 / 3.0,
        });
        assert_eq!(lines, vec!["Resized image size: 133x100 (scale 0.3333)"]);
    }

    #[test]
    fn cropped_shows_offset() {
        let lines = format_event(&PipelineEvent::Cropped {
            window: Rect::new(16, 0, Size::new(100, 100)),
        });
        assert_eq!(lines, vec!["Cropped image size: 100x100 (offset 16,0)"]);
    }

    #[test]
    fn saved_shows_path_and_format() {
        let lines = format_event(&PipelineEvent::Saved {
            path: PathBuf::from("cat_100x100.jpg"),
            format: OutputFormat::Jpeg,
        });
        assert_eq!(lines, vec!["Resized image saved to: cat_100x100.jpg (JPEG)"]);
    }

    #[test]
    fn error_is_prefixed() {
        let err = PipelineError::from(SourceError::SourceNotFound {
            input: "cat.jpg".into(),
            reason: "no such file".into(),
        });
        assert_eq!(
            format_error(&err),
            "Error: Could not load image from cat.jpg: no such file"
        );
    }

    #[test]
    fn invalid_size_message() {
        let err = PipelineError::from(ImagingError::InvalidSize {
            width: 0,
            height: 50,
        });
        assert_eq!(
            format_error(&err),
            "Error: Invalid target size 0x50: width and height must be positive"
        );
    }
}

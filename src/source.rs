//! Input acquisition: path or URL → decoded [`Bitmap`].
//!
//! ## Resolution order
//!
//! 1. An existing filesystem path.
//! 2. A `file://` URL, mapped back to a path.
//! 3. An `http://` or `https://` URL, fetched with a blocking client.
//!
//! Anything else is [`SourceError::SourceNotFound`]. Trying the path first
//! means a local file literally named like a URL still wins.
//!
//! ## Decoding
//!
//! The format is sniffed from the bytes, not the extension. Whatever the
//! decoder produces is converted to RGBA8. Multi-frame formats yield their
//! first frame.

use crate::config::CropConfig;
use crate::imaging::Bitmap;
use image::ImageReader;
use reqwest::Url;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Could not load image from {input}: {reason}")]
    SourceNotFound { input: String, reason: String },
    #[error("Failed to decode {input}: {reason}")]
    DecodeFailed { input: String, reason: String },
}

/// Where the input bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    Url(Url),
}

impl ImageSource {
    /// Classify a CLI argument. See the [module docs](self) for the order.
    pub fn parse(input: &str) -> Result<Self, SourceError> {
        let path = Path::new(input);
        if path.exists() {
            return Ok(Self::Path(path.to_path_buf()));
        }

        let not_found = |reason: &str| SourceError::SourceNotFound {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(input).map_err(|_| not_found("no such file"))?;
        match url.scheme() {
            "file" => url
                .to_file_path()
                .map(Self::Path)
                .map_err(|_| not_found("file URL does not name a local path")),
            "http" | "https" => Ok(Self::Url(url)),
            other => Err(not_found(&format!("unsupported URL scheme '{other}'"))),
        }
    }

    /// Read the raw bytes and decode them.
    pub fn load(&self, config: &CropConfig) -> Result<Bitmap, SourceError> {
        let bytes = match self {
            Self::Path(path) => read_file(path)?,
            Self::Url(url) => fetch(url, config)?,
        };
        decode(&bytes, &self.to_string())
    }
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Parse and load in one step.
pub fn load(input: &str, config: &CropConfig) -> Result<Bitmap, SourceError> {
    ImageSource::parse(input)?.load(config)
}

fn read_file(path: &Path) -> Result<Vec<u8>, SourceError> {
    log::debug!("Reading {}", path.display());
    std::fs::read(path).map_err(|e| SourceError::SourceNotFound {
        input: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn fetch(url: &Url, config: &CropConfig) -> Result<Vec<u8>, SourceError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(config.fetch_timeout)
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| SourceError::SourceNotFound {
            input: url.to_string(),
            reason: format!("HTTP client setup failed: {e}"),
        })?;
    fetch_with(&client, url)
}

/// GET `url`; transport errors and non-2xx statuses are `SourceNotFound`.
fn fetch_with(client: &reqwest::blocking::Client, url: &Url) -> Result<Vec<u8>, SourceError> {
    log::info!("Fetching {url}");
    let not_found = |reason: String| SourceError::SourceNotFound {
        input: url.to_string(),
        reason,
    };

    let response = client
        .get(url.clone())
        .send()
        .map_err(|e| not_found(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(not_found(format!("server answered {status}")));
    }

    let bytes = response.bytes().map_err(|e| not_found(e.to_string()))?;
    log::debug!("Fetched {} bytes from {url}", bytes.len());
    Ok(bytes.to_vec())
}

/// Decode in-memory image bytes into an RGBA8 bitmap.
pub fn decode(bytes: &[u8], input: &str) -> Result<Bitmap, SourceError> {
    let failed = |reason: String| SourceError::DecodeFailed {
        input: input.to_string(),
        reason,
    };

    let image = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| failed(e.to_string()))?
        .decode()
        .map_err(|e| failed(e.to_string()))?;

    Bitmap::try_from(image.to_rgba8()).map_err(|e| failed(e.to_string()))
}

//! Runtime configuration.
//!
//! There is no config file: the CLI always runs with
//! [`CropConfig::default`]. Library callers can override individual
//! fields with struct update syntax:
//!
//! ```
//! # use crop::config::CropConfig;
//! # use crop::imaging::Quality;
//! let config = CropConfig {
//!     quality: Quality::new(75),
//!     ..CropConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Defaults
//!
//! ```text
//! quality        = 90         # JPEG quality, clamped to 1–100
//! filter         = Triangle   # bilinear resampling
//! fetch_timeout  = 30s        # whole-request timeout for http(s) sources
//! user_agent     = "crop/<version>"
//! ```

use crate::imaging::{FastResampler, Quality};
use image::imageops::FilterType;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings for the I/O collaborators and the resampler.
#[derive(Debug, Clone)]
pub struct CropConfig {
    /// Lossy encoding quality, used for JPEG output.
    pub quality: Quality,
    /// Resampling kernel for the single resize pass.
    pub filter: FilterType,
    /// Timeout for fetching remote sources.
    pub fetch_timeout: Duration,
    /// `User-Agent` header sent when fetching remote sources.
    pub user_agent: String,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            filter: FilterType::Triangle,
            fetch_timeout: Duration::from_secs(30),
            user_agent: format!("crop/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl CropConfig {
    /// Reject settings the collaborators cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch_timeout.is_zero() {
            return Err(ConfigError::Validation(
                "fetch_timeout must be greater than zero".into(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Validation("user_agent must not be empty".into()));
        }
        Ok(())
    }

    /// The resampler these settings describe.
    pub fn resampler(&self) -> FastResampler {
        FastResampler::new(self.filter)
    }
}

//! The crop pipeline: Source → Resizer → Cropper → Sink.
//!
//! ```text
//! Loaded  ──resize_to_cover──▶  Resized  ──center_crop──▶  Cropped  ──save──▶  Saved
//! ```
//!
//! Every transition is one synchronous call that consumes the previous
//! stage's bitmap. The first failure aborts the run; nothing is written
//! unless the final encode succeeded.
//!
//! Progress is reported through a caller-supplied callback receiving
//! [`PipelineEvent`]s. The pipeline itself never prints; the CLI hands in
//! [`output::print_event`](crate::output::print_event).

use crate::config::{ConfigError, CropConfig};
use crate::imaging::{
    ImagingError, Rect, Resampler, Size, apply_cover, center_crop_rect, cover_size, crop_window,
};
use crate::naming::default_output_filename;
use crate::sink::{self, OutputFormat, SinkError};
use crate::source::{ImageSource, SourceError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Imaging(#[from] ImagingError),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl PipelineError {
    /// The stage the pipeline was trying to reach when it failed.
    ///
    /// `None` for configuration errors, which happen before any stage.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Config(_) => None,
            Self::Source(_) => Some(Stage::Loaded),
            Self::Imaging(ImagingError::CropOutOfBounds { .. }) => Some(Stage::Cropped),
            Self::Imaging(_) => Some(Stage::Resized),
            Self::Sink(_) => Some(Stage::Saved),
        }
    }
}

/// Pipeline states, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Loaded,
    Resized,
    Cropped,
    Saved,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Loaded => "load",
            Self::Resized => "resize",
            Self::Cropped => "crop",
            Self::Saved => "save",
        })
    }
}

/// Emitted once per completed stage.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    Loaded { source: String, size: Size },
    Resized { size: Size, ratio: f64 },
    Cropped { window: Rect },
    Saved { path: PathBuf, format: OutputFormat },
}

impl PipelineEvent {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Loaded { .. } => Stage::Loaded,
            Self::Resized { .. } => Stage::Resized,
            Self::Cropped { .. } => Stage::Cropped,
            Self::Saved { .. } => Stage::Saved,
        }
    }
}

/// What to crop, to what size, and where to put it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropRequest {
    /// Filesystem path or URL.
    pub input: String,
    pub size: Size,
    /// Explicit output path; derived from `input` when `None`.
    pub output: Option<PathBuf>,
}

impl CropRequest {
    pub fn new(input: impl Into<String>, size: Size) -> Self {
        Self {
            input: input.into(),
            size,
            output: None,
        }
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    /// The explicit output, or `<stem>_<w>x<h>.<ext>` in the current directory.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(default_output_filename(&self.input, self.size)))
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct CropReport {
    pub original: Size,
    pub resized: Size,
    pub window: Rect,
    pub output: PathBuf,
    pub format: OutputFormat,
}

/// Run the pipeline with the resampler described by `config`.
pub fn run(
    request: &CropRequest,
    config: &CropConfig,
    on_event: impl FnMut(&PipelineEvent),
) -> Result<CropReport, PipelineError> {
    run_with_resampler(request, config, &config.resampler(), on_event)
}

/// Run the pipeline using a specific resampler (allows testing with mock).
pub fn run_with_resampler(
    request: &CropRequest,
    config: &CropConfig,
    resampler: &impl Resampler,
    mut on_event: impl FnMut(&PipelineEvent),
) -> Result<CropReport, PipelineError> {
    config.validate()?;
    // Reject a bad size before paying for a fetch.
    let target = request.size.ensure_positive()?;
    let output = request.output_path();

    let source = ImageSource::parse(&request.input)?;
    let original = source.load(config)?;
    let original_size = original.size();
    log::info!("Loaded {source} ({original_size})");
    on_event(&PipelineEvent::Loaded {
        source: source.to_string(),
        size: original_size,
    });

    // The plan and window reported below are the ones applied.
    let plan = cover_size(original_size, target)?;
    let resized = apply_cover(original, &plan, resampler)?;
    let resized_size = resized.size();
    log::debug!("Resized {original_size} -> {resized_size} (ratio {:.4})", plan.ratio);
    on_event(&PipelineEvent::Resized {
        size: resized_size,
        ratio: plan.ratio,
    });

    let window = center_crop_rect(resized_size, target)?;
    let cropped = crop_window(resized, window)?;
    log::debug!("Cropped at {},{} -> {}", window.x, window.y, cropped.size());
    on_event(&PipelineEvent::Cropped { window });

    let format = sink::save(&cropped, &output, config.quality)?;
    log::info!("Saved {} as {format}", output.display());
    on_event(&PipelineEvent::Saved {
        path: output.clone(),
        format,
    });

    Ok(CropReport {
        original: original_size,
        resized: resized_size,
        window,
        output,
        format,
    })
}

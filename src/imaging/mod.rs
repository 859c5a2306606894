//! Image geometry and pixel work: the resize-then-crop core.
//!
//! | Operation | Function |
//! |---|---|
//! | **Cover size** | [`cover_size`]: larger of the two ratios, floored |
//! | **Resize** | [`resize_to_cover`] + a [`Resampler`] backend |
//! | **Crop window** | [`center_crop_rect`]: floored centered origin |
//! | **Crop** | [`center_crop`]: row-by-row extraction |
//!
//! [`apply_cover`] and [`crop_window`] run a precomputed plan or window, for
//! callers that report the geometry they apply.
//!
//! The module is split into:
//! - **Bitmap**: [`Bitmap`], [`Size`], [`Rect`] value types
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Encoding parameters ([`Quality`])
//! - **Backend**: [`Resampler`] trait + [`FastResampler`]
//! - **Operations**: Functions combining calculations + backend
//!
//! Nothing in here logs or touches the filesystem; failures come back as
//! [`ImagingError`].

pub mod backend;
pub mod bitmap;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{ImagingError, Resampler};
pub use bitmap::{Bitmap, Rect, Size};
pub use calculations::{CoverPlan, center_crop_rect, cover_size};
pub use operations::{apply_cover, center_crop, crop_window, resize_to_cover};
pub use params::Quality;
pub use rust_backend::FastResampler;

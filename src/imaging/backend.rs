//! Resampling backend trait and the imaging error type.
//!
//! The [`Resampler`] trait is the one pluggable seam of the imaging core: it
//! fills an already allocated destination [`Bitmap`] from a source bitmap.
//! Sizes are decided by [`calculations`](super::calculations) before the
//! resampler is called, so a backend can never change the geometry.
//!
//! The production implementation is
//! [`FastResampler`](super::rust_backend::FastResampler).

use super::bitmap::Bitmap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("Invalid target size {width}x{height}: width and height must be positive")]
    InvalidSize { width: i64, height: i64 },
    #[error("Resampling failed: {0}")]
    ResampleFailed(String),
    #[error("Crop window {x},{y} {width}x{height} exceeds bitmap bounds {bounds}")]
    CropOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        bounds: super::Size,
    },
    #[error("Pixel buffer of {len} bytes does not match {width}x{height} RGBA")]
    InvalidBitmap { width: u32, height: u32, len: usize },
}

/// Trait for pixel resampling backends.
///
/// `dst` arrives with its final size and a zeroed buffer; the backend
/// overwrites every pixel. Implementations must not assume `src` and `dst`
/// share an aspect ratio.
pub trait Resampler {
    fn resample(&self, src: &Bitmap, dst: &mut Bitmap) -> Result<(), ImagingError>;
}

impl<R: Resampler + ?Sized> Resampler for &R {
    fn resample(&self, src: &Bitmap, dst: &mut Bitmap) -> Result<(), ImagingError> {
        (**self).resample(src, dst)
    }
}

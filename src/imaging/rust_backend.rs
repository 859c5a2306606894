//! Pure Rust resampling backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Resample | `fast_image_resize::Resizer` convolution, RGBA8 (`U8x4`) |
//! | Filter choice | `image::imageops::FilterType`, mapped onto `fast_image_resize::FilterType` |
//!
//! The destination view borrows the caller's [`Bitmap`] buffer directly,
//! so resampling writes in place with no intermediate image.

use super::backend::{ImagingError, Resampler};
use super::bitmap::Bitmap;
use fast_image_resize as fr;
use image::imageops::FilterType;

/// Single-pass convolution resampler.
#[derive(Debug, Clone, Copy)]
pub struct FastResampler {
    filter: FilterType,
}

impl FastResampler {
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }
}

impl Default for FastResampler {
    /// Bilinear.
    fn default() -> Self {
        Self::new(FilterType::Triangle)
    }
}

fn to_fast_filter(filter: FilterType) -> fr::FilterType {
    match filter {
        FilterType::Nearest => fr::FilterType::Box,
        FilterType::Triangle => fr::FilterType::Bilinear,
        FilterType::CatmullRom => fr::FilterType::CatmullRom,
        FilterType::Gaussian => fr::FilterType::Mitchell,
        FilterType::Lanczos3 => fr::FilterType::Lanczos3,
    }
}

impl Resampler for FastResampler {
    fn resample(&self, src: &Bitmap, dst: &mut Bitmap) -> Result<(), ImagingError> {
        let (dst_width, dst_height) = (dst.width(), dst.height());

        let src_view =
            fr::images::ImageRef::new(src.width(), src.height(), src.pixels(), fr::PixelType::U8x4)
                .map_err(|e| ImagingError::ResampleFailed(format!("source buffer: {e}")))?;
        let mut dst_view = fr::images::Image::from_slice_u8(
            dst_width,
            dst_height,
            dst.pixels_mut(),
            fr::PixelType::U8x4,
        )
        .map_err(|e| ImagingError::ResampleFailed(format!("destination buffer: {e}")))?;

        let options = fr::ResizeOptions::new()
            .resize_alg(fr::ResizeAlg::Convolution(to_fast_filter(self.filter)));
        fr::Resizer::new()
            .resize(&src_view, &mut dst_view, Some(&options))
            .map_err(|e| {
                ImagingError::ResampleFailed(format!(
                    "{}x{} -> {dst_width}x{dst_height}: {e}",
                    src.width(),
                    src.height()
                ))
            })
    }
}

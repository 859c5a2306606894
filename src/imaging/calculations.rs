//! Pure calculation functions for resize-then-crop geometry.
//!
//! All functions here are pure and testable without any I/O or pixels.
//!
//! ## Rounding
//!
//! Both the cover size and the crop origin are floored. Flooring the cover
//! size can never drop below the target because the chosen ratio makes one
//! axis land exactly on the target and the other on or above it. Flooring
//! the crop origin puts any odd leftover pixel on the trailing edge.
//!
//! The floors are taken over exact integer rationals rather than `f64`
//! products: `300.0 * (100.0 / 300.0)` is not guaranteed to be `100.0`, and
//! a one-pixel undershoot would make the crop window fall outside the
//! resized bitmap.

use super::backend::ImagingError;
use super::bitmap::{Rect, Size};

/// Outcome of the cover calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverPlan {
    /// `max(target.w / source.w, target.h / source.h)`, for reporting.
    pub ratio: f64,
    /// Intermediate size: every dimension ≥ the target.
    pub size: Size,
}

/// Calculate the aspect-preserving size that covers `target`.
///
/// # Examples
/// ```
/// # use crop::imaging::{Size, cover_size};
/// // 400x300 into 100x100: height ratio (1/3) wins → 133x100
/// let plan = cover_size(Size::new(400, 300), Size::new(100, 100)).unwrap();
/// assert_eq!(plan.size, Size::new(133, 100));
/// ```
pub fn cover_size(source: Size, target: Size) -> Result<CoverPlan, ImagingError> {
    let target = target.ensure_positive()?;
    if source.width == 0 || source.height == 0 {
        return Err(ImagingError::ResampleFailed(format!(
            "source bitmap {source} has a zero dimension"
        )));
    }

    let (sw, sh) = (u64::from(source.width), u64::from(source.height));
    let (tw, th) = (u64::from(target.width), u64::from(target.height));

    // tw/sw >= th/sh  <=>  tw*sh >= th*sw
    let (width, height) = if tw * sh >= th * sw {
        (tw, sh * tw / sw)
    } else {
        (sw * th / sh, th)
    };

    let to_u32 = |v: u64| {
        u32::try_from(v).map_err(|_| {
            ImagingError::ResampleFailed(format!(
                "resizing {source} to cover {target} needs {width}x{height} pixels"
            ))
        })
    };
    let size = Size::new(to_u32(width)?, to_u32(height)?);
    if size.width == 0 || size.height == 0 {
        return Err(ImagingError::ResampleFailed(format!(
            "resizing {source} to cover {target} produced {size}"
        )));
    }

    let ratio = (tw as f64 / sw as f64).max(th as f64 / sh as f64);
    Ok(CoverPlan { ratio, size })
}

/// Calculate the centered crop window of `target` inside `resized`.
///
/// The origin is `floor((resized - target) / 2)` on each axis.
pub fn center_crop_rect(resized: Size, target: Size) -> Result<Rect, ImagingError> {
    let target = target.ensure_positive()?;
    if resized.width < target.width || resized.height < target.height {
        return Err(ImagingError::CropOutOfBounds {
            x: 0,
            y: 0,
            width: target.width,
            height: target.height,
            bounds: resized,
        });
    }

    let x = (resized.width - target.width) / 2;
    let y = (resized.height - target.height) / 2;
    Ok(Rect::new(x, y, target))
}

//! High-level image operations.
//!
//! These functions combine calculations with backend execution. Each takes
//! its input bitmap by value and returns a new one, so a stage owns exactly
//! one bitmap at a time.

use super::backend::{ImagingError, Resampler};
use super::bitmap::{Bitmap, CHANNELS, Rect, Size, alloc_pixels};
use super::calculations::{CoverPlan, center_crop_rect, cover_size};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, ImagingError>;

/// Resize `bitmap` so it covers `target` while keeping its aspect ratio.
///
/// The target is validated before any pixel work. When the cover size
/// equals the source size, the bitmap is returned as is.
pub fn resize_to_cover(
    bitmap: Bitmap,
    target: Size,
    resampler: &impl Resampler,
) -> Result<Bitmap> {
    let plan = cover_size(bitmap.size(), target)?;
    apply_cover(bitmap, &plan, resampler)
}

/// Resample `bitmap` to an already computed cover plan.
pub fn apply_cover(
    bitmap: Bitmap,
    plan: &CoverPlan,
    resampler: &impl Resampler,
) -> Result<Bitmap> {
    if plan.size == bitmap.size() {
        return Ok(bitmap);
    }

    let mut resized = Bitmap::blank(plan.size)?;
    resampler.resample(&bitmap, &mut resized)?;
    Ok(resized)
}

/// Extract the centered `target`-sized window of `bitmap`.
///
/// Expects a bitmap produced by [`resize_to_cover`] with the same target.
pub fn center_crop(bitmap: Bitmap, target: Size) -> Result<Bitmap> {
    let rect = center_crop_rect(bitmap.size(), target)?;
    crop_window(bitmap, rect)
}

/// Cut `window` out of `bitmap`, reusing the bitmap when the window is all of it.
pub fn crop_window(bitmap: Bitmap, window: Rect) -> Result<Bitmap> {
    if window == Rect::new(0, 0, bitmap.size()) {
        return Ok(bitmap);
    }
    extract(&bitmap, window)
}

/// Copy `rect` out of `bitmap` row by row into a new buffer.
pub fn extract(bitmap: &Bitmap, rect: Rect) -> Result<Bitmap> {
    if !rect.fits_within(bitmap.size()) {
        return Err(ImagingError::CropOutOfBounds {
            x: rect.x,
            y: rect.y,
            width: rect.size.width,
            height: rect.size.height,
            bounds: bitmap.size(),
        });
    }

    let mut pixels = alloc_pixels(rect.size)?;

    let stride = bitmap.stride();
    let row_start = rect.x as usize * CHANNELS;
    let row_len = rect.size.width as usize * CHANNELS;
    for row in bitmap
        .pixels()
        .chunks_exact(stride)
        .skip(rect.y as usize)
        .take(rect.size.height as usize)
    {
        pixels.extend_from_slice(&row[row_start..row_start + row_len]);
    }

    Bitmap::from_rgba(rect.size.width, rect.size.height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockResampler, RecordedResample};
    use proptest::prelude::*;

    /// Each pixel encodes its own coordinates: `[x, y, x >> 8, y >> 8]`.
    fn coords(width: u32, height: u32) -> Bitmap {
        let mut buf = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                buf.extend_from_slice(&[x as u8, y as u8, (x >> 8) as u8, (y >> 8) as u8]);
            }
        }
        Bitmap::from_rgba(width, height, buf).unwrap()
    }

    fn decode(px: [u8; 4]) -> (u32, u32) {
        (
            u32::from(px[0]) | u32::from(px[2]) << 8,
            u32::from(px[1]) | u32::from(px[3]) << 8,
        )
    }

    // =========================================================================
    // resize_to_cover
    // =========================================================================

    #[test]
    fn resize_landscape_to_square_cover() {
        let resampler = MockResampler::new();
        let resized = resize_to_cover(coords(400, 300), Size::new(100, 100), &resampler).unwrap();

        assert_eq!(resized.size(), Size::new(133, 100));
        assert_eq!(
            resampler.get_calls(),
            vec![RecordedResample {
                from: Size::new(400, 300),
                to: Size::new(133, 100),
            }]
        );
    }

    #[test]
    fn resize_upscales_square_to_cover_strip() {
        let resampler = MockResampler::new();
        let resized = resize_to_cover(coords(100, 100), Size::new(200, 50), &resampler).unwrap();
        assert_eq!(resized.size(), Size::new(200, 200));
    }

    #[test]
    fn resize_same_size_skips_resampler() {
        let resampler = MockResampler::new();
        let source = coords(64, 48);
        let resized = resize_to_cover(source.clone(), Size::new(64, 48), &resampler).unwrap();

        assert_eq!(resized, source);
        assert!(resampler.get_calls().is_empty());
    }

    #[test]
    fn resize_zero_target_fails_before_resampling() {
        let resampler = MockResampler::new();
        let err = resize_to_cover(coords(10, 10), Size::new(0, 10), &resampler).unwrap_err();

        assert!(matches!(err, ImagingError::InvalidSize { width: 0, .. }));
        assert!(resampler.get_calls().is_empty());
    }

    #[test]
    fn resize_to_unallocatable_size_is_an_error() {
        // 2x1 covering 2^31 x 2^30 needs a 2^63-byte destination.
        let resampler = MockResampler::new();
        let err = resize_to_cover(coords(2, 1), Size::new(1 << 31, 1 << 30), &resampler)
            .unwrap_err();

        assert!(matches!(err, ImagingError::ResampleFailed(_)));
        assert!(resampler.get_calls().is_empty());
    }

    #[test]
    fn resize_propagates_backend_failure() {
        let resampler = MockResampler::failing("kernel exploded");
        let err = resize_to_cover(coords(10, 10), Size::new(5, 5), &resampler).unwrap_err();
        assert!(matches!(err, ImagingError::ResampleFailed(_)));
    }

    // =========================================================================
    // center_crop
    // =========================================================================

    #[test]
    fn crop_takes_centered_columns() {
        let cropped = center_crop(coords(133, 100), Size::new(100, 100)).unwrap();

        assert_eq!(cropped.size(), Size::new(100, 100));
        assert_eq!(decode(cropped.pixel(0, 0)), (16, 0));
        assert_eq!(decode(cropped.pixel(99, 99)), (115, 99));
    }

    #[test]
    fn crop_takes_centered_rows() {
        let cropped = center_crop(coords(200, 200), Size::new(200, 50)).unwrap();

        assert_eq!(cropped.size(), Size::new(200, 50));
        assert_eq!(decode(cropped.pixel(0, 0)), (0, 75));
        assert_eq!(decode(cropped.pixel(199, 49)), (199, 124));
    }

    #[test]
    fn crop_same_size_is_identity() {
        let source = coords(30, 20);
        let cropped = center_crop(source.clone(), Size::new(30, 20)).unwrap();
        assert_eq!(cropped, source);
    }

    #[test]
    fn crop_smaller_bitmap_is_out_of_bounds() {
        let err = center_crop(coords(50, 50), Size::new(60, 40)).unwrap_err();
        assert!(matches!(err, ImagingError::CropOutOfBounds { .. }));
    }

    #[test]
    fn crop_window_full_bitmap_is_identity() {
        let source = coords(12, 9);
        let cropped = crop_window(source.clone(), Rect::new(0, 0, Size::new(12, 9))).unwrap();
        assert_eq!(cropped, source);
    }

    #[test]
    fn crop_window_uses_given_origin() {
        let cropped = crop_window(coords(20, 20), Rect::new(3, 5, Size::new(4, 2))).unwrap();
        assert_eq!(decode(cropped.pixel(0, 0)), (3, 5));
        assert_eq!(decode(cropped.pixel(3, 1)), (6, 6));
    }

    #[test]
    fn apply_cover_resamples_to_plan_size() {
        let resampler = MockResampler::new();
        let plan = cover_size(Size::new(400, 300), Size::new(100, 100)).unwrap();
        let resized = apply_cover(coords(400, 300), &plan, &resampler).unwrap();

        assert_eq!(resized.size(), plan.size);
        assert_eq!(resampler.get_calls()[0].to, plan.size);
    }

    #[test]
    fn extract_rejects_window_past_edge() {
        let err = extract(&coords(10, 10), Rect::new(5, 0, Size::new(6, 10))).unwrap_err();
        assert!(matches!(
            err,
            ImagingError::CropOutOfBounds { x: 5, y: 0, width: 6, height: 10, .. }
        ));
    }

    // =========================================================================
    // resize + crop together
    // =========================================================================

    #[test]
    fn scenario_400x300_to_100x100() {
        let resampler = MockResampler::new();
        let target = Size::new(100, 100);
        let resized = resize_to_cover(coords(400, 300), target, &resampler).unwrap();
        let cropped = center_crop(resized, target).unwrap();
        assert_eq!(cropped.size(), target);
    }

    #[test]
    fn scenario_identity_keeps_pixels() {
        let resampler = MockResampler::new();
        let source = coords(37, 23);
        let target = source.size();
        let resized = resize_to_cover(source.clone(), target, &resampler).unwrap();
        let cropped = center_crop(resized, target).unwrap();
        assert_eq!(cropped, source);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn resize_then_crop_hits_target_exactly(
            sw in 1u32..300, sh in 1u32..300,
            tw in 1u32..300, th in 1u32..300,
        ) {
            let resampler = MockResampler::new();
            let target = Size::new(tw, th);
            let resized = resize_to_cover(coords(sw, sh), target, &resampler).unwrap();
            prop_assert!(resized.width() >= tw && resized.height() >= th);
            let cropped = center_crop(resized, target).unwrap();
            prop_assert_eq!(cropped.size(), target);
            prop_assert_eq!(cropped.pixels().len(), (tw * th * 4) as usize);
        }
    }
}

//! Value types shared by every stage: [`Bitmap`], [`Size`] and [`Rect`].
//!
//! A [`Bitmap`] is always RGBA8, row-major, with no row padding. Its buffer
//! length is checked on construction and can never drift afterwards: the
//! only mutable access is [`Bitmap::pixels_mut`], which hands out the slice
//! (not the `Vec`) so the length is fixed.

use super::backend::ImagingError;
use std::fmt;

/// Bytes per RGBA8 pixel.
pub const CHANNELS: usize = 4;

/// Target footprint in pixels. Both dimensions are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Build a size from signed user input, rejecting anything ≤ 0.
    pub fn from_signed(width: i64, height: i64) -> Result<Self, ImagingError> {
        let invalid = || ImagingError::InvalidSize { width, height };
        if width <= 0 || height <= 0 {
            return Err(invalid());
        }
        let width = u32::try_from(width).map_err(|_| invalid())?;
        let height = u32::try_from(height).map_err(|_| invalid())?;
        Ok(Self { width, height })
    }

    /// Fails with `InvalidSize` if either dimension is zero.
    pub fn ensure_positive(self) -> Result<Self, ImagingError> {
        if self.width == 0 || self.height == 0 {
            Err(ImagingError::InvalidSize {
                width: self.width.into(),
                height: self.height.into(),
            })
        } else {
            Ok(self)
        }
    }

    /// Buffer length for an RGBA8 bitmap of this size, or `None` on overflow.
    pub fn buffer_len(self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(CHANNELS)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis-aligned crop window inside a bitmap.
///
/// The origin comes from flooring a centered offset, so it is always a
/// whole pixel and stored as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub size: Size,
}

impl Rect {
    pub fn new(x: u32, y: u32, size: Size) -> Self {
        Self { x, y, size }
    }

    /// Whether the rect lies fully inside a bitmap of `bounds`.
    pub fn fits_within(&self, bounds: Size) -> bool {
        let right = u64::from(self.x) + u64::from(self.size.width);
        let bottom = u64::from(self.y) + u64::from(self.size.height);
        right <= u64::from(bounds.width) && bottom <= u64::from(bounds.height)
    }
}

/// Decoded RGBA8 raster.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    size: Size,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Wrap an existing RGBA8 buffer.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ImagingError> {
        let size = Size::new(width, height);
        let expected = size.buffer_len();
        if width == 0 || height == 0 || expected != Some(pixels.len()) {
            return Err(ImagingError::InvalidBitmap {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self { size, pixels })
    }

    /// Allocate a transparent-black bitmap, used as a resampling destination.
    pub fn blank(size: Size) -> Result<Self, ImagingError> {
        let mut pixels = alloc_pixels(size)?;
        pixels.resize(pixels.capacity(), 0);
        Self::from_rgba(size.width, size.height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Writable view for resamplers filling a freshly allocated destination.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.size.width as usize * CHANNELS
    }

    /// The RGBA value at `(x, y)`. Panics when out of bounds, like slice indexing.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = y as usize * self.stride() + x as usize * CHANNELS;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

}

/// An empty buffer with room for exactly one `size` bitmap.
///
/// Allocation failure is reported as `ResampleFailed` instead of aborting.
pub(crate) fn alloc_pixels(size: Size) -> Result<Vec<u8>, ImagingError> {
    let len = size
        .buffer_len()
        .ok_or_else(|| ImagingError::ResampleFailed(format!("{size} overflows memory")))?;
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(len)
        .map_err(|e| ImagingError::ResampleFailed(format!("cannot allocate {size} bitmap: {e}")))?;
    Ok(pixels)
}

// Printing megabytes of pixel data is never useful.
impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("size", &self.size)
            .field("len", &self.pixels.len())
            .finish()
    }
}

impl TryFrom<image::RgbaImage> for Bitmap {
    type Error = ImagingError;

    fn try_from(img: image::RgbaImage) -> Result<Self, Self::Error> {
        let (width, height) = img.dimensions();
        Self::from_rgba(width, height, img.into_raw())
    }
}

//! # crop
//!
//! Resize an image so it covers a target size, then center-crop it to
//! exactly that size.
//!
//! # Architecture: Four-Stage Pipeline
//!
//! ```text
//! 1. Load     path | URL   →  Bitmap          (source)
//! 2. Resize   Bitmap       →  Bitmap ≥ target (imaging::resize_to_cover)
//! 3. Crop     Bitmap       →  Bitmap = target (imaging::center_crop)
//! 4. Save     Bitmap       →  .png | .jpg     (sink)
//! ```
//!
//! Each stage consumes the previous stage's bitmap by value, so at most two
//! bitmaps are alive at any moment and no stage can observe another's
//! buffer.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Bitmap types, cover/crop geometry, pluggable resampler |
//! | [`source`] | Path / `file://` / `http(s)://` loading and decoding |
//! | [`sink`] | PNG / JPEG encoding chosen by output extension |
//! | [`pipeline`] | Stage sequencing, progress events, error aggregation |
//! | [`naming`] | `<stem>_<w>x<h>.<ext>` default output names |
//! | [`config`] | Encoder quality, resampling filter, fetch settings |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Cover, Never Contain
//!
//! The resize uses the *larger* of the two axis ratios, so the resized
//! image is at least as large as the target on both axes. The crop that
//! follows always has enough pixels. Both the cover size and the crop
//! origin are floored; see [`imaging::cover_size`] for why the floors are
//! computed exactly rather than in floating point.
//!
//! ## Explicit Buffers
//!
//! Resampling writes into a destination [`imaging::Bitmap`] allocated by
//! the caller, and cropping copies rows into a fresh buffer. There is no
//! shared drawing context.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod sink;
pub mod source;

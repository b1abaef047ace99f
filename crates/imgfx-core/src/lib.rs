//! # imgfx-core
//!
//! Core types for in-place raster image filtering.
//!
//! This crate provides the foundational types used throughout imgfx:
//!
//! - [`PixelBuffer`] - Owned RGBA8 buffer addressed by 1-based logical coordinates
//! - [`ChannelSelector`], [`ChannelValue`] - Single channel or channel group access
//! - [`Rect`] - Sub-rectangle used by cropping
//! - [`Error`] - Bounds, dimension and selector errors
//!
//! ## Addressing
//!
//! The public API speaks **logical coordinates**: `x` in `[1, width]`,
//! `y` in `[1, height]`. Every access goes through a bounds-checked index
//! function, so an out-of-range coordinate fails with
//! [`Error::OutOfBounds`] instead of reading a neighbouring pixel.
//!
//! ```rust
//! use imgfx_core::{ChannelSelector, ChannelValue, PixelBuffer};
//!
//! let mut buf = PixelBuffer::filled(4, 3, [10, 20, 30, 255]);
//! buf.set(1, 1, ChannelSelector::R, &[300.0]).unwrap(); // saturates to 255
//! assert_eq!(buf.get(1, 1, ChannelSelector::Rgb).unwrap(), ChannelValue::Rgb([255, 20, 30]));
//! assert!(buf.get(5, 1, ChannelSelector::R).is_err());
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! imgfx-core (this crate)
//!    ^
//!    +-- imgfx-color (HSL conversion, luma)
//!    +-- imgfx-ops (blur, adjustments, geometry)
//!    +-- imgfx-cli
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod channel;
pub mod error;
pub mod rect;

pub use buffer::{PixelBuffer, CHANNELS};
pub use channel::{saturate, ChannelSelector, ChannelValue};
pub use error::{Error, Result};
pub use rect::Rect;

/// Prelude module for convenient imports.
///
/// ```
/// use imgfx_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::{PixelBuffer, CHANNELS};
    pub use crate::channel::{saturate, ChannelSelector, ChannelValue};
    pub use crate::error::{Error, Result};
    pub use crate::rect::Rect;
}

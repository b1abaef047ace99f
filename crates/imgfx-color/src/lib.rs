//! # imgfx-color
//!
//! Stateless color model conversions used by the imgfx filters.
//!
//! - [`hsl`] - 8-bit RGB to normalized HSL and back
//! - [`luma`] - Perceptual brightness weights (`0.3 R + 0.59 G + 0.11 B`)
//!
//! Nothing here allocates or keeps state; every function is a pure map on
//! value types. Channel values are `u8` on the way in and `f64` on the way
//! out so callers decide how to round and clamp.
//!
//! # Quick Start
//!
//! ```rust
//! use imgfx_color::{hsl_to_rgb, rgb_to_hsl, luma};
//!
//! let (h, s, l) = rgb_to_hsl(255, 0, 0);
//! assert_eq!((h, s, l), (0.0, 1.0, 0.5));
//!
//! let (r, g, b) = hsl_to_rgb(h, s, l * 0.5);
//! assert_eq!((r.round(), g.round(), b.round()), (128.0, 0.0, 0.0));
//!
//! assert!((luma(30, 60, 90) - 54.3).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod hsl;
pub mod luma;

pub use hsl::{hsl_to_rgb, rgb_to_hsl, Hsl};
pub use luma::{luma, LUMA, LUMA_B, LUMA_G, LUMA_R};

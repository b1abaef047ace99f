//! Channel selectors and the saturating store rule.
//!
//! A pixel is four bytes, `R G B A`. Callers address either one channel or
//! an ordered group of them through a [`ChannelSelector`]; reads come back as
//! a [`ChannelValue`] of the matching shape.
//!
//! Writes take `f64` so filter math can hand over unrounded results.
//! [`saturate`] turns those into bytes: NaN becomes 0, anything outside
//! `[0, 255]` clamps (never wraps), and fractions round half to even.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Which channel (or channel group) of a pixel to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelSelector {
    /// Red channel.
    R,
    /// Green channel.
    G,
    /// Blue channel.
    B,
    /// Alpha channel.
    A,
    /// Red, green and blue, in that order.
    Rgb,
    /// All four channels.
    Rgba,
}

impl ChannelSelector {
    /// Offset of the first addressed channel within the pixel.
    #[inline]
    pub const fn offset(self) -> usize {
        match self {
            Self::R | Self::Rgb | Self::Rgba => 0,
            Self::G => 1,
            Self::B => 2,
            Self::A => 3,
        }
    }

    /// Number of consecutive channels addressed.
    #[inline]
    pub const fn len(self) -> usize {
        match self {
            Self::R | Self::G | Self::B | Self::A => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Returns `true` for the single-channel selectors.
    #[inline]
    pub const fn is_single(self) -> bool {
        self.len() == 1
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::R => "r",
            Self::G => "g",
            Self::B => "b",
            Self::A => "a",
            Self::Rgb => "rgb",
            Self::Rgba => "rgba",
        }
    }
}

impl fmt::Display for ChannelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChannelSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "r" => Ok(Self::R),
            "g" => Ok(Self::G),
            "b" => Ok(Self::B),
            "a" => Ok(Self::A),
            "rgb" => Ok(Self::Rgb),
            "rgba" => Ok(Self::Rgba),
            _ => Err(Error::UnknownSelector(s.to_string())),
        }
    }
}

/// Result of a channel read, shaped by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelValue {
    /// One channel.
    Single(u8),
    /// Red, green, blue.
    Rgb([u8; 3]),
    /// Red, green, blue, alpha.
    Rgba([u8; 4]),
}

impl ChannelValue {
    /// Channel bytes in order.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Self::Single(v) => std::slice::from_ref(v),
            Self::Rgb(v) => v.as_slice(),
            Self::Rgba(v) => v.as_slice(),
        }
    }

    /// Number of channels held.
    #[inline]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Always `false`; a read returns at least one channel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Converts a computed channel value to a stored byte.
///
/// NaN maps to 0, values clamp to `[0, 255]`, and in-range fractions round
/// to nearest with ties to even.
///
/// ```rust
/// use imgfx_core::saturate;
///
/// assert_eq!(saturate(300.0), 255);
/// assert_eq!(saturate(-5.0), 0);
/// assert_eq!(saturate(127.5), 128);
/// assert_eq!(saturate(128.5), 128);
/// assert_eq!(saturate(f64::NAN), 0);
/// ```
#[inline]
pub fn saturate(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0).round_ties_even() as u8
}

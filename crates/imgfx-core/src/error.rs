//! Error types for imgfx-core operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers the local, synchronous failures of buffer
//! access:
//! - Coordinates outside the current buffer dimensions
//! - Channel-group writes whose value count doesn't match the selector
//! - Raw data whose length doesn't describe a `width x height` RGBA image
//!
//! None of these are retryable; the caller has to fix the input. Channel
//! values outside `[0, 255]` are *not* errors, they saturate on store.
//!
//! ```rust
//! use imgfx_core::{Error, Result};
//!
//! fn check(x: u32, y: u32, width: u32, height: u32) -> Result<()> {
//!     if x == 0 || y == 0 || x > width || y > height {
//!         return Err(Error::out_of_bounds(x, y, width, height));
//!     }
//!     Ok(())
//! }
//! assert!(check(0, 1, 8, 8).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while addressing a [`crate::PixelBuffer`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Logical coordinate outside `[1, width] x [1, height]`.
    ///
    /// ```rust
    /// use imgfx_core::Error;
    ///
    /// let err = Error::out_of_bounds(11, 3, 10, 10);
    /// assert!(err.to_string().contains("11"));
    /// ```
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Value count doesn't match the channel selector.
    ///
    /// Returned e.g. when writing four values through an RGB selector.
    #[error("dimension mismatch: selector takes {expected} values, got {got}")]
    DimensionMismatch {
        /// Values the selector addresses
        expected: usize,
        /// Values supplied
        got: usize,
    },

    /// Raw data doesn't describe a valid buffer of the given size.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Why the dimensions were rejected
        reason: String,
    },

    /// Channel selector name not recognised.
    #[error("unknown channel selector: {0:?}")]
    UnknownSelector(String),
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(expected: usize, got: usize) -> Self {
        Self::DimensionMismatch { expected, got }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}

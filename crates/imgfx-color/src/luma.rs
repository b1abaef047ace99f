//! Luma weights.
//!
//! The filters use the classic NTSC-style approximation
//! `Y = 0.3 R + 0.59 G + 0.11 B` on 8-bit values, for weighted grayscale
//! and for the contrast pivot.

/// Luma weight for the red channel.
pub const LUMA_R: f64 = 0.3;

/// Luma weight for the green channel.
pub const LUMA_G: f64 = 0.59;

/// Luma weight for the blue channel.
pub const LUMA_B: f64 = 0.11;

/// Luma weights as `[R, G, B]`.
pub const LUMA: [f64; 3] = [LUMA_R, LUMA_G, LUMA_B];

/// Unrounded luma of an 8-bit RGB triplet, in `[0, 255]`.
///
/// ```rust
/// use imgfx_color::luma;
///
/// assert!((luma(255, 255, 255) - 255.0).abs() < 1e-9);
/// assert_eq!(luma(0, 0, 0), 0.0);
/// ```
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    r as f64 * LUMA_R + g as f64 * LUMA_G + b as f64 * LUMA_B
}

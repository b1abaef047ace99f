//! Per-pixel tonal and color adjustments.
//!
//! Every operation here mutates the buffer in place through
//! [`PixelBuffer::map_rgb`] (or [`PixelBuffer::map_alpha`]), so results go
//! through the saturating store and never wrap. Each returns the same
//! `&mut PixelBuffer` so calls chain:
//!
//! ```rust
//! use imgfx_core::PixelBuffer;
//! use imgfx_ops::adjust::{grayscale, reverse, set_contrast, GrayMethod};
//!
//! let mut buf = PixelBuffer::filled(4, 4, [30, 60, 90, 255]);
//! grayscale(set_contrast(&mut buf, 20.0, false), GrayMethod::Average);
//! reverse(&mut buf);
//! ```
//!
//! Level parameters are documented with their useful range but not
//! validated; values outside it simply saturate.

use crate::{OpsError, OpsResult};
use imgfx_color::{luma, Hsl};
use imgfx_core::PixelBuffer;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Contrast pivot when the luma mean isn't recomputed.
pub const CONTRAST_PIVOT: f64 = 128.0;

/// Darken-only overlay used by [`mix_brown`] for an aged-photo look.
pub const SEPIA_OVERLAY: [u8; 3] = [208, 163, 79];

/// `Math.round`-style rounding: halves go up.
#[inline]
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

#[inline]
fn brighten(rgb: [u8; 3], level: f64) -> [f64; 3] {
    Hsl::from_rgb(rgb).scale_lightness(level / 100.0 + 1.0).to_rgb()
}

/// Scales HSL lightness by `level / 100 + 1`.
///
/// `level` is nominally in `[-100, 100]`: -100 turns everything black,
/// +100 doubles lightness.
///
/// ```rust
/// use imgfx_core::PixelBuffer;
/// use imgfx_ops::adjust::set_brightness;
///
/// let mut buf = PixelBuffer::filled(2, 2, [200, 100, 50, 255]);
/// set_brightness(&mut buf, -100.0);
/// assert_eq!(buf.rgba(1, 1).unwrap(), [0, 0, 0, 255]);
/// ```
pub fn set_brightness(buf: &mut PixelBuffer, level: f64) -> &mut PixelBuffer {
    trace!(width = buf.width(), height = buf.height(), level, "set_brightness");
    buf.map_rgb(|rgb, _, _| brighten(rgb, level));
    buf
}

/// Mean luma over every pixel, accumulated in traversal order.
pub fn mean_luma(buf: &PixelBuffer) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    buf.for_each_pixel(|[r, g, b], _, _| {
        sum += luma(r, g, b);
        count += 1;
    });
    (count > 0).then(|| sum / count as f64)
}

/// Linear contrast stretch around a pivot.
///
/// `out = pivot + (in - pivot) * (1 + level / 100)` per channel. The pivot
/// is [`CONTRAST_PIVOT`], or the image's mean luma when `recompute_average`
/// is set. `level` is nominally in `[-100, 100]`; 0 is the identity.
///
/// ```rust
/// use imgfx_core::PixelBuffer;
/// use imgfx_ops::adjust::set_contrast;
///
/// let mut buf = PixelBuffer::filled(1, 1, [100, 128, 200, 255]);
/// set_contrast(&mut buf, 100.0, false);
/// assert_eq!(buf.rgb(1, 1).unwrap(), [72, 128, 255]);
/// ```
pub fn set_contrast(buf: &mut PixelBuffer, level: f64, recompute_average: bool) -> &mut PixelBuffer {
    let pivot = if recompute_average {
        mean_luma(buf).unwrap_or(CONTRAST_PIVOT)
    } else {
        CONTRAST_PIVOT
    };
    trace!(width = buf.width(), height = buf.height(), level, pivot, "set_contrast");

    let gain = 1.0 + level / 100.0;
    buf.map_rgb(|rgb, _, _| rgb.map(|v| pivot + (v as f64 - pivot) * gain));
    buf
}

/// Radial falloff parameters for [`vignette`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VignetteOptions {
    /// Brightness level reached at the farthest corner, `[-100, 100]`.
    /// Negative darkens.
    pub max_level: f64,
    /// Untouched inner radius in pixels. `None` means `0.30 * max(w, h)`.
    pub radius: Option<f64>,
}

impl Default for VignetteOptions {
    fn default() -> Self {
        Self {
            max_level: -40.0,
            radius: None,
        }
    }
}

impl VignetteOptions {
    /// Inner radius for a `width` x `height` image.
    pub fn radius_for(&self, width: u32, height: u32) -> f64 {
        self.radius
            .unwrap_or_else(|| width.max(height) as f64 * 0.30)
    }
}

/// Darkens (or lightens) toward the corners.
///
/// The center is `(w/2, h/2)` in logical coordinates. Pixels whose distance
/// from it is at most the radius are left byte-identical. Past the radius
/// the brightness level is `(offset / max_offset)² * max_level`, where
/// `offset` is the distance beyond the radius and `max_offset` the same for
/// the farthest corner. The quadratic falloff avoids a visible ring.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] for a negative or non-finite radius.
///
/// ```rust
/// use imgfx_core::PixelBuffer;
/// use imgfx_ops::adjust::{vignette, VignetteOptions};
///
/// let mut buf = PixelBuffer::filled(20, 20, [128, 128, 128, 255]);
/// vignette(&mut buf, VignetteOptions::default()).unwrap();
/// assert_eq!(buf.rgb(10, 10).unwrap(), [128, 128, 128]);
/// assert!(buf.rgb(1, 1).unwrap()[0] < 128);
/// ```
pub fn vignette(buf: &mut PixelBuffer, options: VignetteOptions) -> OpsResult<&mut PixelBuffer> {
    let radius = options.radius_for(buf.width(), buf.height());
    if !radius.is_finite() || radius < 0.0 {
        return Err(OpsError::InvalidParameter(format!(
            "vignette radius must be finite and non-negative, got {radius}"
        )));
    }

    let cx = buf.width() as f64 / 2.0;
    let cy = buf.height() as f64 / 2.0;
    let max_offset = (cx * cx + cy * cy).sqrt() - radius;
    let radius_sq = radius * radius;
    trace!(
        width = buf.width(),
        height = buf.height(),
        max_level = options.max_level,
        radius,
        max_offset,
        "vignette"
    );

    buf.map_rgb(|rgb, x, y| {
        let dx = x as f64 - cx;
        let dy = y as f64 - cy;
        let dist_sq = dx * dx + dy * dy;
        if dist_sq <= radius_sq {
            return rgb.map(f64::from);
        }
        let t = (dist_sq.sqrt() - radius) / max_offset;
        brighten(rgb, t * t * options.max_level)
    });
    Ok(buf)
}

/// Reduction used by [`grayscale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrayMethod {
    /// Rounded mean of R, G, B.
    Average,
    /// Largest channel.
    Max,
    /// Rounded luma, `0.3 R + 0.59 G + 0.11 B`.
    #[default]
    Weighted,
}

impl GrayMethod {
    /// Gray level for one pixel.
    #[inline]
    pub fn reduce(self, [r, g, b]: [u8; 3]) -> f64 {
        match self {
            Self::Average => round_half_up((r as f64 + g as f64 + b as f64) / 3.0),
            Self::Max => r.max(g).max(b) as f64,
            Self::Weighted => round_half_up(luma(r, g, b)),
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Average => "average",
            Self::Max => "max",
            Self::Weighted => "weighted",
        }
    }
}

impl fmt::Display for GrayMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GrayMethod {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "average" | "avg" => Ok(Self::Average),
            "max" => Ok(Self::Max),
            "weighted" | "luma" => Ok(Self::Weighted),
            other => Err(OpsError::InvalidParameter(format!(
                "unknown gray method '{other}', expected average, max or weighted"
            ))),
        }
    }
}

/// Writes a single gray level to R, G and B.
///
/// ```rust
/// use imgfx_core::PixelBuffer;
/// use imgfx_ops::adjust::{grayscale, GrayMethod};
///
/// let mut buf = PixelBuffer::filled(1, 1, [30, 60, 90, 255]);
/// grayscale(&mut buf, GrayMethod::Average);
/// assert_eq!(buf.rgb(1, 1).unwrap(), [60, 60, 60]);
/// ```
pub fn grayscale(buf: &mut PixelBuffer, method: GrayMethod) -> &mut PixelBuffer {
    trace!(width = buf.width(), height = buf.height(), %method, "grayscale");
    buf.map_rgb(|rgb, _, _| [method.reduce(rgb); 3]);
    buf
}

/// Negative: `255 - v` on R, G and B.
pub fn reverse(buf: &mut PixelBuffer) -> &mut PixelBuffer {
    trace!(width = buf.width(), height = buf.height(), "reverse");
    buf.map_rgb(|rgb, _, _| rgb.map(|v| (255 - v) as f64));
    buf
}

/// Darken-only blend: each channel becomes `min(original, overlay)`.
pub fn mix_darken(buf: &mut PixelBuffer, overlay: [u8; 3]) -> &mut PixelBuffer {
    trace!(width = buf.width(), height = buf.height(), ?overlay, "mix_darken");
    buf.map_rgb(|[r, g, b], _, _| {
        [
            r.min(overlay[0]) as f64,
            g.min(overlay[1]) as f64,
            b.min(overlay[2]) as f64,
        ]
    });
    buf
}

/// [`mix_darken`] with [`SEPIA_OVERLAY`].
pub fn mix_brown(buf: &mut PixelBuffer) -> &mut PixelBuffer {
    mix_darken(buf, SEPIA_OVERLAY)
}

/// Sets every alpha to `level * 255`, `level` nominally in `[0, 1]`.
///
/// ```rust
/// use imgfx_core::PixelBuffer;
/// use imgfx_ops::adjust::set_opacity;
///
/// let mut buf = PixelBuffer::filled(1, 1, [1, 2, 3, 255]);
/// set_opacity(&mut buf, 0.5);
/// assert_eq!(buf.rgba(1, 1).unwrap(), [1, 2, 3, 128]);
/// ```
pub fn set_opacity(buf: &mut PixelBuffer, level: f64) -> &mut PixelBuffer {
    let alpha = level * 255.0;
    debug!(level, alpha, "set_opacity");
    buf.map_alpha(|_, _, _| alpha);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample() -> PixelBuffer {
        let mut data = Vec::new();
        for i in 0..24u32 {
            data.extend_from_slice(&[
                (i * 11 % 256) as u8,
                (i * 37 % 256) as u8,
                (255 - i * 7) as u8,
                (i * 10) as u8,
            ]);
        }
        PixelBuffer::new(data, 6, 4).unwrap()
    }

    #[test]
    fn test_brightness_scales_lightness() {
        let mut buf = PixelBuffer::filled(1, 1, [100, 100, 100, 255]);
        set_brightness(&mut buf, 50.0);
        assert_eq!(buf.rgb(1, 1).unwrap(), [150, 150, 150]);
    }

    #[test]
    fn test_brightness_saturates() {
        let mut buf = PixelBuffer::filled(1, 1, [250, 250, 250, 7]);
        set_brightness(&mut buf, 100.0);
        assert_eq!(buf.rgba(1, 1).unwrap(), [255, 255, 255, 7]);
    }

    #[test]
    fn test_contrast_zero_is_identity() {
        let src = sample();
        let mut a = src.clone();
        set_contrast(&mut a, 0.0, false);
        assert_eq!(a, src);

        let mut b = src.clone();
        set_contrast(&mut b, 0.0, true);
        assert_eq!(b, src);
    }

    #[test]
    fn test_contrast_pivot_fixed() {
        let mut buf = PixelBuffer::filled(1, 1, [0, 128, 255, 255]);
        set_contrast(&mut buf, -50.0, false);
        assert_eq!(buf.rgb(1, 1).unwrap(), [64, 128, 192]);
    }

    #[test]
    fn test_contrast_pivot_from_luma() {
        // Two pixels with luma 50 and 150, mean 100.
        let mut buf = PixelBuffer::new(vec![50, 50, 50, 255, 150, 150, 150, 255], 2, 1).unwrap();
        assert_abs_diff_eq!(mean_luma(&buf).unwrap(), 100.0, epsilon = 1e-9);
        set_contrast(&mut buf, 100.0, true);
        assert_eq!(buf.rgb(1, 1).unwrap(), [0, 0, 0]);
        assert_eq!(buf.rgb(2, 1).unwrap(), [200, 200, 200]);
    }

    #[test]
    fn test_mean_luma_empty() {
        let buf = PixelBuffer::new(Vec::new(), 0, 0).unwrap();
        assert_eq!(mean_luma(&buf), None);
    }

    #[test]
    fn test_vignette_leaves_center() {
        let src = sample();
        let mut buf = src.clone();
        let opts = VignetteOptions::default();
        vignette(&mut buf, opts).unwrap();

        let radius = opts.radius_for(6, 4);
        let (cx, cy) = (3.0, 2.0);
        let mut inner = 0;
        src.for_each_pixel(|_, x, y| {
            let d2 = (x as f64 - cx).powi(2) + (y as f64 - cy).powi(2);
            if d2 <= radius * radius {
                inner += 1;
                assert_eq!(buf.rgba(x, y).unwrap(), src.rgba(x, y).unwrap(), "({x}, {y})");
            }
        });
        assert!(inner > 0);
    }

    #[test]
    fn test_vignette_darkens_corners_progressively() {
        let mut buf = PixelBuffer::filled(40, 40, [200, 200, 200, 255]);
        vignette(&mut buf, VignetteOptions::default()).unwrap();
        let corner = buf.rgb(1, 1).unwrap()[0];
        let mid = buf.rgb(6, 6).unwrap()[0];
        assert!(corner < mid, "corner {corner} mid {mid}");
        assert!(mid <= 200);
        assert_eq!(buf.rgb(20, 20).unwrap(), [200, 200, 200]);
    }

    #[test]
    fn test_vignette_radius_covering_image() {
        let src = sample();
        let mut buf = src.clone();
        vignette(&mut buf, VignetteOptions { max_level: -100.0, radius: Some(100.0) }).unwrap();
        assert_eq!(buf, src);
    }

    #[test]
    fn test_vignette_rejects_bad_radius() {
        let mut buf = sample();
        for radius in [-1.0, f64::NAN, f64::INFINITY] {
            let opts = VignetteOptions { radius: Some(radius), ..Default::default() };
            assert!(vignette(&mut buf, opts).is_err());
        }
    }

    #[test]
    fn test_gray_methods() {
        let px = [30, 60, 90];
        assert_eq!(GrayMethod::Average.reduce(px), 60.0);
        assert_eq!(GrayMethod::Max.reduce(px), 90.0);
        // 9 + 35.4 + 9.9 = 54.3
        assert_eq!(GrayMethod::Weighted.reduce(px), 54.0);
        // Halves round up: (1 + 2 + 2) / 3 = 1.67, (0 + 0 + 1) / 3 = 0.33
        assert_eq!(GrayMethod::Average.reduce([1, 2, 2]), 2.0);
        assert_eq!(GrayMethod::Average.reduce([0, 0, 1]), 0.0);
        assert_eq!(GrayMethod::default(), GrayMethod::Weighted);
    }

    #[test]
    fn test_gray_method_parse() {
        assert_eq!("average".parse::<GrayMethod>().unwrap(), GrayMethod::Average);
        assert_eq!("MAX".parse::<GrayMethod>().unwrap(), GrayMethod::Max);
        assert_eq!("weighted".parse::<GrayMethod>().unwrap(), GrayMethod::Weighted);
        assert!("sepia".parse::<GrayMethod>().is_err());
        for m in [GrayMethod::Average, GrayMethod::Max, GrayMethod::Weighted] {
            assert_eq!(m.to_string().parse::<GrayMethod>().unwrap(), m);
        }
    }

    #[test]
    fn test_grayscale_writes_all_channels() {
        let mut buf = PixelBuffer::filled(2, 2, [30, 60, 90, 77]);
        grayscale(&mut buf, GrayMethod::Average);
        buf.for_each_pixel(|rgb, _, _| assert_eq!(rgb, [60, 60, 60]));
        assert_eq!(buf.rgba(2, 2).unwrap()[3], 77);
    }

    #[test]
    fn test_reverse_involution() {
        let src = sample();
        let mut buf = src.clone();
        reverse(reverse(&mut buf));
        assert_eq!(buf, src);
    }

    #[test]
    fn test_reverse_values() {
        let mut buf = PixelBuffer::filled(1, 1, [0, 100, 255, 9]);
        reverse(&mut buf);
        assert_eq!(buf.rgba(1, 1).unwrap(), [255, 155, 0, 9]);
    }

    #[test]
    fn test_mix_darken_and_brown() {
        let mut buf = PixelBuffer::filled(1, 1, [250, 100, 200, 255]);
        mix_darken(&mut buf, [128, 128, 128]);
        assert_eq!(buf.rgb(1, 1).unwrap(), [128, 100, 128]);

        let mut buf = PixelBuffer::filled(1, 1, [255, 255, 0, 255]);
        mix_brown(&mut buf);
        assert_eq!(buf.rgb(1, 1).unwrap(), [208, 163, 0]);
    }

    #[test]
    fn test_opacity() {
        let mut buf = sample();
        set_opacity(&mut buf, 0.5);
        buf.for_each_pixel(|_, x, y| assert_eq!(buf.rgba(x, y).unwrap()[3], 128));
        set_opacity(&mut buf, 2.0);
        assert_eq!(buf.rgba(1, 1).unwrap()[3], 255);
        set_opacity(&mut buf, -1.0);
        assert_eq!(buf.rgba(1, 1).unwrap()[3], 0);
    }
}

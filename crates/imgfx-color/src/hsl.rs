//! RGB <-> HSL conversion.
//!
//! RGB is three bytes in `[0, 255]`; HSL is three `f64` in `[0, 1]`
//! (hue as a fraction of a full turn, saturation, lightness).
//!
//! Achromatic colors (`r == g == b`) take an exact path in both directions:
//! hue and saturation come out as exactly `0.0`, and `s == 0` converts back
//! to `l * 255` on all three channels, so grays round-trip bit-exactly.
//! Chromatic colors round-trip to within one unit per channel after
//! rounding.

/// Converts 8-bit RGB to `(hue, saturation, lightness)` in `[0, 1]`.
///
/// ```rust
/// use imgfx_color::rgb_to_hsl;
///
/// assert_eq!(rgb_to_hsl(0, 255, 0), (1.0 / 3.0, 1.0, 0.5));
/// assert_eq!(rgb_to_hsl(128, 128, 128).1, 0.0);
/// ```
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    // Ties resolve red first, then green.
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h / 6.0, s, l)
}

/// Converts `(hue, saturation, lightness)` to RGB in the `[0, 255]` scale.
///
/// The result is left unrounded and unclamped; lightness scaled past 1.0
/// produces channels above 255 that the caller saturates on store.
///
/// ```rust
/// use imgfx_color::hsl_to_rgb;
///
/// assert_eq!(hsl_to_rgb(0.0, 0.0, 0.5), (127.5, 127.5, 127.5));
/// let (r, g, b) = hsl_to_rgb(2.0 / 3.0, 1.0, 0.5);
/// assert_eq!((r.round(), g.round(), b.round()), (0.0, 0.0, 255.0));
/// ```
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        let v = l * 255.0;
        return (v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    (
        hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0,
        hue_to_channel(p, q, h) * 255.0,
        hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0,
    )
}

/// Piecewise hue ramp between the two pivots.
#[inline]
fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

/// HSL triplet as a value type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    /// Hue, fraction of a full turn
    pub h: f64,
    /// Saturation
    pub s: f64,
    /// Lightness
    pub l: f64,
}

impl Hsl {
    /// Creates a new HSL value.
    #[inline]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Converts an RGB byte triplet.
    #[inline]
    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        let (h, s, l) = rgb_to_hsl(rgb[0], rgb[1], rgb[2]);
        Self { h, s, l }
    }

    /// Converts back to unrounded RGB in the `[0, 255]` scale.
    #[inline]
    pub fn to_rgb(self) -> [f64; 3] {
        let (r, g, b) = hsl_to_rgb(self.h, self.s, self.l);
        [r, g, b]
    }

    /// Returns a copy with lightness multiplied by `factor`.
    #[inline]
    pub fn scale_lightness(self, factor: f64) -> Self {
        Self {
            l: self.l * factor,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_primaries() {
        assert_eq!(rgb_to_hsl(255, 0, 0), (0.0, 1.0, 0.5));
        assert_eq!(rgb_to_hsl(0, 0, 255), (4.0 / 6.0, 1.0, 0.5));
        let (h, s, l) = rgb_to_hsl(255, 255, 0);
        assert_abs_diff_eq!(h, 1.0 / 6.0, epsilon = 1e-12);
        assert_eq!((s, l), (1.0, 0.5));
    }

    #[test]
    fn test_red_max_with_blue_above_green_wraps_hue() {
        // g < b under a red max adds a full turn before dividing by 6.
        let (h, _, _) = rgb_to_hsl(255, 0, 128);
        assert!(h > 5.0 / 6.0 && h < 1.0);
    }

    #[test]
    fn test_saturation_branches() {
        // Dark: d / (max + min)
        let (_, s, l) = rgb_to_hsl(100, 50, 50);
        assert!(l <= 0.5);
        assert_abs_diff_eq!(s, (50.0 / 255.0) / (150.0 / 255.0), epsilon = 1e-12);
        // Light: d / (2 - max - min)
        let (_, s, l) = rgb_to_hsl(250, 200, 200);
        assert!(l > 0.5);
        assert_abs_diff_eq!(s, (50.0 / 255.0) / (2.0 - 450.0 / 255.0), epsilon = 1e-12);
    }

    #[test]
    fn test_achromatic_exact() {
        for v in 0..=255u8 {
            let (h, s, l) = rgb_to_hsl(v, v, v);
            assert_eq!(h, 0.0);
            assert_eq!(s, 0.0);
            let (r, g, b) = hsl_to_rgb(h, s, l);
            assert_eq!(r, g);
            assert_eq!(g, b);
            assert_eq!(r.round() as u8, v);
        }
    }

    #[test]
    fn test_hsl_value_type() {
        let hsl = Hsl::from_rgb([30, 60, 90]);
        let back = hsl.to_rgb();
        assert_abs_diff_eq!(back[0], 30.0, epsilon = 1e-9);
        assert_abs_diff_eq!(back[1], 60.0, epsilon = 1e-9);
        assert_abs_diff_eq!(back[2], 90.0, epsilon = 1e-9);

        let darker = hsl.scale_lightness(0.5);
        assert_eq!(darker.h, hsl.h);
        assert_eq!(darker.s, hsl.s);
        assert_abs_diff_eq!(darker.l, hsl.l * 0.5);
    }

    #[test]
    fn test_lightness_overflow_is_unclamped() {
        let (r, g, b) = hsl_to_rgb(0.0, 0.0, 1.5);
        assert_eq!((r, g, b), (382.5, 382.5, 382.5));
    }
}

//! Geometric transforms: crop and quarter-turn rotation.
//!
//! Both produce a new buffer and leave the source alone.
//!
//! # Operations
//!
//! - [`crop`] - Extract a sub-rectangle, clamped to the image
//! - [`rotate`] - Lossless 90/180/270 degree clockwise rotation
//!
//! # Example
//!
//! ```rust
//! use imgfx_core::PixelBuffer;
//! use imgfx_ops::transform::{crop, rotate, Rotation};
//!
//! let src = PixelBuffer::filled(64, 48, [1, 2, 3, 255]);
//! let cropped = crop(&src, 16, 16, 32, 32).unwrap();
//! assert_eq!(cropped.dimensions(), (32, 32));
//!
//! let turned = rotate(&src, Rotation::Cw90).unwrap();
//! assert_eq!(turned.dimensions(), (48, 64));
//! ```

use crate::{OpsError, OpsResult};
use imgfx_core::{Error, PixelBuffer, Rect, CHANNELS};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Crops a region into a new buffer.
///
/// # Arguments
///
/// * `src` - Source buffer
/// * `x`, `y` - Columns and rows to skip; the region starts at logical
///   pixel `(x + 1, y + 1)`
/// * `width`, `height` - Requested size, clamped to what is left of the image
///
/// # Errors
///
/// - `InvalidDimensions` if `width` or `height` is 0
/// - `OutOfBounds` if the origin is past the right or bottom edge
///
/// # Example
///
/// ```rust
/// use imgfx_core::PixelBuffer;
/// use imgfx_ops::transform::crop;
///
/// let src = PixelBuffer::filled(10, 10, [0; 4]);
/// assert_eq!(crop(&src, 2, 2, 100, 100).unwrap().dimensions(), (8, 8));
/// assert!(crop(&src, 10, 0, 1, 1).is_err());
/// ```
pub fn crop(src: &PixelBuffer, x: u32, y: u32, width: u32, height: u32) -> OpsResult<PixelBuffer> {
    trace!(src_w = src.width(), src_h = src.height(), x, y, width, height, "crop");
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "crop region must not be empty").into());
    }

    let image = Rect::from_size(src.width(), src.height());
    let region = Rect::new(x, y, width, height).intersect(&image).ok_or_else(|| {
        Error::out_of_bounds(
            x.saturating_add(1),
            y.saturating_add(1),
            src.width(),
            src.height(),
        )
    })?;

    let start = region.x as usize * CHANNELS;
    let len = region.width as usize * CHANNELS;
    let mut data = Vec::with_capacity(region.area() as usize * CHANNELS);
    for row in region.y + 1..=region.bottom() {
        data.extend_from_slice(&src.row(row)?[start..start + len]);
    }

    Ok(PixelBuffer::new(data, region.width, region.height)?)
}

/// Clockwise quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// 90 degrees clockwise
    Cw90,
    /// 180 degrees
    Cw180,
    /// 270 degrees clockwise (90 counter-clockwise)
    Cw270,
}

impl Rotation {
    /// Maps an angle in degrees to a quarter turn.
    ///
    /// Any multiple of 90 other than a full turn is accepted; negative
    /// angles turn counter-clockwise.
    ///
    /// ```rust
    /// use imgfx_ops::transform::Rotation;
    ///
    /// assert_eq!(Rotation::from_degrees(-90).unwrap(), Rotation::Cw270);
    /// assert_eq!(Rotation::from_degrees(450).unwrap(), Rotation::Cw90);
    /// assert!(Rotation::from_degrees(45).is_err());
    /// assert!(Rotation::from_degrees(360).is_err());
    /// ```
    pub fn from_degrees(degrees: i32) -> OpsResult<Self> {
        match degrees.rem_euclid(360) {
            90 => Ok(Self::Cw90),
            180 => Ok(Self::Cw180),
            270 => Ok(Self::Cw270),
            _ => Err(OpsError::InvalidParameter(format!(
                "rotation must be a quarter turn (90, 180 or 270 degrees), got {degrees}"
            ))),
        }
    }

    /// Clockwise angle in degrees.
    pub const fn degrees(self) -> u32 {
        match self {
            Self::Cw90 => 90,
            Self::Cw180 => 180,
            Self::Cw270 => 270,
        }
    }

    /// Whether width and height trade places.
    pub const fn swaps_dimensions(self) -> bool {
        !matches!(self, Self::Cw180)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

impl FromStr for Rotation {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let degrees = s
            .trim()
            .parse::<i32>()
            .map_err(|_| OpsError::InvalidParameter(format!("invalid rotation '{s}'")))?;
        Self::from_degrees(degrees)
    }
}

/// Rotates clockwise by a quarter turn into a new buffer.
///
/// Lossless: every pixel moves, none are resampled. `Cw90` and `Cw270`
/// swap width and height.
pub fn rotate(src: &PixelBuffer, rotation: Rotation) -> OpsResult<PixelBuffer> {
    trace!(width = src.width(), height = src.height(), %rotation, "rotate");
    let (w, h) = (src.width() as usize, src.height() as usize);
    let (dw, dh) = if rotation.swaps_dimensions() { (h, w) } else { (w, h) };
    let raw = src.as_raw();
    let mut dst = vec![0u8; raw.len()];

    for sy in 0..h {
        for sx in 0..w {
            let (dx, dy) = match rotation {
                Rotation::Cw90 => (h - 1 - sy, sx),
                Rotation::Cw180 => (w - 1 - sx, h - 1 - sy),
                Rotation::Cw270 => (sy, w - 1 - sx),
            };
            let s = (sy * w + sx) * CHANNELS;
            let d = (dy * dw + dx) * CHANNELS;
            dst[d..d + CHANNELS].copy_from_slice(&raw[s..s + CHANNELS]);
        }
    }

    Ok(PixelBuffer::new(dst, dw as u32, dh as u32)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Each pixel's R/G hold its logical x/y.
    fn coords(w: u32, h: u32) -> PixelBuffer {
        let mut data = Vec::new();
        for y in 1..=h {
            for x in 1..=w {
                data.extend_from_slice(&[x as u8, y as u8, 0, 255]);
            }
        }
        PixelBuffer::new(data, w, h).unwrap()
    }

    #[test]
    fn test_crop_clamps_extent() {
        let src = coords(10, 10);
        let out = crop(&src, 2, 2, 100, 100).unwrap();
        assert_eq!(out.dimensions(), (8, 8));
        // Region starts at logical (3, 3).
        assert_eq!(out.rgb(1, 1).unwrap(), [3, 3, 0]);
        assert_eq!(out.rgb(8, 8).unwrap(), [10, 10, 0]);
    }

    #[test]
    fn test_crop_interior() {
        let src = coords(6, 5);
        let out = crop(&src, 1, 2, 3, 2).unwrap();
        assert_eq!(out.dimensions(), (3, 2));
        assert_eq!(out.rgb(1, 1).unwrap(), [2, 3, 0]);
        assert_eq!(out.rgb(3, 2).unwrap(), [4, 4, 0]);
    }

    #[test]
    fn test_crop_whole_image() {
        let src = coords(4, 3);
        assert_eq!(crop(&src, 0, 0, 4, 3).unwrap(), src);
    }

    #[test]
    fn test_crop_errors() {
        let src = coords(4, 4);
        let err = crop(&src, 0, 0, 0, 2).unwrap_err();
        assert!(matches!(err, OpsError::Core(Error::InvalidDimensions { .. })));

        let err = crop(&src, 4, 0, 2, 2).unwrap_err();
        assert!(matches!(err, OpsError::Core(ref e) if e.is_bounds_error()));
        assert!(crop(&src, 0, 9, 2, 2).is_err());
    }

    #[test]
    fn test_rotate_cw90() {
        let src = coords(3, 2);
        let out = rotate(&src, Rotation::Cw90).unwrap();
        assert_eq!(out.dimensions(), (2, 3));
        // Bottom-left of the source becomes top-left.
        assert_eq!(out.rgb(1, 1).unwrap(), [1, 2, 0]);
        assert_eq!(out.rgb(2, 1).unwrap(), [1, 1, 0]);
        assert_eq!(out.rgb(1, 3).unwrap(), [3, 2, 0]);
    }

    #[test]
    fn test_rotate_cw180_and_cw270() {
        let src = coords(3, 2);
        let half = rotate(&src, Rotation::Cw180).unwrap();
        assert_eq!(half.dimensions(), (3, 2));
        assert_eq!(half.rgb(1, 1).unwrap(), [3, 2, 0]);

        let ccw = rotate(&src, Rotation::Cw270).unwrap();
        assert_eq!(ccw.dimensions(), (2, 3));
        // Top-right of the source becomes top-left.
        assert_eq!(ccw.rgb(1, 1).unwrap(), [3, 1, 0]);
    }

    #[test]
    fn test_rotate_full_turn_identity() {
        let src = coords(5, 3);
        let mut out = src.clone();
        for _ in 0..4 {
            out = rotate(&out, Rotation::Cw90).unwrap();
        }
        assert_eq!(out, src);

        let there = rotate(&src, Rotation::Cw90).unwrap();
        assert_eq!(rotate(&there, Rotation::Cw270).unwrap(), src);
        let half = rotate(&src, Rotation::Cw180).unwrap();
        assert_eq!(rotate(&half, Rotation::Cw180).unwrap(), src);
    }

    #[test]
    fn test_rotation_parse() {
        assert_eq!("90".parse::<Rotation>().unwrap(), Rotation::Cw90);
        assert_eq!(" 180 ".parse::<Rotation>().unwrap(), Rotation::Cw180);
        assert_eq!("-90".parse::<Rotation>().unwrap(), Rotation::Cw270);
        assert!("0".parse::<Rotation>().is_err());
        assert!("ninety".parse::<Rotation>().is_err());
        assert_eq!(Rotation::Cw270.to_string(), "270");
    }
}

//! RGBA8 pixel buffer with 1-based logical addressing.
//!
//! # Memory Layout
//!
//! Pixels are stored row-major, top-to-bottom, four interleaved channels
//! per pixel:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- row y = 1
//!         [R G B A R G B A ...]  <- row y = 2
//! ```
//!
//! Channel `c` of logical pixel `(x, y)` lives at
//! `((y - 1) * width + (x - 1)) * 4 + c`. That offset is only ever
//! computed behind a bounds check; callers see coordinates, not offsets.
//!
//! # Ownership
//!
//! A buffer is exclusively owned by whoever holds it. Per-pixel filters
//! borrow it mutably and rewrite it in place; resizing operations (crop,
//! rotate) and blur build a new buffer and hand it back.

use crate::{saturate, ChannelSelector, ChannelValue, Error, Result};

/// Channels per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Owned RGBA8 image buffer.
///
/// Invariant: `data.len() == width * height * 4`. Nothing resizes the
/// vector in place; a new size means a new buffer.
///
/// # Example
///
/// ```rust
/// use imgfx_core::PixelBuffer;
///
/// let raw = vec![0u8; 2 * 2 * 4];
/// let mut buf = PixelBuffer::new(raw, 2, 2).unwrap();
/// buf.set_rgb(2, 2, [10.0, 20.0, 30.0]).unwrap();
/// assert_eq!(buf.rgb(2, 2).unwrap(), [10, 20, 30]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Wraps raw RGBA bytes produced by a decoder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` isn't
    /// `width * height * 4` or that product overflows.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let expected = Self::byte_len(width, height)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates a buffer with every pixel set to `rgba`.
    ///
    /// # Panics
    ///
    /// Panics if `width * height * 4` overflows `usize`.
    ///
    /// ```rust
    /// use imgfx_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::filled(3, 2, [1, 2, 3, 4]);
    /// assert_eq!(buf.rgba(3, 2).unwrap(), [1, 2, 3, 4]);
    /// ```
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let len = Self::byte_len(width, height).expect("buffer size overflows usize");
        let mut data = Vec::with_capacity(len);
        for _ in 0..len / CHANNELS {
            data.extend_from_slice(&rgba);
        }
        Self {
            data,
            width,
            height,
        }
    }

    fn byte_len(width: u32, height: u32) -> Result<usize> {
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows"))
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGBA bytes, row-major, for a presenter.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer and returns its raw RGBA bytes.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Returns `true` if `(x, y)` is a valid logical coordinate.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= 1 && y >= 1 && x <= self.width && y <= self.height
    }

    /// Flat offset of channel `c` at logical `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] unless `x` is in `[1, width]` and `y` in
    /// `[1, height]`.
    ///
    /// ```rust
    /// use imgfx_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::filled(5, 5, [0; 4]);
    /// assert_eq!(buf.index(1, 1, 0).unwrap(), 0);
    /// assert_eq!(buf.index(2, 1, 3).unwrap(), 7);
    /// assert_eq!(buf.index(1, 2, 0).unwrap(), 20);
    /// assert!(buf.index(0, 1, 0).is_err());
    /// ```
    #[inline]
    pub fn index(&self, x: u32, y: u32, c: usize) -> Result<usize> {
        if !self.contains(x, y) {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        debug_assert!(c < CHANNELS);
        Ok(((y as usize - 1) * self.width as usize + (x as usize - 1)) * CHANNELS + c)
    }

    /// Reads the channel(s) named by `selector` at `(x, y)`.
    ///
    /// ```rust
    /// use imgfx_core::{ChannelSelector, ChannelValue, PixelBuffer};
    ///
    /// let buf = PixelBuffer::filled(2, 2, [9, 8, 7, 6]);
    /// assert_eq!(buf.get(2, 1, ChannelSelector::G).unwrap(), ChannelValue::Single(8));
    /// assert_eq!(buf.get(2, 1, ChannelSelector::Rgba).unwrap(), ChannelValue::Rgba([9, 8, 7, 6]));
    /// ```
    pub fn get(&self, x: u32, y: u32, selector: ChannelSelector) -> Result<ChannelValue> {
        let base = self.index(x, y, 0)?;
        let px = &self.data[base..base + CHANNELS];
        Ok(match selector {
            ChannelSelector::Rgb => ChannelValue::Rgb([px[0], px[1], px[2]]),
            ChannelSelector::Rgba => ChannelValue::Rgba([px[0], px[1], px[2], px[3]]),
            single => ChannelValue::Single(px[single.offset()]),
        })
    }

    /// Writes `values` into the channel(s) named by `selector` at `(x, y)`.
    ///
    /// Values pass through [`saturate`]; out-of-range input clamps rather
    /// than wrapping.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfBounds`] for an invalid coordinate
    /// - [`Error::DimensionMismatch`] if `values.len() != selector.len()`
    pub fn set(&mut self, x: u32, y: u32, selector: ChannelSelector, values: &[f64]) -> Result<()> {
        let base = self.index(x, y, selector.offset())?;
        if values.len() != selector.len() {
            return Err(Error::dimension_mismatch(selector.len(), values.len()));
        }
        for (dst, &v) in self.data[base..base + values.len()].iter_mut().zip(values) {
            *dst = saturate(v);
        }
        Ok(())
    }

    /// Red, green, blue at `(x, y)`.
    #[inline]
    pub fn rgb(&self, x: u32, y: u32) -> Result<[u8; 3]> {
        let i = self.index(x, y, 0)?;
        Ok([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// All four channels at `(x, y)`.
    #[inline]
    pub fn rgba(&self, x: u32, y: u32) -> Result<[u8; 4]> {
        let i = self.index(x, y, 0)?;
        Ok([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Stores red, green, blue at `(x, y)`; alpha is left alone.
    #[inline]
    pub fn set_rgb(&mut self, x: u32, y: u32, rgb: [f64; 3]) -> Result<()> {
        self.set(x, y, ChannelSelector::Rgb, &rgb)
    }

    /// Stores all four channels at `(x, y)`.
    #[inline]
    pub fn set_rgba(&mut self, x: u32, y: u32, rgba: [f64; 4]) -> Result<()> {
        self.set(x, y, ChannelSelector::Rgba, &rgba)
    }

    /// Visits every pixel as `visitor(rgb, x, y)`.
    ///
    /// Traversal order: the outer loop walks `x` from 1 to `width`, the
    /// inner loop walks `y` from 1 to `height`, so `y` varies fastest. This
    /// is column-major with respect to memory. Accumulations that depend on
    /// summation order (the contrast pivot) rely on it.
    ///
    /// ```rust
    /// use imgfx_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::filled(2, 2, [0; 4]);
    /// let mut order = Vec::new();
    /// buf.for_each_pixel(|_, x, y| order.push((x, y)));
    /// assert_eq!(order, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    /// ```
    pub fn for_each_pixel<F>(&self, mut visitor: F)
    where
        F: FnMut([u8; 3], u32, u32),
    {
        let w = self.width as usize;
        for x in 1..=self.width {
            for y in 1..=self.height {
                let i = ((y as usize - 1) * w + (x as usize - 1)) * CHANNELS;
                visitor([self.data[i], self.data[i + 1], self.data[i + 2]], x, y);
            }
        }
    }

    /// Rewrites every pixel's RGB with `f(rgb, x, y)`.
    ///
    /// Same traversal order as [`for_each_pixel`](Self::for_each_pixel).
    /// The returned triplet goes through [`saturate`]; alpha is untouched.
    ///
    /// ```rust
    /// use imgfx_core::PixelBuffer;
    ///
    /// let mut buf = PixelBuffer::filled(2, 1, [100, 100, 100, 255]);
    /// buf.map_rgb(|[r, g, b], x, _| [r as f64 * x as f64 * 2.0, g as f64, b as f64 - 200.0]);
    /// assert_eq!(buf.rgba(1, 1).unwrap(), [200, 100, 0, 255]);
    /// assert_eq!(buf.rgba(2, 1).unwrap(), [255, 100, 0, 255]);
    /// ```
    pub fn map_rgb<F>(&mut self, mut f: F)
    where
        F: FnMut([u8; 3], u32, u32) -> [f64; 3],
    {
        let w = self.width as usize;
        for x in 1..=self.width {
            for y in 1..=self.height {
                let i = ((y as usize - 1) * w + (x as usize - 1)) * CHANNELS;
                let px = &mut self.data[i..i + 3];
                let out = f([px[0], px[1], px[2]], x, y);
                px[0] = saturate(out[0]);
                px[1] = saturate(out[1]);
                px[2] = saturate(out[2]);
            }
        }
    }

    /// Rewrites every pixel's alpha with `f(rgba, x, y)`.
    ///
    /// Same traversal order as [`for_each_pixel`](Self::for_each_pixel).
    pub fn map_alpha<F>(&mut self, mut f: F)
    where
        F: FnMut([u8; 4], u32, u32) -> f64,
    {
        let w = self.width as usize;
        for x in 1..=self.width {
            for y in 1..=self.height {
                let i = ((y as usize - 1) * w + (x as usize - 1)) * CHANNELS;
                let px = &mut self.data[i..i + CHANNELS];
                px[3] = saturate(f([px[0], px[1], px[2], px[3]], x, y));
            }
        }
    }

    /// Row `y` (1-based) as raw RGBA bytes.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if `y` is not in `[1, height]`.
    pub fn row(&self, y: u32) -> Result<&[u8]> {
        let start = self.index(1, y, 0)?;
        Ok(&self.data[start..start + self.width as usize * CHANNELS])
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn gradient(w: u32, h: u32) -> PixelBuffer {
        let mut data = Vec::with_capacity((w * h * 4) as usize);
        for y in 0..h {
            for x in 0..w {
                data.extend_from_slice(&[x as u8, y as u8, (x + y) as u8, 255]);
            }
        }
        PixelBuffer::new(data, w, h).unwrap()
    }

    #[test]
    fn test_new_checks_length() {
        assert!(PixelBuffer::new(vec![0; 16], 2, 2).is_ok());
        let err = PixelBuffer::new(vec![0; 15], 2, 2).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { .. }));
    }

    #[test]
    fn test_index_formula() {
        let buf = gradient(10, 7);
        for y in 1..=7 {
            for x in 1..=10 {
                for c in 0..4 {
                    let expected = (((y - 1) * 10 + (x - 1)) * 4 + c) as usize;
                    assert_eq!(buf.index(x, y, c as usize).unwrap(), expected);
                }
            }
        }
    }

    #[test]
    fn test_get_is_one_based() {
        let buf = gradient(4, 3);
        // Logical (1, 1) is the first stored pixel.
        assert_eq!(buf.rgb(1, 1).unwrap(), [0, 0, 0]);
        assert_eq!(buf.rgb(4, 3).unwrap(), [3, 2, 5]);
        assert_eq!(buf.get(2, 3, ChannelSelector::B).unwrap(), ChannelValue::Single(3));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut buf = gradient(4, 3);
        for (x, y) in [(0, 1), (1, 0), (5, 1), (1, 4), (u32::MAX, 1)] {
            let err = buf.get(x, y, ChannelSelector::R).unwrap_err();
            assert_eq!(err, Error::out_of_bounds(x, y, 4, 3));
            assert!(buf.set(x, y, ChannelSelector::R, &[1.0]).is_err());
        }
        // Column past the edge must not alias the next row.
        assert!(buf.rgb(5, 1).is_err());
    }

    #[test]
    fn test_set_saturates() {
        let mut buf = gradient(2, 2);
        buf.set_rgb(1, 2, [300.0, -5.0, f64::NAN]).unwrap();
        assert_eq!(buf.rgba(1, 2).unwrap(), [255, 0, 0, 255]);
        buf.set(2, 2, ChannelSelector::A, &[12.5]).unwrap();
        assert_eq!(buf.get(2, 2, ChannelSelector::A).unwrap(), ChannelValue::Single(12));
    }

    #[test]
    fn test_set_rounds_to_nearest() {
        let mut buf = PixelBuffer::filled(4, 4, [0; 4]);
        let mut v = 0.0;
        while v <= 255.0 {
            buf.set(3, 2, ChannelSelector::G, &[v]).unwrap();
            let stored = buf.rgba(3, 2).unwrap()[1];
            assert_abs_diff_eq!(f64::from(stored), v, epsilon = 0.5);
            v += 0.37;
        }
    }

    #[test]
    fn test_set_dimension_mismatch() {
        let mut buf = gradient(2, 2);
        let before = buf.clone();
        let err = buf
            .set(1, 1, ChannelSelector::Rgb, &[1.0, 2.0, 3.0, 4.0])
            .unwrap_err();
        assert_eq!(err, Error::dimension_mismatch(3, 4));
        assert!(buf.set(1, 1, ChannelSelector::Rgba, &[1.0, 2.0, 3.0]).is_err());
        assert!(buf.set(1, 1, ChannelSelector::G, &[]).is_err());
        assert_eq!(buf, before);
    }

    #[test]
    fn test_set_single_channel_only_touches_it() {
        let mut buf = PixelBuffer::filled(1, 1, [1, 2, 3, 4]);
        buf.set(1, 1, ChannelSelector::B, &[99.0]).unwrap();
        assert_eq!(buf.rgba(1, 1).unwrap(), [1, 2, 99, 4]);
    }

    #[test]
    fn test_for_each_pixel_order() {
        let buf = gradient(3, 2);
        let mut seen = Vec::new();
        buf.for_each_pixel(|rgb, x, y| seen.push((x, y, rgb)));
        let coords: Vec<_> = seen.iter().map(|&(x, y, _)| (x, y)).collect();
        assert_eq!(coords, vec![(1, 1), (1, 2), (2, 1), (2, 2), (3, 1), (3, 2)]);
        for (x, y, rgb) in seen {
            assert_eq!(rgb, buf.rgb(x, y).unwrap());
        }
    }

    #[test]
    fn test_map_alpha() {
        let mut buf = gradient(2, 2);
        buf.map_alpha(|_, _, _| 127.5);
        buf.for_each_pixel(|_, x, y| assert_eq!(buf.rgba(x, y).unwrap()[3], 128));
    }

    #[test]
    fn test_row() {
        let buf = gradient(3, 2);
        let row = buf.row(2).unwrap();
        assert_eq!(row.len(), 12);
        assert_eq!(&row[0..4], &[0, 1, 1, 255]);
        assert!(buf.row(3).is_err());
    }

    #[test]
    fn test_into_raw_round_trip() {
        let buf = gradient(3, 3);
        let raw = buf.clone().into_raw();
        assert_eq!(PixelBuffer::new(raw, 3, 3).unwrap(), buf);
    }
}

//! Rectangular regions for cropping.
//!
//! # Coordinate System
//!
//! Unlike [`crate::PixelBuffer`] accessors, a [`Rect`] stores a 0-based
//! *offset*: `x` is the number of columns to the left of the region, `y`
//! the number of rows above it. The region's top-left pixel is therefore
//! the logical coordinate `(x + 1, y + 1)`.
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │  Region  │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```
//!
//! ```rust
//! use imgfx_core::Rect;
//!
//! let image = Rect::from_size(10, 10);
//! let clipped = Rect::new(2, 2, 100, 100).intersect(&image).unwrap();
//! assert_eq!((clipped.width, clipped.height), (8, 8));
//! ```

/// A rectangle defined by a 0-based origin offset and a size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Columns to the left of the region
    pub x: u32,
    /// Rows above the region
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a whole `width x height` image.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// First column offset past the region (saturating).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// First row offset past the region (saturating).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Area in pixels.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Overlap of two rectangles, or `None` if they share no pixel.
    ///
    /// ```rust
    /// use imgfx_core::Rect;
    ///
    /// let a = Rect::new(0, 0, 100, 100);
    /// let b = Rect::new(50, 50, 100, 100);
    /// assert_eq!(a.intersect(&b), Some(Rect::new(50, 50, 50, 50)));
    /// assert_eq!(a.intersect(&Rect::new(100, 0, 5, 5)), None);
    /// ```
    #[inline]
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }
}

//! Editing session over an owned buffer.
//!
//! [`ImageFilter`] holds one [`PixelBuffer`] for the duration of an edit
//! and exposes every operation as a chaining method. In-place adjustments
//! return `&mut Self`; blur, crop and rotate swap in a new buffer and
//! return `OpsResult<&mut Self>`. Blur kernels are memoized in a
//! [`KernelCache`] owned by the session and dropped with it.
//!
//! # Example
//!
//! ```rust
//! use imgfx_core::PixelBuffer;
//! use imgfx_ops::{GrayMethod, ImageFilter};
//!
//! let src = PixelBuffer::filled(32, 24, [180, 120, 60, 255]);
//! let mut session = ImageFilter::new(src);
//! session
//!     .set_brightness(10.0)
//!     .set_contrast(20.0, true)
//!     .blur(2, 1.5)?
//!     .crop(4, 4, 16, 16)?
//!     .grayscale(GrayMethod::Weighted);
//!
//! let out = session.into_buffer();
//! assert_eq!(out.dimensions(), (16, 16));
//! # Ok::<(), imgfx_ops::OpsError>(())
//! ```

use crate::adjust::{self, GrayMethod, VignetteOptions};
use crate::filter::KernelCache;
use crate::transform::{self, Rotation};
use crate::OpsResult;
use imgfx_core::PixelBuffer;
use tracing::debug;

/// Chaining filter handle that owns the buffer being edited.
#[derive(Debug)]
pub struct ImageFilter {
    buffer: PixelBuffer,
    kernels: KernelCache,
}

impl ImageFilter {
    /// Starts a session on `buffer`.
    pub fn new(buffer: PixelBuffer) -> Self {
        debug!(width = buffer.width(), height = buffer.height(), "session opened");
        Self {
            buffer,
            kernels: KernelCache::new(),
        }
    }

    /// Current buffer.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Current buffer, mutably, for direct `get`/`set` access.
    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    /// Current `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    /// Kernels memoized by this session.
    pub fn kernels(&self) -> &KernelCache {
        &self.kernels
    }

    /// Ends the session and hands the buffer to the caller.
    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    /// See [`adjust::set_brightness`].
    pub fn set_brightness(&mut self, level: f64) -> &mut Self {
        adjust::set_brightness(&mut self.buffer, level);
        self
    }

    /// See [`adjust::set_contrast`].
    pub fn set_contrast(&mut self, level: f64, recompute_average: bool) -> &mut Self {
        adjust::set_contrast(&mut self.buffer, level, recompute_average);
        self
    }

    /// See [`adjust::vignette`].
    pub fn vignette(&mut self, options: VignetteOptions) -> OpsResult<&mut Self> {
        adjust::vignette(&mut self.buffer, options)?;
        Ok(self)
    }

    /// See [`adjust::grayscale`].
    pub fn grayscale(&mut self, method: GrayMethod) -> &mut Self {
        adjust::grayscale(&mut self.buffer, method);
        self
    }

    /// See [`adjust::reverse`].
    pub fn reverse(&mut self) -> &mut Self {
        adjust::reverse(&mut self.buffer);
        self
    }

    /// See [`adjust::mix_darken`].
    pub fn mix_darken(&mut self, overlay: [u8; 3]) -> &mut Self {
        adjust::mix_darken(&mut self.buffer, overlay);
        self
    }

    /// See [`adjust::mix_brown`].
    pub fn mix_brown(&mut self) -> &mut Self {
        adjust::mix_brown(&mut self.buffer);
        self
    }

    /// See [`adjust::set_opacity`].
    pub fn set_opacity(&mut self, level: f64) -> &mut Self {
        adjust::set_opacity(&mut self.buffer, level);
        self
    }

    /// Gaussian blur with a cached kernel. Runs row-parallel when the
    /// `parallel` feature is enabled; the output is the same either way.
    pub fn blur(&mut self, radius: i32, sigma: f64) -> OpsResult<&mut Self> {
        let kernel = self.kernels.get(radius, sigma)?;
        #[cfg(feature = "parallel")]
        let out = crate::parallel::blur_with_kernel(&self.buffer, kernel)?;
        #[cfg(not(feature = "parallel"))]
        let out = crate::filter::blur_with_kernel(&self.buffer, kernel)?;
        self.buffer = out;
        Ok(self)
    }

    /// See [`transform::crop`].
    pub fn crop(&mut self, x: u32, y: u32, width: u32, height: u32) -> OpsResult<&mut Self> {
        self.buffer = transform::crop(&self.buffer, x, y, width, height)?;
        Ok(self)
    }

    /// See [`transform::rotate`].
    pub fn rotate(&mut self, rotation: Rotation) -> OpsResult<&mut Self> {
        self.buffer = transform::rotate(&self.buffer, rotation)?;
        Ok(self)
    }
}

impl From<PixelBuffer> for ImageFilter {
    fn from(buffer: PixelBuffer) -> Self {
        Self::new(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter;

    fn sample() -> PixelBuffer {
        let data = (0..12 * 8 * 4).map(|i| (i * 7 % 251) as u8).collect();
        PixelBuffer::new(data, 12, 8).unwrap()
    }

    #[test]
    fn test_blur_matches_free_function() {
        let src = sample();
        let mut session = ImageFilter::new(src.clone());
        session.blur(2, 1.5).unwrap();
        assert_eq!(session.buffer(), &filter::blur(&src, 2, 1.5).unwrap());
    }

    #[test]
    fn test_blur_reuses_kernel() {
        let mut session = ImageFilter::new(sample());
        session.blur(1, 1.5).unwrap().blur(1, 1.5).unwrap();
        assert_eq!(session.kernels().len(), 1);
        assert_eq!(session.kernels().hits(), 1);
    }

    #[test]
    fn test_failed_op_keeps_buffer() {
        let src = sample();
        let mut session = ImageFilter::from(src.clone());
        assert!(session.blur(-1, 1.5).is_err());
        assert!(session.crop(50, 0, 2, 2).is_err());
        assert_eq!(session.buffer(), &src);
    }

    #[test]
    fn test_chain_replaces_buffer() {
        let mut session = ImageFilter::new(sample());
        session
            .reverse()
            .crop(2, 1, 6, 4)
            .unwrap()
            .rotate(Rotation::Cw90)
            .unwrap()
            .set_opacity(1.0);
        assert_eq!(session.dimensions(), (4, 6));
        let out = session.into_buffer();
        out.for_each_pixel(|_, x, y| assert_eq!(out.rgba(x, y).unwrap()[3], 255));
    }

    #[test]
    fn test_reverse_twice() {
        let src = sample();
        let mut session = ImageFilter::new(src.clone());
        session.reverse().reverse();
        assert_eq!(session.into_buffer(), src);
    }

    #[test]
    fn test_direct_access() {
        let mut session = ImageFilter::new(PixelBuffer::filled(2, 2, [0; 4]));
        session.buffer_mut().set_rgb(2, 2, [9.0, 8.0, 7.0]).unwrap();
        session.mix_darken([5, 255, 255]);
        assert_eq!(session.buffer().rgb(2, 2).unwrap(), [5, 8, 7]);
    }
}

//! # imgfx-ops
//!
//! Raster filters over [`imgfx_core::PixelBuffer`].
//!
//! # Modules
//!
//! - [`filter`] - Gaussian blur (naive, separable) and kernel caching
//! - [`parallel`] - Row-parallel blur (feature `parallel`, on by default)
//! - [`adjust`] - Brightness, contrast, vignette, grayscale, invert, mixing, opacity
//! - [`transform`] - Crop and quarter-turn rotation
//! - [`session`] - [`ImageFilter`], a chaining handle that owns the buffer
//!
//! # Example
//!
//! ```rust
//! use imgfx_core::PixelBuffer;
//! use imgfx_ops::{adjust, filter, transform};
//!
//! let mut image = PixelBuffer::filled(40, 30, [200, 150, 100, 255]);
//! adjust::set_contrast(&mut image, 25.0, false);
//! adjust::vignette(&mut image, adjust::VignetteOptions::default())?;
//!
//! let soft = filter::blur(&image, 2, filter::DEFAULT_SIGMA)?;
//! let thumb = transform::crop(&soft, 10, 5, 20, 20)?;
//! assert_eq!(thumb.dimensions(), (20, 20));
//! # Ok::<(), imgfx_ops::OpsError>(())
//! ```
//!
//! # Common Operations
//!
//! ## Blur with a cached kernel
//!
//! ```rust,ignore
//! use imgfx_ops::filter::{blur_with_kernel, KernelCache};
//!
//! let mut cache = KernelCache::new();
//! for frame in frames {
//!     let out = blur_with_kernel(&frame, cache.get(3, 1.5)?)?;
//! }
//! ```
//!
//! ## Session
//!
//! ```rust,ignore
//! use imgfx_ops::{ImageFilter, Rotation};
//!
//! let out = ImageFilter::new(image)
//!     .mix_brown()
//!     .rotate(Rotation::Cw90)?
//!     .buffer()
//!     .clone();
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod adjust;
pub mod filter;
pub mod session;
pub mod transform;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use adjust::{GrayMethod, VignetteOptions, SEPIA_OVERLAY};
pub use error::{OpsError, OpsResult};
pub use filter::{GaussianKernel, KernelCache, DEFAULT_SIGMA};
pub use session::ImageFilter;
pub use transform::Rotation;

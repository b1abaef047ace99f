//! Row-parallel Gaussian blur using Rayon.
//!
//! The destination is split into disjoint rows with `par_chunks_mut`; every
//! worker reads the shared, unmodified source. Each output pixel runs the
//! exact arithmetic of [`crate::filter::blur`] in the same order, so the
//! result is byte-identical to the single-threaded version.
//!
//! Use a scoped `rayon::ThreadPool` (`pool.install(..)`) to bound the
//! number of workers.
//!
//! # Example
//!
//! ```rust
//! use imgfx_core::PixelBuffer;
//! use imgfx_ops::{filter, parallel};
//!
//! let src = PixelBuffer::filled(64, 32, [12, 34, 56, 255]);
//! let a = parallel::blur(&src, 3, 1.5).unwrap();
//! let b = filter::blur(&src, 3, 1.5).unwrap();
//! assert_eq!(a, b);
//! ```

use crate::filter::{blur_row, GaussianKernel};
use crate::OpsResult;
use imgfx_core::{PixelBuffer, CHANNELS};
use rayon::prelude::*;
use tracing::trace;

/// Parallel Gaussian blur into a new buffer.
///
/// Same contract and errors as [`crate::filter::blur`].
pub fn blur(src: &PixelBuffer, radius: i32, sigma: f64) -> OpsResult<PixelBuffer> {
    let kernel = GaussianKernel::new(radius, sigma)?;
    blur_with_kernel(src, &kernel)
}

/// Parallel Gaussian blur with a prebuilt kernel.
pub fn blur_with_kernel(src: &PixelBuffer, kernel: &GaussianKernel) -> OpsResult<PixelBuffer> {
    trace!(
        width = src.width(),
        height = src.height(),
        radius = kernel.radius(),
        threads = rayon::current_num_threads(),
        "parallel::blur"
    );
    if src.is_empty() {
        return Ok(src.clone());
    }

    let (w, h) = src.dimensions();
    let mut dst = src.as_raw().to_vec();
    dst.par_chunks_mut(w as usize * CHANNELS)
        .enumerate()
        .try_for_each(|(row, line)| blur_row(src, kernel, row as u32 + 1, line))?;

    Ok(PixelBuffer::new(dst, w, h)?)
}

//! Gaussian blur by direct 2D convolution.
//!
//! # Kernel
//!
//! [`GaussianKernel`] exploits radial symmetry: the weight of an offset
//! `(dx, dy)` only depends on `dx² + dy²`, so the kernel is a table indexed
//! by squared distance rather than a `(2r+1)²` grid. Several offsets share
//! one entry. Weights are normalized so the full square window sums to 1.
//!
//! # Edges
//!
//! Samples that fall outside the image are reflected around the pixel
//! being filtered, not around the image edge: with center `x` and sample
//! `s`, `s <= 0` reads `x + (x - s)` and `s > width` reads `x - (s - x)`.
//! The two policies produce visibly different edge artifacts. When the
//! radius exceeds the image and the mirrored coordinate is still outside,
//! it is clamped into range; the weight stays the one for the window
//! offset, so every output pixel still sees a total weight of 1.
//!
//! # Variants
//!
//! - [`blur`] - reference O(w·h·r²) convolution
//! - [`blur_with_kernel`] - same, with a prebuilt (e.g. cached) kernel
//! - [`blur_separable`] - two 1D passes, O(w·h·r), within ±1 of [`blur`]
//! - [`crate::parallel::blur`] - row-parallel, byte-identical to [`blur`]
//!
//! Only RGB is convolved; alpha is copied through.
//!
//! # Example
//!
//! ```rust
//! use imgfx_core::PixelBuffer;
//! use imgfx_ops::filter::{blur, DEFAULT_SIGMA};
//!
//! let src = PixelBuffer::filled(16, 16, [200, 100, 50, 255]);
//! let out = blur(&src, 2, DEFAULT_SIGMA).unwrap();
//! assert_eq!(out, src); // uniform input stays uniform
//! ```

use crate::{OpsError, OpsResult};
use imgfx_core::{saturate, PixelBuffer, CHANNELS};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::f64::consts::PI;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Default standard deviation for callers without a preference.
///
/// Every blur honors the sigma it is given; nothing substitutes this value.
pub const DEFAULT_SIGMA: f64 = 1.5;

/// Unnormalized 2D Gaussian `1/(2πσ²) · exp(-(dx²+dy²)/(2σ²))`.
#[inline]
pub fn gaussian(dx: i64, dy: i64, sigma: f64) -> f64 {
    let s2 = sigma * sigma;
    let d2 = (dx * dx + dy * dy) as f64;
    1.0 / (2.0 * PI * s2) * (-d2 / (2.0 * s2)).exp()
}

fn check_params(radius: i32, sigma: f64) -> OpsResult<()> {
    if radius < 0 || !sigma.is_finite() || sigma <= 0.0 {
        return Err(OpsError::InvalidKernel { radius, sigma });
    }
    Ok(())
}

/// Offsets farther than this from the center have weight exactly 0.
///
/// Past `sqrt(1492)·σ` the exponent drops below -746 and `exp` underflows
/// to 0, so the window can be walked up to the support instead of the
/// full radius without changing a single sum.
fn support(radius: i32, sigma: f64) -> u32 {
    let cutoff = (1492.0f64.sqrt() * sigma).ceil() + 1.0;
    if cutoff >= radius as f64 {
        radius as u32
    } else {
        cutoff as u32
    }
}

/// Zeroed weight table, or `InvalidKernel` if it can't be allocated.
fn zeroed_weights(len: usize, radius: i32, sigma: f64) -> OpsResult<Vec<f64>> {
    let mut weights = Vec::new();
    weights
        .try_reserve_exact(len)
        .map_err(|_| OpsError::InvalidKernel { radius, sigma })?;
    weights.resize(len, 0.0);
    Ok(weights)
}

/// Normalized Gaussian weights keyed by squared offset distance.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel {
    radius: u32,
    /// Largest offset per axis with a nonzero weight, at most `radius`.
    support: u32,
    sigma: f64,
    /// `weights[dx² + dy²]`; indices no offset maps to stay 0.
    weights: Vec<f64>,
}

impl GaussianKernel {
    /// Builds the kernel for a `(2r+1)²` window.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidKernel`] if `radius < 0`, `sigma` isn't a finite
    /// positive number, sigma is so small the weights degenerate, or the
    /// weight table can't be allocated.
    ///
    /// Only offsets with a nonzero weight are stored, so a huge radius with
    /// a small sigma stays cheap.
    ///
    /// ```rust
    /// use imgfx_ops::filter::GaussianKernel;
    ///
    /// let k = GaussianKernel::new(2, 1.0).unwrap();
    /// assert!((k.window_sum() - 1.0).abs() < 1e-9);
    /// assert!(k.weight(0) > k.weight(1));
    /// assert!(GaussianKernel::new(-1, 1.0).is_err());
    /// ```
    pub fn new(radius: i32, sigma: f64) -> OpsResult<Self> {
        check_params(radius, sigma)?;
        let support = support(radius, sigma);
        let r = support as usize;
        let len = r
            .checked_mul(r)
            .and_then(|v| v.checked_mul(2))
            .and_then(|v| v.checked_add(1))
            .ok_or(OpsError::InvalidKernel { radius, sigma })?;

        let mut weights = zeroed_weights(len, radius, sigma)?;
        for dx in 0..=r {
            for dy in 0..=dx {
                weights[dx * dx + dy * dy] = gaussian(dx as i64, dy as i64, sigma);
            }
        }

        let ri = support as i64;
        let mut sum = 0.0;
        for x in -ri..=ri {
            for y in -ri..=ri {
                sum += weights[(x * x + y * y) as usize];
            }
        }
        if !sum.is_finite() || sum <= 0.0 {
            return Err(OpsError::InvalidKernel { radius, sigma });
        }
        for w in &mut weights {
            *w /= sum;
        }

        debug!(radius, support, sigma, entries = len, "built gaussian kernel");
        Ok(Self {
            radius: radius as u32,
            support,
            sigma,
            weights,
        })
    }

    /// Window radius.
    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Largest offset per axis that carries weight. Never exceeds
    /// [`radius`](Self::radius).
    #[inline]
    pub fn support(&self) -> u32 {
        self.support
    }

    /// Standard deviation the kernel was built with.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Normalized weight for an offset with `dx² + dy² == dist_sq`.
    #[inline]
    pub fn weight(&self, dist_sq: usize) -> f64 {
        self.weights.get(dist_sq).copied().unwrap_or(0.0)
    }

    /// Weight table indexed by squared distance.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Sum of the weights over every offset in the window. 1 up to rounding.
    pub fn window_sum(&self) -> f64 {
        let r = self.support as i64;
        let mut sum = 0.0;
        for x in -r..=r {
            for y in -r..=r {
                sum += self.weight((x * x + y * y) as usize);
            }
        }
        sum
    }
}

/// Caller-owned memo of kernels keyed by `(radius, sigma)`.
///
/// There is no process-wide kernel state; a cache lives as long as its
/// owner, and [`clear`](Self::clear) drops every entry.
///
/// ```rust
/// use imgfx_ops::filter::KernelCache;
///
/// let mut cache = KernelCache::new();
/// cache.get(3, 1.5).unwrap();
/// cache.get(3, 1.5).unwrap();
/// assert_eq!((cache.len(), cache.hits(), cache.misses()), (1, 1, 1));
/// ```
#[derive(Debug, Default)]
pub struct KernelCache {
    kernels: HashMap<(i32, u64), GaussianKernel>,
    hits: u64,
    misses: u64,
}

impl KernelCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the kernel for `(radius, sigma)`, building it on first use.
    pub fn get(&mut self, radius: i32, sigma: f64) -> OpsResult<&GaussianKernel> {
        match self.kernels.entry((radius, sigma.to_bits())) {
            Entry::Occupied(e) => {
                self.hits += 1;
                debug!(radius, sigma, "kernel cache hit");
                Ok(e.into_mut())
            }
            Entry::Vacant(e) => {
                let kernel = GaussianKernel::new(radius, sigma)?;
                self.misses += 1;
                Ok(e.insert(kernel))
            }
        }
    }

    /// Number of cached kernels.
    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }

    /// Lookups served from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to build a kernel.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drops every cached kernel.
    pub fn clear(&mut self) {
        self.kernels.clear();
    }
}

/// Maps a sample coordinate back into `[1, extent]` by mirroring it around
/// `center`.
///
/// ```rust
/// use imgfx_ops::filter::reflect;
///
/// assert_eq!(reflect(1, 0, 3), 2);   // left of the edge
/// assert_eq!(reflect(3, 4, 3), 2);   // right of the edge
/// assert_eq!(reflect(2, 3, 3), 3);   // inside, untouched
/// assert_eq!(reflect(1, -4, 3), 3);  // mirrored to 7, clamped
/// ```
#[inline]
pub fn reflect(center: i64, sample: i64, extent: i64) -> i64 {
    let mut actual = if sample > 0 {
        sample
    } else {
        center + (center - sample)
    };
    if sample > extent {
        actual = center - (sample - center);
    }
    actual.clamp(1, extent)
}

/// Weighted RGB sum for the window centered on logical `(x, y)`.
///
/// Offsets are visited sample-x outer, sample-y inner. Offsets past the
/// kernel's support are skipped; their weight is 0.
#[inline]
pub(crate) fn convolve_at(
    src: &PixelBuffer,
    kernel: &GaussianKernel,
    x: u32,
    y: u32,
) -> OpsResult<[f64; 3]> {
    let r = kernel.support as i64;
    let (w, h) = (src.width() as i64, src.height() as i64);
    let (cx, cy) = (x as i64, y as i64);
    let mut acc = [0.0f64; 3];

    for sx in cx - r..=cx + r {
        let ax = reflect(cx, sx, w);
        let ox = sx - cx;
        for sy in cy - r..=cy + r {
            let ay = reflect(cy, sy, h);
            let oy = sy - cy;
            let k = kernel.weight((ox * ox + oy * oy) as usize);
            let px = src.rgb(ax as u32, ay as u32)?;
            acc[0] += px[0] as f64 * k;
            acc[1] += px[1] as f64 * k;
            acc[2] += px[2] as f64 * k;
        }
    }

    Ok(acc)
}

/// Filters row `y` of `src` into `line` (that row's RGBA bytes in the
/// destination). Alpha bytes in `line` are left as they are.
pub(crate) fn blur_row(
    src: &PixelBuffer,
    kernel: &GaussianKernel,
    y: u32,
    line: &mut [u8],
) -> OpsResult<()> {
    for x in 1..=src.width() {
        let acc = convolve_at(src, kernel, x, y)?;
        let i = (x as usize - 1) * CHANNELS;
        line[i] = saturate(acc[0]);
        line[i + 1] = saturate(acc[1]);
        line[i + 2] = saturate(acc[2]);
    }
    Ok(())
}

/// Gaussian blur into a new buffer.
///
/// # Arguments
///
/// * `src` - Source buffer, left unmodified
/// * `radius` - Window half-size; 0 is the identity
/// * `sigma` - Standard deviation, honored as given
///
/// # Errors
///
/// [`OpsError::InvalidKernel`] for a negative radius or non-positive sigma.
///
/// # Example
///
/// ```rust
/// use imgfx_core::PixelBuffer;
/// use imgfx_ops::filter::blur;
///
/// let src = PixelBuffer::filled(8, 8, [10, 20, 30, 40]);
/// assert_eq!(blur(&src, 0, 2.0).unwrap(), src);
/// assert!(blur(&src, -1, 2.0).is_err());
/// ```
pub fn blur(src: &PixelBuffer, radius: i32, sigma: f64) -> OpsResult<PixelBuffer> {
    trace!(width = src.width(), height = src.height(), radius, sigma, "blur");
    let kernel = GaussianKernel::new(radius, sigma)?;
    blur_with_kernel(src, &kernel)
}

/// Gaussian blur with a prebuilt kernel.
pub fn blur_with_kernel(src: &PixelBuffer, kernel: &GaussianKernel) -> OpsResult<PixelBuffer> {
    trace!(width = src.width(), height = src.height(), radius = kernel.radius, "blur_with_kernel");
    if src.is_empty() {
        return Ok(src.clone());
    }

    let (w, h) = src.dimensions();
    let mut dst = src.as_raw().to_vec();
    for (row, line) in dst.chunks_mut(w as usize * CHANNELS).enumerate() {
        blur_row(src, kernel, row as u32 + 1, line)?;
    }

    Ok(PixelBuffer::new(dst, w, h)?)
}

/// Gaussian blur as a horizontal then a vertical 1D pass.
///
/// Uses the same reflection rule per axis. The 2D Gaussian factors exactly,
/// so the result differs from [`blur`] only by floating-point rounding, at
/// most one unit per channel.
///
/// ```rust
/// use imgfx_core::PixelBuffer;
/// use imgfx_ops::filter::blur_separable;
///
/// let src = PixelBuffer::filled(8, 8, [90, 60, 30, 255]);
/// assert_eq!(blur_separable(&src, 3, 1.5).unwrap(), src);
/// ```
pub fn blur_separable(src: &PixelBuffer, radius: i32, sigma: f64) -> OpsResult<PixelBuffer> {
    trace!(width = src.width(), height = src.height(), radius, sigma, "blur_separable");
    check_params(radius, sigma)?;
    if src.is_empty() {
        return Ok(src.clone());
    }

    let r = support(radius, sigma) as i64;
    let s2 = 2.0 * sigma * sigma;
    let mut k1 = zeroed_weights(r as usize + 1, radius, sigma)?;
    for (d, k) in k1.iter_mut().enumerate() {
        *k = (-((d * d) as f64) / s2).exp();
    }
    let sum = k1[0] + 2.0 * k1[1..].iter().sum::<f64>();
    if !sum.is_finite() || sum <= 0.0 {
        return Err(OpsError::InvalidKernel { radius, sigma });
    }
    for k in &mut k1 {
        *k /= sum;
    }

    let (w, h) = src.dimensions();
    let (wi, hi) = (w as i64, h as i64);
    let at = |x: i64, y: i64| ((y - 1) * wi + (x - 1)) as usize * 3;

    // Horizontal pass, unrounded.
    let mut tmp = vec![0.0f64; w as usize * h as usize * 3];
    for y in 1..=hi {
        for x in 1..=wi {
            let mut acc = [0.0f64; 3];
            for ox in -r..=r {
                let ax = reflect(x, x + ox, wi);
                let px = src.rgb(ax as u32, y as u32)?;
                let k = k1[ox.unsigned_abs() as usize];
                acc[0] += px[0] as f64 * k;
                acc[1] += px[1] as f64 * k;
                acc[2] += px[2] as f64 * k;
            }
            tmp[at(x, y)..at(x, y) + 3].copy_from_slice(&acc);
        }
    }

    // Vertical pass.
    let mut dst = src.as_raw().to_vec();
    for y in 1..=hi {
        for x in 1..=wi {
            let mut acc = [0.0f64; 3];
            for oy in -r..=r {
                let ay = reflect(y, y + oy, hi);
                let k = k1[oy.unsigned_abs() as usize];
                let t = &tmp[at(x, ay)..at(x, ay) + 3];
                acc[0] += t[0] * k;
                acc[1] += t[1] * k;
                acc[2] += t[2] * k;
            }
            let i = at(x, y) / 3 * CHANNELS;
            dst[i] = saturate(acc[0]);
            dst[i + 1] = saturate(acc[1]);
            dst[i + 2] = saturate(acc[2]);
        }
    }

    Ok(PixelBuffer::new(dst, w, h)?)
}

//! Shared fixtures for the imgfx benchmarks.

use imgfx_core::{PixelBuffer, Result};

/// Deterministic noisy RGBA8 buffer.
pub fn test_image(width: u32, height: u32) -> Result<PixelBuffer> {
    let data = (0..width as usize * height as usize * 4)
        .map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8)
        .collect();
    PixelBuffer::new(data, width, height)
}

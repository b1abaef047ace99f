//! Buffer info command.
//!
//! Prints dimensions, file size and per-channel statistics.

use crate::InfoArgs;
use anyhow::{Context, Result};
use imgfx_core::PixelBuffer;
use imgfx_ops::adjust::mean_luma;
use std::fs;
use tracing::trace;

/// Per-channel min, max and mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStats {
    pub min: u8,
    pub max: u8,
    pub mean: f64,
}

/// Collects stats for R, G, B and A.
pub fn channel_stats(buffer: &PixelBuffer) -> [ChannelStats; 4] {
    let mut min = [u8::MAX; 4];
    let mut max = [0u8; 4];
    let mut sum = [0u64; 4];
    for px in buffer.as_raw().chunks_exact(4) {
        for c in 0..4 {
            min[c] = min[c].min(px[c]);
            max[c] = max[c].max(px[c]);
            sum[c] += px[c] as u64;
        }
    }
    let n = buffer.pixel_count().max(1) as f64;
    std::array::from_fn(|c| ChannelStats {
        min: if buffer.is_empty() { 0 } else { min[c] },
        max: max[c],
        mean: sum[c] as f64 / n,
    })
}

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.raw.input.display(), "info::run");
    let path = &args.raw.input;
    let file_size = fs::metadata(path)
        .with_context(|| format!("Failed to stat: {}", path.display()))?
        .len();
    let buffer = super::load_input(&args.raw)?;

    println!("{}", path.display());
    println!("  Resolution: {}x{}", buffer.width(), buffer.height());
    println!("  Pixels:     {}", buffer.pixel_count());
    println!("  File size:  {}", super::format_size(file_size));
    if let Some(luma) = mean_luma(&buffer) {
        println!("  Mean luma:  {:.2}", luma);
    }

    if verbose > 0 {
        println!("  Channels:");
        for (name, s) in ["R", "G", "B", "A"].iter().zip(channel_stats(&buffer)) {
            println!("    {}: min {:3}  max {:3}  mean {:.2}", name, s.min, s.max, s.mean);
        }
    }

    Ok(())
}

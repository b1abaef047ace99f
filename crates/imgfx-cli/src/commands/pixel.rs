//! Pixel read command.
//!
//! Prints the channel(s) of one pixel, addressed with 1-based coordinates.

use crate::PixelArgs;
use anyhow::Result;
use imgfx_core::{ChannelSelector, PixelBuffer};
use tracing::trace;

/// Formats the selected channels of `(x, y)` as `name: v v v`.
pub fn read(buffer: &PixelBuffer, x: u32, y: u32, channels: ChannelSelector) -> Result<String> {
    let value = buffer.get(x, y, channels)?;
    let values: Vec<String> = value.as_slice().iter().map(u8::to_string).collect();
    Ok(format!("{}: {}", channels, values.join(" ")))
}

pub fn run(args: PixelArgs, verbose: u8) -> Result<()> {
    trace!(x = args.x, y = args.y, channels = %args.channels, "pixel::run");
    let buffer = super::load_input(&args.raw)?;

    if verbose > 0 {
        println!("Pixel ({}, {}) of {}x{}", args.x, args.y, buffer.width(), buffer.height());
    }
    println!("{}", read(&buffer, args.x, args.y, args.channels)?);

    Ok(())
}

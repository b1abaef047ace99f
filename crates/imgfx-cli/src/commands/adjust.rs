//! Per-pixel adjustment commands.
//!
//! Each loads the input, mutates it in place and writes it back out.

use crate::{ContrastArgs, GrayArgs, IoArgs, LevelArgs, MixArgs, VignetteArgs};
use anyhow::Result;
use imgfx_core::PixelBuffer;
use imgfx_ops::adjust::{self, VignetteOptions};
use tracing::info;

/// Load, apply `op`, save.
fn apply<F>(io: &IoArgs, verbose: u8, name: &str, op: F) -> Result<()>
where
    F: FnOnce(&mut PixelBuffer) -> Result<()>,
{
    let mut image = super::load_input(&io.raw)?;
    info!(op = name, w = image.width(), h = image.height(), "Applying adjustment");
    if verbose > 0 {
        println!("Applying {} to {}", name, io.raw.input.display());
    }

    op(&mut image)?;
    super::save_raw(&io.output, &image)?;

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}

pub fn brightness(args: LevelArgs, verbose: u8) -> Result<()> {
    apply(&args.io, verbose, "brightness", |img| {
        adjust::set_brightness(img, args.level);
        Ok(())
    })
}

pub fn contrast(args: ContrastArgs, verbose: u8) -> Result<()> {
    apply(&args.io, verbose, "contrast", |img| {
        adjust::set_contrast(img, args.level, args.average);
        Ok(())
    })
}

pub fn vignette(args: VignetteArgs, verbose: u8) -> Result<()> {
    let options = VignetteOptions {
        max_level: args.max_level,
        radius: args.radius,
    };
    apply(&args.io, verbose, "vignette", |img| {
        adjust::vignette(img, options)?;
        Ok(())
    })
}

pub fn gray(args: GrayArgs, verbose: u8) -> Result<()> {
    apply(&args.io, verbose, "grayscale", |img| {
        adjust::grayscale(img, args.method);
        Ok(())
    })
}

pub fn invert(args: IoArgs, verbose: u8) -> Result<()> {
    apply(&args, verbose, "invert", |img| {
        adjust::reverse(img);
        Ok(())
    })
}

pub fn mix(args: MixArgs, verbose: u8) -> Result<()> {
    let overlay = super::parse_rgb(&args.color)?;
    apply(&args.io, verbose, "mix", |img| {
        adjust::mix_darken(img, overlay);
        Ok(())
    })
}

pub fn sepia(args: IoArgs, verbose: u8) -> Result<()> {
    apply(&args, verbose, "sepia", |img| {
        adjust::mix_brown(img);
        Ok(())
    })
}

pub fn opacity(args: LevelArgs, verbose: u8) -> Result<()> {
    apply(&args.io, verbose, "opacity", |img| {
        adjust::set_opacity(img, args.level);
        Ok(())
    })
}

//! Crop command

use crate::CropArgs;
use anyhow::Result;
use imgfx_ops::transform::crop;
use tracing::trace;

pub fn run(args: CropArgs, verbose: u8) -> Result<()> {
    trace!(x = args.x, y = args.y, w = args.crop_width, h = args.crop_height, "crop::run");
    let image = super::load_input(&args.io.raw)?;

    if verbose > 0 {
        println!(
            "Cropping {}x{} @ ({},{}) from {}x{}",
            args.crop_width,
            args.crop_height,
            args.x,
            args.y,
            image.width(),
            image.height()
        );
    }

    let cropped = crop(&image, args.x, args.y, args.crop_width, args.crop_height)?;
    super::save_raw(&args.io.output, &cropped)?;

    if verbose > 0 {
        println!("Done. Output is {}x{}.", cropped.width(), cropped.height());
    }

    Ok(())
}

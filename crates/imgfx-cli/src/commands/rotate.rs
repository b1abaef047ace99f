//! Rotate command - quarter turns only

use crate::RotateArgs;
use anyhow::Result;
use imgfx_ops::transform::rotate;

pub fn run(args: RotateArgs, verbose: u8) -> Result<()> {
    if verbose > 0 {
        println!("Loading: {}", args.io.raw.input.display());
    }

    let input = super::load_input(&args.io.raw)?;

    if verbose > 0 {
        println!("Size: {}x{}", input.width(), input.height());
        println!("Rotation: {}° clockwise", args.angle);
    }

    let result = rotate(&input, args.angle)?;

    if verbose > 0 {
        println!("New size: {}x{}", result.width(), result.height());
    }

    super::save_raw(&args.io.output, &result)?;

    if verbose > 0 {
        println!("Saved: {}", args.io.output.display());
    }

    Ok(())
}

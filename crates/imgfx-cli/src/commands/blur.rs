//! Blur command
//!
//! Gaussian blur, row-parallel by default or two-pass with `--separable`.

use crate::BlurArgs;
use anyhow::Result;
use imgfx_ops::{filter, parallel};
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: BlurArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.io.raw.input.display(), radius = args.radius, sigma = args.sigma, "blur::run");

    let image = super::load_input(&args.io.raw)?;
    info!(
        radius = args.radius,
        sigma = args.sigma,
        separable = args.separable,
        w = image.width(),
        h = image.height(),
        "Applying blur"
    );

    if verbose > 0 {
        println!(
            "Applying gaussian blur (radius={}, sigma={}) to {}",
            args.radius,
            args.sigma,
            args.io.raw.input.display()
        );
    }

    let blurred = if args.separable {
        filter::blur_separable(&image, args.radius, args.sigma)?
    } else {
        parallel::blur(&image, args.radius, args.sigma)?
    };

    super::save_raw(&args.io.output, &blurred)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}

//! imgfx - raster filter CLI
//!
//! Applies the imgfx filters to raw RGBA8 files (4 bytes per pixel, rows
//! top to bottom, no header). Raw files carry no dimensions, so every
//! command takes `-W`/`-H`.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use imgfx_core::ChannelSelector;
use imgfx_ops::{GrayMethod, Rotation, DEFAULT_SIGMA};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "imgfx")]
#[command(author, version, about = "In-place raster image filters on raw RGBA8 buffers")]
#[command(long_about = "
Applies blur, tonal adjustments and geometric transforms to raw RGBA8
pixel buffers (4 bytes per pixel, row-major, no header).

Examples:
  imgfx info photo.rgba -W 640 -H 480
  imgfx pixel photo.rgba -W 640 -H 480 -x 1 -y 1 -c rgb
  imgfx blur photo.rgba -W 640 -H 480 -o soft.rgba -r 3 -s 1.5
  imgfx contrast photo.rgba -W 640 -H 480 -o out.rgba -l 30 --average
  imgfx vignette photo.rgba -W 640 -H 480 -o out.rgba -l -60
  imgfx gray photo.rgba -W 640 -H 480 -o out.rgba -m average
  imgfx crop photo.rgba -W 640 -H 480 -o out.rgba -x 10 -y 10 --crop-width 320 --crop-height 240
  imgfx -vv rotate photo.rgba -W 640 -H 480 -o out.rgba -a 90
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace; RUST_LOG overrides)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Display buffer statistics
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Print one pixel's channel values
    #[command(visible_alias = "px")]
    Pixel(PixelArgs),

    /// Gaussian blur
    Blur(BlurArgs),

    /// Scale HSL lightness
    Brightness(LevelArgs),

    /// Linear contrast stretch around a pivot
    Contrast(ContrastArgs),

    /// Darken or lighten toward the corners
    Vignette(VignetteArgs),

    /// Convert to grayscale
    Gray(GrayArgs),

    /// Negative (255 - value)
    #[command(visible_alias = "reverse")]
    Invert(IoArgs),

    /// Darken-only blend with a solid color
    Mix(MixArgs),

    /// Darken-only blend with a brown overlay (aged photo)
    Sepia(IoArgs),

    /// Set alpha for every pixel
    Opacity(LevelArgs),

    /// Extract a sub-rectangle
    Crop(CropArgs),

    /// Rotate by a quarter turn
    Rotate(RotateArgs),
}

/// Raw input buffer and its dimensions.
#[derive(Args)]
struct RawInput {
    /// Input raw RGBA8 file
    input: PathBuf,

    /// Image width in pixels
    #[arg(short = 'W', long)]
    width: u32,

    /// Image height in pixels
    #[arg(short = 'H', long)]
    height: u32,
}

#[derive(Args)]
struct InfoArgs {
    #[command(flatten)]
    raw: RawInput,
}

#[derive(Args)]
struct PixelArgs {
    #[command(flatten)]
    raw: RawInput,

    /// Column, 1-based
    #[arg(short)]
    x: u32,

    /// Row, 1-based
    #[arg(short)]
    y: u32,

    /// Channels to print: r, g, b, a, rgb, rgba
    #[arg(short, long, default_value = "rgba")]
    channels: ChannelSelector,
}

/// Input and output for commands without options.
#[derive(Args)]
struct IoArgs {
    #[command(flatten)]
    raw: RawInput,

    /// Output raw RGBA8 file
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct BlurArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Blur radius in pixels
    #[arg(short, long, default_value = "1")]
    radius: i32,

    /// Gaussian standard deviation
    #[arg(short, long, default_value_t = DEFAULT_SIGMA)]
    sigma: f64,

    /// Use the two-pass separable blur (faster, within 1 level of the exact result)
    #[arg(long)]
    separable: bool,
}

/// Commands driven by a single level.
#[derive(Args)]
struct LevelArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Level: [-100, 100] for brightness, [0, 1] for opacity
    #[arg(short, long, allow_hyphen_values = true)]
    level: f64,
}

#[derive(Args)]
struct ContrastArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Contrast level in [-100, 100]
    #[arg(short, long, allow_hyphen_values = true)]
    level: f64,

    /// Pivot around the image's mean luma instead of 128
    #[arg(long)]
    average: bool,
}

#[derive(Args)]
struct VignetteArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Brightness level at the farthest corner, [-100, 100]
    #[arg(short = 'l', long, default_value = "-40", allow_hyphen_values = true)]
    max_level: f64,

    /// Untouched inner radius in pixels (default: 0.3 * max(width, height))
    #[arg(short, long)]
    radius: Option<f64>,
}

#[derive(Args)]
struct GrayArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Method: average, max, weighted
    #[arg(short, long, default_value = "weighted")]
    method: GrayMethod,
}

#[derive(Args)]
struct MixArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Overlay color as R,G,B
    #[arg(short, long)]
    color: String,
}

#[derive(Args)]
struct CropArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Columns to skip from the left
    #[arg(short, default_value = "0")]
    x: u32,

    /// Rows to skip from the top
    #[arg(short, default_value = "0")]
    y: u32,

    /// Region width (clamped to the image)
    #[arg(long)]
    crop_width: u32,

    /// Region height (clamped to the image)
    #[arg(long)]
    crop_height: u32,
}

#[derive(Args)]
struct RotateArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Clockwise angle: 90, 180 or 270 (negative turns counter-clockwise)
    #[arg(short, long, allow_hyphen_values = true)]
    angle: Rotation,
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Pixel(args) => commands::pixel::run(args, cli.verbose),
        Commands::Blur(args) => commands::blur::run(args, cli.verbose),
        Commands::Brightness(args) => commands::adjust::brightness(args, cli.verbose),
        Commands::Contrast(args) => commands::adjust::contrast(args, cli.verbose),
        Commands::Vignette(args) => commands::adjust::vignette(args, cli.verbose),
        Commands::Gray(args) => commands::adjust::gray(args, cli.verbose),
        Commands::Invert(args) => commands::adjust::invert(args, cli.verbose),
        Commands::Mix(args) => commands::adjust::mix(args, cli.verbose),
        Commands::Sepia(args) => commands::adjust::sepia(args, cli.verbose),
        Commands::Opacity(args) => commands::adjust::opacity(args, cli.verbose),
        Commands::Crop(args) => commands::crop::run(args, cli.verbose),
        Commands::Rotate(args) => commands::rotate::run(args, cli.verbose),
    }
}

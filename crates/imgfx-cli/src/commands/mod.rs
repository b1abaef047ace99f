//! CLI command implementations

pub mod adjust;
pub mod blur;
pub mod crop;
pub mod info;
pub mod pixel;
pub mod rotate;

use crate::RawInput;
use anyhow::{bail, Context, Result};
use imgfx_core::PixelBuffer;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load a raw RGBA8 buffer of known size
pub fn load_raw(path: &Path, width: u32, height: u32) -> Result<PixelBuffer> {
    let data = fs::read(path).with_context(|| format!("Failed to load: {}", path.display()))?;
    debug!(path = %path.display(), bytes = data.len(), width, height, "loaded raw buffer");
    PixelBuffer::new(data, width, height)
        .with_context(|| format!("{} is not a {width}x{height} RGBA8 buffer", path.display()))
}

/// Load the input described by a command's `RawInput`
pub fn load_input(raw: &RawInput) -> Result<PixelBuffer> {
    load_raw(&raw.input, raw.width, raw.height)
}

/// Save a buffer as raw RGBA8
pub fn save_raw(path: &Path, buffer: &PixelBuffer) -> Result<()> {
    fs::write(path, buffer.as_raw()).with_context(|| format!("Failed to save: {}", path.display()))?;
    debug!(path = %path.display(), width = buffer.width(), height = buffer.height(), "saved raw buffer");
    Ok(())
}

/// Parse `R,G,B` into a color
pub fn parse_rgb(s: &str) -> Result<[u8; 3]> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        bail!("expected R,G,B, got '{}'", s);
    }
    let mut rgb = [0u8; 3];
    for (slot, part) in rgb.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .with_context(|| format!("invalid channel value '{}' in '{}' (0-255)", part, s))?;
    }
    Ok(rgb)
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

use anyhow::{Context, Result};
use image::{ImageFormat, RgbImage};
use std::path::PathBuf;

use super::{resolve_rgb, DisplayAdapter};
use crate::renderer::{BufferDevice, ColorIndex, Palette};

/// Writes the resolved buffer as an RGB PNG.
pub struct PngDisplay {
    path: PathBuf,
    background: Option<ColorIndex>,
}

impl PngDisplay {
    pub fn new(path: PathBuf, background: Option<ColorIndex>) -> Self {
        Self { path, background }
    }
}

impl DisplayAdapter for PngDisplay {
    fn present(&mut self, device: &BufferDevice, palette: &Palette) -> Result<()> {
        let rgb = resolve_rgb(device, palette, self.background)?;

        let width = u32::try_from(device.width()).context("Device too wide for PNG output")?;
        let height = u32::try_from(device.height()).context("Device too tall for PNG output")?;

        let image = RgbImage::from_raw(width, height, rgb)
            .context("Buffer size does not match device dimensions")?;

        image
            .save_with_format(&self.path, ImageFormat::Png)
            .with_context(|| format!("Failed to write PNG: {}", self.path.display()))?;

        log::info!(
            "wrote {}x{} PNG to {}",
            device.width(),
            device.height(),
            self.path.display()
        );
        Ok(())
    }
}

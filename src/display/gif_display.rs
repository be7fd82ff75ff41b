use anyhow::{Context, Result};
use gif::{Encoder, Frame};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use super::DisplayAdapter;
use crate::renderer::{BufferDevice, ColorIndex, Palette};

/// Largest palette a GIF global color table can hold.
const MAX_GIF_COLORS: usize = 256;

/// Writes the buffer as a single-frame indexed GIF.
///
/// The palette becomes the global color table, so cell indices are written
/// as-is without resolving them to RGB first.
pub struct GifDisplay {
    path: PathBuf,
    background: Option<ColorIndex>,
}

impl GifDisplay {
    pub fn new(path: PathBuf, background: Option<ColorIndex>) -> Self {
        Self { path, background }
    }

    fn indexed_pixels(&self, device: &BufferDevice, palette: &Palette) -> Result<Vec<u8>> {
        let fill = match self.background {
            Some(index) => index,
            None => palette.index(0)?,
        };
        palette.color(fill)?;

        device
            .cells()
            .iter()
            .map(|cell| -> Result<u8> {
                let index = cell.unwrap_or(fill);
                palette.color(index)?;
                Ok(index.get() as u8)
            })
            .collect()
    }
}

impl DisplayAdapter for GifDisplay {
    fn present(&mut self, device: &BufferDevice, palette: &Palette) -> Result<()> {
        if palette.len() > MAX_GIF_COLORS {
            anyhow::bail!(
                "GIF output supports at most {} colors, palette has {}",
                MAX_GIF_COLORS,
                palette.len()
            );
        }

        let width = u16::try_from(device.width()).context("Device too wide for GIF output")?;
        let height = u16::try_from(device.height()).context("Device too tall for GIF output")?;

        let pixels = self.indexed_pixels(device, palette)?;

        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create GIF: {}", self.path.display()))?;
        let writer = BufWriter::new(file);

        let mut encoder = Encoder::new(writer, width, height, &palette.rgb_table())?;
        let frame = Frame::from_indexed_pixels(width, height, pixels, None);
        encoder.write_frame(&frame)?;

        log::info!("wrote {}x{} GIF to {}", width, height, self.path.display());
        Ok(())
    }
}

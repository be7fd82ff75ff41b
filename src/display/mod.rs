mod gif_display;
mod png_display;

pub use gif_display::GifDisplay;
pub use png_display::PngDisplay;

use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::error::RenderError;
use crate::renderer::{BufferDevice, ColorIndex, Palette};

/// A sink that presents a buffer device through a palette.
///
/// Every written cell must hold an index assigned in `palette`; adapters
/// surface a bad index as an error instead of drawing garbage.
pub trait DisplayAdapter {
    fn present(&mut self, device: &BufferDevice, palette: &Palette) -> Result<()>;
}

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Gif,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "png" => Some(OutputFormat::Png),
                "gif" => Some(OutputFormat::Gif),
                _ => None,
            })
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Gif => "gif",
        }
    }
}

/// Wrapper enum for the file-backed adapters
pub enum DisplayWrapper {
    Png(PngDisplay),
    Gif(GifDisplay),
}

impl DisplayWrapper {
    pub fn new(path: PathBuf, format: OutputFormat, background: Option<ColorIndex>) -> Self {
        match format {
            OutputFormat::Png => DisplayWrapper::Png(PngDisplay::new(path, background)),
            OutputFormat::Gif => DisplayWrapper::Gif(GifDisplay::new(path, background)),
        }
    }
}

impl DisplayAdapter for DisplayWrapper {
    fn present(&mut self, device: &BufferDevice, palette: &Palette) -> Result<()> {
        match self {
            DisplayWrapper::Png(display) => display.present(device, palette),
            DisplayWrapper::Gif(display) => display.present(device, palette),
        }
    }
}

/// Resolve every cell to packed RGB8, row by row.
///
/// Unwritten cells take `background`, or black when none is given.
pub fn resolve_rgb(
    device: &BufferDevice,
    palette: &Palette,
    background: Option<ColorIndex>,
) -> std::result::Result<Vec<u8>, RenderError> {
    let fill = match background {
        Some(index) => palette.color(index)?.to_rgb8(),
        None => [0, 0, 0],
    };

    let width = device.width();
    let mut rgb = vec![0u8; device.len() * 3];

    rgb.par_chunks_mut(width * 3)
        .zip(device.cells().par_chunks(width))
        .try_for_each(|(out, row)| {
            for (pixel, cell) in out.chunks_exact_mut(3).zip(row) {
                let color = match cell {
                    Some(index) => palette.color(*index)?.to_rgb8(),
                    None => fill,
                };
                pixel.copy_from_slice(&color);
            }
            Ok::<(), RenderError>(())
        })?;

    Ok(rgb)
}

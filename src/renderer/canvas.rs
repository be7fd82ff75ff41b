use super::ColorIndex;
use crate::error::{RenderError, Result};

/// Row-major grid of palette indices.
///
/// Cells start unwritten (`None`) until the rasterizer or `clear` fills them.
#[derive(Debug, Clone)]
pub struct BufferDevice {
    cells: Vec<Option<ColorIndex>>,
    width: usize,
    height: usize,
}

impl BufferDevice {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = match width.checked_mul(height) {
            Some(len) if width > 0 && height > 0 => len,
            _ => return Err(RenderError::Allocation { width, height }),
        };

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| RenderError::Allocation { width, height })?;
        cells.resize(len, None);

        Ok(Self {
            cells,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major offset of `(x, y)`: `y * width + x`.
    pub fn offset(&self, x: usize, y: usize) -> Result<usize> {
        if x < self.width && y < self.height {
            Ok(y * self.width + x)
        } else {
            Err(RenderError::OutOfBounds {
                x: x as f64,
                y: y as f64,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn set(&mut self, x: usize, y: usize, color: ColorIndex) -> Result<()> {
        let offset = self.offset(x, y)?;
        self.cells[offset] = Some(color);
        Ok(())
    }

    pub fn get(&self, x: usize, y: usize) -> Result<Option<ColorIndex>> {
        let offset = self.offset(x, y)?;
        Ok(self.cells[offset])
    }

    pub fn clear(&mut self, color: ColorIndex) {
        self.cells.fill(Some(color));
    }

    pub fn cells(&self) -> &[Option<ColorIndex>] {
        &self.cells
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, Option<ColorIndex>> {
        self.cells.chunks(self.width)
    }

    pub fn written(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

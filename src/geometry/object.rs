use crate::error::{RenderError, Result};

/// A coordinate pair plus the palette index it is drawn with.
///
/// The same type carries logical, normalized and (pre-rounding) device
/// coordinates; `color` is only checked against a palette at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
    pub color: usize,
}

impl Point2D {
    pub const fn new(x: f64, y: f64, color: usize) -> Self {
        Self { x, y, color }
    }
}

/// An integer pixel position inside a buffer device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevicePoint {
    pub x: usize,
    pub y: usize,
    pub color: usize,
}

/// An ordered, fixed-length set of points forming one shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object2D {
    points: Vec<Point2D>,
}

impl Object2D {
    /// `len` slots, each at the origin with color 0 until set.
    pub fn new(len: usize) -> Self {
        Self {
            points: vec![Point2D::default(); len],
        }
    }

    pub fn from_points(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn set_point(&mut self, index: usize, point: Point2D) -> Result<()> {
        let len = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or(RenderError::Index { index, len })?;
        *slot = point;
        Ok(())
    }

    pub fn point(&self, index: usize) -> Option<&Point2D> {
        self.points.get(index)
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point2D> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a Object2D {
    type Item = &'a Point2D;
    type IntoIter = std::slice::Iter<'a, Point2D>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

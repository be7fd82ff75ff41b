use super::Point2D;

/// Logical coordinate range of the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Universe {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Universe {
    pub const fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self { xmin, xmax, ymin, ymax }
    }

    /// A window framing the whole universe.
    pub fn window(&self) -> Window {
        Window::new(self.xmin, self.xmax, self.ymin, self.ymax)
    }

    /// Inclusive on both edges, whichever way the bounds are ordered.
    pub fn contains(&self, point: &Point2D) -> bool {
        within(point.x, self.xmin, self.xmax) && within(point.y, self.ymin, self.ymax)
    }
}

/// Viewport range mapped onto the unit square.
///
/// Bounds may be inverted (`xmin > xmax`), which mirrors the mapping along
/// that axis. Zero-extent bounds are accepted here and rejected when used
/// for normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Window {
    pub const fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self { xmin, xmax, ymin, ymax }
    }

    /// Signed extent along x.
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Signed extent along y.
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    pub fn is_mirrored(&self) -> bool {
        self.width() < 0.0 || self.height() < 0.0
    }

    pub fn contains(&self, point: &Point2D) -> bool {
        within(point.x, self.xmin, self.xmax) && within(point.y, self.ymin, self.ymax)
    }
}

fn within(v: f64, a: f64, b: f64) -> bool {
    v >= a.min(b) && v <= a.max(b)
}

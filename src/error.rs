use thiserror::Error;

/// Axis of a bounding range, used to report degenerate windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Errors raised by the rendering pipeline.
///
/// All of them are local and recoverable: callers decide whether to skip the
/// offending point or abort the pass.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("cannot allocate a {width}x{height} buffer device")]
    Allocation { width: usize, height: usize },

    #[error("degenerate {axis} range [{min}, {max}] cannot be normalized")]
    Domain { axis: Axis, min: f64, max: f64 },

    #[error("device coordinate ({x}, {y}) is outside a {width}x{height} buffer")]
    OutOfBounds {
        x: f64,
        y: f64,
        width: usize,
        height: usize,
    },

    #[error("palette is full ({capacity} colors)")]
    CapacityExceeded { capacity: usize },

    #[error("color index {index} is not assigned (palette holds {len} colors)")]
    Index { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, RenderError>;

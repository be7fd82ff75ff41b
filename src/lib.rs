//! A minimal 2D rendering pipeline.
//!
//! Points in a logical [`Universe`] are normalized through a [`Window`],
//! quantized onto a [`BufferDevice`] of palette indices and presented by a
//! [`DisplayAdapter`] that resolves those indices through a [`Palette`].

pub mod display;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod renderer;
pub mod scene;

pub use display::{DisplayAdapter, DisplayWrapper, OutputFormat};
pub use error::{RenderError, Result};
pub use geometry::{DevicePoint, Object2D, Point2D, Universe, Window};
pub use renderer::{
    BufferDevice, ClipPolicy, Color, ColorIndex, ErrorPolicy, Palette, RasterStats, Rasterizer,
};
pub use scene::{Scene, Session};

mod canvas;
mod colors;
pub mod pipeline;

pub use canvas::BufferDevice;
pub use colors::{Color, ColorIndex, Palette};
pub use pipeline::{
    from_device_space, from_window_space, map_point, to_device_space, to_device_space_clamped,
    to_window_space,
};

use crate::error::{RenderError, Result};
use crate::geometry::{DevicePoint, Object2D, Point2D, Window};
use serde::{Deserialize, Serialize};

/// What to do with a point whose device coordinate falls outside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipPolicy {
    #[default]
    Reject,
    Clamp,
}

/// What a pass does when a single point cannot be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    #[default]
    Abort,
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RasterStats {
    pub drawn: usize,
    pub skipped: usize,
}

impl RasterStats {
    pub fn merge(&mut self, other: RasterStats) {
        self.drawn += other.drawn;
        self.skipped += other.skipped;
    }
}

/// Writes logical points into a buffer device through a window.
pub struct Rasterizer {
    window: Window,
    clip: ClipPolicy,
    on_error: ErrorPolicy,
}

impl Rasterizer {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            clip: ClipPolicy::default(),
            on_error: ErrorPolicy::default(),
        }
    }

    pub fn with_clip(mut self, clip: ClipPolicy) -> Self {
        self.clip = clip;
        self
    }

    pub fn with_error_policy(mut self, on_error: ErrorPolicy) -> Self {
        self.on_error = on_error;
        self
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Map a logical point to its pixel, honoring the clip policy.
    pub fn map(&self, p: &Point2D, device: &BufferDevice) -> Result<DevicePoint> {
        let norm = to_window_space(p, &self.window)?;
        match self.clip {
            ClipPolicy::Reject => to_device_space(&norm, device),
            ClipPolicy::Clamp => to_device_space_clamped(&norm, device),
        }
    }

    /// Draw one point. Its color must be assigned in `palette`.
    pub fn draw_point(
        &self,
        p: &Point2D,
        palette: &Palette,
        device: &mut BufferDevice,
    ) -> Result<DevicePoint> {
        let color = palette.index(p.color)?;
        let dp = self.map(p, device)?;
        device.set(dp.x, dp.y, color)?;
        Ok(dp)
    }

    /// Draw every point of `object` in order.
    ///
    /// Under [`ErrorPolicy::Skip`] bad points are logged and counted; a
    /// degenerate window still aborts since no point could ever be drawn.
    pub fn draw_object(
        &self,
        object: &Object2D,
        palette: &Palette,
        device: &mut BufferDevice,
    ) -> Result<RasterStats> {
        let mut stats = RasterStats::default();

        for (i, point) in object.iter().enumerate() {
            match self.draw_point(point, palette, device) {
                Ok(_) => stats.drawn += 1,
                Err(err @ RenderError::Domain { .. }) => return Err(err),
                Err(err) => match self.on_error {
                    ErrorPolicy::Abort => return Err(err),
                    ErrorPolicy::Skip => {
                        log::warn!("skipping point {} ({}, {}): {}", i, point.x, point.y, err);
                        stats.skipped += 1;
                    }
                },
            }
        }

        Ok(stats)
    }

    pub fn draw_objects<'a, I>(
        &self,
        objects: I,
        palette: &Palette,
        device: &mut BufferDevice,
    ) -> Result<RasterStats>
    where
        I: IntoIterator<Item = &'a Object2D>,
    {
        let mut stats = RasterStats::default();
        for object in objects {
            stats.merge(self.draw_object(object, palette, device)?);
        }
        log::debug!("rasterized {} points, skipped {}", stats.drawn, stats.skipped);
        Ok(stats)
    }
}

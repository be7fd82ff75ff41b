//! Coordinate mappings: logical space -> normalized unit square -> device pixels.
//!
//! Device quantization uses `f64::round`, i.e. halves round away from zero
//! (`4.5 -> 5`). Nothing is clamped here; out-of-range results are errors.

use super::BufferDevice;
use crate::error::{Axis, RenderError, Result};
use crate::geometry::{DevicePoint, Point2D, Window};

/// Map a logical point into the window's unit square.
///
/// Points inside the window land in `[0, 1] x [0, 1]`; points outside it
/// fall outside that range. An inverted window mirrors the result.
pub fn to_window_space(p: &Point2D, win: &Window) -> Result<Point2D> {
    let x = normalize(p.x, win.xmin, win.xmax, Axis::X)?;
    let y = normalize(p.y, win.ymin, win.ymax, Axis::Y)?;
    Ok(Point2D::new(x, y, p.color))
}

fn normalize(v: f64, min: f64, max: f64, axis: Axis) -> Result<f64> {
    if !min.is_finite() || !max.is_finite() || min == max {
        return Err(RenderError::Domain { axis, min, max });
    }

    let extent = max - min;
    if extent.is_finite() {
        Ok((v - min) / extent)
    } else {
        // Extent overflowed f64; halving every term keeps it finite.
        Ok((v / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0))
    }
}

/// Quantize a normalized point to a pixel of `device`.
pub fn to_device_space(p: &Point2D, device: &BufferDevice) -> Result<DevicePoint> {
    let (x, y) = scale_to_device(p, device);
    let max_x = (device.width() - 1) as f64;
    let max_y = (device.height() - 1) as f64;

    if in_range(x, max_x) && in_range(y, max_y) {
        Ok(DevicePoint {
            x: x as usize,
            y: y as usize,
            color: p.color,
        })
    } else {
        Err(out_of_bounds(x, y, device))
    }
}

/// Like [`to_device_space`], but pulls finite out-of-range results onto the
/// nearest edge pixel. NaN coordinates are still rejected.
pub fn to_device_space_clamped(p: &Point2D, device: &BufferDevice) -> Result<DevicePoint> {
    let (x, y) = scale_to_device(p, device);
    if x.is_nan() || y.is_nan() {
        return Err(out_of_bounds(x, y, device));
    }

    let max_x = (device.width() - 1) as f64;
    let max_y = (device.height() - 1) as f64;
    Ok(DevicePoint {
        x: x.clamp(0.0, max_x) as usize,
        y: y.clamp(0.0, max_y) as usize,
        color: p.color,
    })
}

fn scale_to_device(p: &Point2D, device: &BufferDevice) -> (f64, f64) {
    let x = (p.x * (device.width() - 1) as f64).round();
    let y = (p.y * (device.height() - 1) as f64).round();
    (x, y)
}

fn in_range(v: f64, max: f64) -> bool {
    // NaN fails both comparisons.
    v >= 0.0 && v <= max
}

fn out_of_bounds(x: f64, y: f64, device: &BufferDevice) -> RenderError {
    RenderError::OutOfBounds {
        x,
        y,
        width: device.width(),
        height: device.height(),
    }
}

/// `to_device_space(to_window_space(p, win), device)`.
pub fn map_point(p: &Point2D, win: &Window, device: &BufferDevice) -> Result<DevicePoint> {
    to_device_space(&to_window_space(p, win)?, device)
}

/// Inverse of [`to_device_space`], up to quantization.
pub fn from_device_space(p: &DevicePoint, device: &BufferDevice) -> Point2D {
    Point2D::new(
        unscale(p.x, device.width()),
        unscale(p.y, device.height()),
        p.color,
    )
}

fn unscale(v: usize, extent: usize) -> f64 {
    if extent <= 1 {
        0.0
    } else {
        v as f64 / (extent - 1) as f64
    }
}

/// Inverse of [`to_window_space`].
pub fn from_window_space(p: &Point2D, win: &Window) -> Point2D {
    Point2D::new(
        win.xmin + p.x * win.width(),
        win.ymin + p.y * win.height(),
        p.color,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Window {
        Window::new(0.0, 100.0, 0.0, 100.0)
    }

    #[test]
    fn center_point_rounds_half_away_from_zero() {
        let device = BufferDevice::new(10, 10).unwrap();
        let norm = to_window_space(&Point2D::new(50.0, 50.0, 1), &square()).unwrap();
        assert_eq!(norm, Point2D::new(0.5, 0.5, 1));

        // 0.5 * 9 = 4.5 -> 5
        let dp = to_device_space(&norm, &device).unwrap();
        assert_eq!(dp, DevicePoint { x: 5, y: 5, color: 1 });
    }

    #[test]
    fn points_inside_window_normalize_into_unit_square() {
        let win = Window::new(-3.0, 7.0, 10.0, 12.5);
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let p = Point2D::new(-3.0 + 10.0 * t, 12.5 - 2.5 * t, 0);
            let n = to_window_space(&p, &win).unwrap();
            assert!((0.0..=1.0).contains(&n.x), "x = {}", n.x);
            assert!((0.0..=1.0).contains(&n.y), "y = {}", n.y);
        }
    }

    #[test]
    fn degenerate_window_is_domain_error() {
        let win = Window::new(5.0, 5.0, 0.0, 10.0);
        let err = to_window_space(&Point2D::new(5.0, 5.0, 0), &win).unwrap_err();
        assert_eq!(err, RenderError::Domain { axis: Axis::X, min: 5.0, max: 5.0 });

        let win = Window::new(0.0, 10.0, 3.0, 3.0);
        assert!(matches!(
            to_window_space(&Point2D::new(1.0, 1.0, 0), &win),
            Err(RenderError::Domain { axis: Axis::Y, .. })
        ));
    }

    #[test]
    fn non_finite_window_is_domain_error() {
        let win = Window::new(0.0, f64::INFINITY, 0.0, 1.0);
        assert!(to_window_space(&Point2D::default(), &win).is_err());
        let win = Window::new(f64::NAN, 1.0, 0.0, 1.0);
        assert!(to_window_space(&Point2D::default(), &win).is_err());
    }

    #[test]
    fn huge_finite_window_still_normalizes() {
        let win = Window::new(-1e308, 1e308, 0.0, 1.0);
        let n = to_window_space(&Point2D::new(0.0, 0.25, 0), &win).unwrap();
        assert!((n.x - 0.5).abs() < 1e-12, "x = {}", n.x);
        assert_eq!(n.y, 0.25);

        let n = to_window_space(&Point2D::new(1e308, 0.0, 0), &win).unwrap();
        assert!((n.x - 1.0).abs() < 1e-12, "x = {}", n.x);
    }

    #[test]
    fn inverted_window_mirrors_mapping() {
        let device = BufferDevice::new(11, 11).unwrap();
        let win = Window::new(0.0, 100.0, 100.0, 0.0);
        let dp = map_point(&Point2D::new(0.0, 0.0, 0), &win, &device).unwrap();
        assert_eq!((dp.x, dp.y), (0, 10));
        let dp = map_point(&Point2D::new(100.0, 100.0, 0), &win, &device).unwrap();
        assert_eq!((dp.x, dp.y), (10, 0));
    }

    #[test]
    fn outside_window_is_out_of_bounds() {
        let device = BufferDevice::new(10, 10).unwrap();
        let err = map_point(&Point2D::new(150.0, 50.0, 0), &square(), &device).unwrap_err();
        assert!(matches!(err, RenderError::OutOfBounds { width: 10, height: 10, .. }));

        assert!(map_point(&Point2D::new(50.0, -10.0, 0), &square(), &device).is_err());
        assert!(to_device_space(&Point2D::new(f64::NAN, 0.5, 0), &device).is_err());
    }

    #[test]
    fn tiny_negative_rounds_to_zero_pixel() {
        let device = BufferDevice::new(10, 10).unwrap();
        let dp = to_device_space(&Point2D::new(-0.01, 0.0, 0), &device).unwrap();
        assert_eq!((dp.x, dp.y), (0, 0));
    }

    #[test]
    fn clamped_mapping_pins_to_edges() {
        let device = BufferDevice::new(8, 4).unwrap();
        let dp = to_device_space_clamped(&Point2D::new(2.0, -1.0, 3), &device).unwrap();
        assert_eq!(dp, DevicePoint { x: 7, y: 0, color: 3 });
        assert!(to_device_space_clamped(&Point2D::new(f64::NAN, 0.0, 0), &device).is_err());
    }

    #[test]
    fn single_pixel_device_maps_everything_to_origin() {
        let device = BufferDevice::new(1, 1).unwrap();
        let dp = to_device_space(&Point2D::new(1.0, 0.0, 0), &device).unwrap();
        assert_eq!((dp.x, dp.y), (0, 0));
        assert_eq!(from_device_space(&dp, &device), Point2D::new(0.0, 0.0, 0));
    }

    #[test]
    fn round_trip_recovers_point_within_half_pixel() {
        let device = BufferDevice::new(64, 48).unwrap();
        let win = Window::new(-20.0, 44.0, 5.0, 29.0);
        let tol_x = 0.5 * win.width() / 63.0 + 1e-9;
        let tol_y = 0.5 * win.height() / 47.0 + 1e-9;

        for i in 0..=16 {
            for j in 0..=16 {
                let p = Point2D::new(
                    -20.0 + 64.0 * i as f64 / 16.0,
                    5.0 + 24.0 * j as f64 / 16.0,
                    2,
                );
                let dp = map_point(&p, &win, &device).unwrap();
                let back = from_window_space(&from_device_space(&dp, &device), &win);
                assert!((back.x - p.x).abs() <= tol_x, "{:?} -> {:?}", p, back);
                assert!((back.y - p.y).abs() <= tol_y, "{:?} -> {:?}", p, back);
                assert_eq!(back.color, 2);
            }
        }
    }

    #[test]
    fn window_space_round_trip_is_exact_enough() {
        let win = Window::new(2.0, 6.0, -1.0, 1.0);
        let p = Point2D::new(3.0, 0.25, 0);
        let back = from_window_space(&to_window_space(&p, &win).unwrap(), &win);
        assert!((back.x - p.x).abs() < 1e-12);
        assert!((back.y - p.y).abs() < 1e-12);
    }
}

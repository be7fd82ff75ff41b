mod object;
mod space;

pub use object::{DevicePoint, Object2D, Point2D};
pub use space::{Universe, Window};

use crate::error::{RenderError, Result};

/// An RGB color with float channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    /// Convert to 8-bit channels: `round(c * 255)` with c clamped to [0, 1].
    pub fn to_rgb8(&self) -> [u8; 3] {
        [channel_to_u8(self.red), channel_to_u8(self.green), channel_to_u8(self.blue)]
    }

    fn distance_sq(&self, other: &Color) -> f32 {
        let dr = self.red - other.red;
        let dg = self.green - other.green;
        let db = self.blue - other.blue;
        dr * dr + dg * dg + db * db
    }
}

fn channel_to_u8(c: f32) -> u8 {
    if c.is_nan() {
        return 0;
    }
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// A palette index that was checked against the palette which issued it.
///
/// Only [`Palette::index`] and [`Palette::push`] hand these out, so a buffer
/// cell holding a `ColorIndex` always refers to an assigned color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorIndex(usize);

impl ColorIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

/// Fixed-capacity, append-only color table.
///
/// Colors are assigned sequentially; the number assigned so far is the
/// cursor (`len`). Indices stay stable once assigned.
#[derive(Debug, Clone)]
pub struct Palette {
    capacity: usize,
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            colors: Vec::new(),
        }
    }

    /// Build a palette and fill it from `colors`, failing once capacity runs out.
    pub fn from_colors<I>(capacity: usize, colors: I) -> Result<Self>
    where
        I: IntoIterator<Item = Color>,
    {
        let mut palette = Self::new(capacity);
        for color in colors {
            palette.push(color)?;
        }
        Ok(palette)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.colors.len() >= self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.colors.len()
    }

    /// Append a color at the cursor. Returns `false` when the palette is full.
    pub fn set_color(&mut self, red: f32, green: f32, blue: f32) -> bool {
        self.push(Color::new(red, green, blue)).is_ok()
    }

    pub fn push(&mut self, color: Color) -> Result<ColorIndex> {
        if self.is_full() {
            return Err(RenderError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.colors.push(color);
        Ok(ColorIndex(self.colors.len() - 1))
    }

    pub fn get_color(&self, index: usize) -> Result<&Color> {
        self.colors.get(index).ok_or(RenderError::Index {
            index,
            len: self.colors.len(),
        })
    }

    /// Validate a raw index against the assigned colors.
    pub fn index(&self, index: usize) -> Result<ColorIndex> {
        self.get_color(index).map(|_| ColorIndex(index))
    }

    /// Look up a validated index.
    ///
    /// An index issued by a different, shorter palette resolves to an
    /// `Index` error instead of panicking.
    pub fn color(&self, index: ColorIndex) -> Result<&Color> {
        self.get_color(index.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Color> {
        self.colors.iter()
    }

    /// Flat RGB8 triplets in index order, for indexed-image encoders.
    pub fn rgb_table(&self) -> Vec<u8> {
        self.colors.iter().flat_map(|c| c.to_rgb8()).collect()
    }

    /// Nearest assigned color by squared RGB distance; ties keep the lowest index.
    pub fn closest(&self, red: f32, green: f32, blue: f32) -> Option<ColorIndex> {
        let target = Color::new(red, green, blue);
        let mut best: Option<(usize, f32)> = None;

        for (i, color) in self.colors.iter().enumerate() {
            let distance = color.distance_sq(&target);
            match best {
                Some((_, d)) if distance >= d => {}
                _ => best = Some((i, distance)),
            }
        }

        best.map(|(i, _)| ColorIndex(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_color_fails_exactly_at_capacity() {
        let mut palette = Palette::new(2);
        assert!(palette.set_color(1.0, 0.0, 0.0));
        assert!(palette.set_color(0.0, 1.0, 0.0));
        assert!(!palette.set_color(0.0, 0.0, 1.0));
        assert_eq!(palette.len(), 2);
        assert!(palette.is_full());
    }

    #[test]
    fn huge_capacity_is_only_a_limit() {
        let mut palette = Palette::new(usize::MAX);
        let index = palette.push(Color::new(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(index.get(), 0);
        assert_eq!(palette.len(), 1);
        assert_eq!(palette.remaining(), usize::MAX - 1);
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let mut palette = Palette::new(0);
        assert!(!palette.set_color(0.5, 0.5, 0.5));
        assert_eq!(
            palette.push(Color::BLACK),
            Err(RenderError::CapacityExceeded { capacity: 0 })
        );
    }

    #[test]
    fn get_color_returns_insertion_order() {
        let mut palette = Palette::new(3);
        palette.set_color(1.0, 0.0, 0.0);
        palette.set_color(0.0, 1.0, 0.0);

        assert_eq!(palette.get_color(0).unwrap(), &Color::new(1.0, 0.0, 0.0));
        assert_eq!(palette.get_color(1).unwrap(), &Color::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn get_color_rejects_unassigned_slots() {
        let mut palette = Palette::new(4);
        palette.set_color(1.0, 1.0, 1.0);

        // Slot 2 exists in capacity but was never assigned.
        assert_eq!(palette.get_color(2), Err(RenderError::Index { index: 2, len: 1 }));
        assert_eq!(palette.get_color(99), Err(RenderError::Index { index: 99, len: 1 }));
    }

    #[test]
    fn push_hands_out_sequential_indices() {
        let mut palette = Palette::new(3);
        let a = palette.push(Color::BLACK).unwrap();
        let b = palette.push(Color::new(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(a.get(), 0);
        assert_eq!(b.get(), 1);
        assert_eq!(palette.remaining(), 1);
    }

    #[test]
    fn to_rgb8_rounds_and_clamps() {
        assert_eq!(Color::new(0.5, 1.0, 0.0).to_rgb8(), [128, 255, 0]);
        assert_eq!(Color::new(-1.0, 2.0, f32::NAN).to_rgb8(), [0, 255, 0]);
    }

    #[test]
    fn closest_prefers_nearest_then_lowest_index() {
        let palette = Palette::from_colors(
            3,
            [
                Color::new(0.0, 0.0, 0.0),
                Color::new(1.0, 0.0, 0.0),
                Color::new(1.0, 0.0, 0.0),
            ],
        )
        .unwrap();

        assert_eq!(palette.closest(0.9, 0.1, 0.0).map(ColorIndex::get), Some(1));
        assert_eq!(palette.closest(0.1, 0.0, 0.0).map(ColorIndex::get), Some(0));
        assert!(Palette::new(2).closest(0.0, 0.0, 0.0).is_none());
    }

    #[test]
    fn rgb_table_is_flat_triplets() {
        let palette =
            Palette::from_colors(2, [Color::new(1.0, 0.0, 0.0), Color::new(0.0, 0.0, 1.0)]).unwrap();
        assert_eq!(palette.rgb_table(), vec![255, 0, 0, 0, 0, 255]);
    }

    #[test]
    fn from_colors_overflow_is_capacity_error() {
        let result = Palette::from_colors(1, [Color::BLACK, Color::BLACK]);
        assert!(matches!(result, Err(RenderError::CapacityExceeded { capacity: 1 })));
    }
}

//! The [`GridLayout`] type is the geometry of a grid without its cells.
//!
//! Both the authoritative [`NavGrid`](crate::NavGrid) and its detached
//! [`GridSnapshot`](crate::GridSnapshot) share one layout, so world/cell
//! conversion and flat indexing behave identically on either.
//!
//! Conventions:
//! - world → cell subtracts the origin, divides by the cell size and floors;
//! - cell → world multiplies by the cell size and adds the origin;
//! - valid cells are exactly `[0, width) × [0, height)`.

use glam::Vec2;

use crate::config::GridConfig;
use crate::geom::{Point, Range};

/// Size, cell size and origin of a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    width: i32,
    height: i32,
    cell_size: f32,
    origin: Vec2,
}

impl GridLayout {
    /// Build a layout from a config. The config is assumed validated.
    pub(crate) fn from_config(cfg: &GridConfig) -> Self {
        Self {
            width: cfg.width,
            height: cfg.height,
            cell_size: cfg.cell_size,
            origin: cfg.origin,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// The valid cell range `[0, width) × [0, height)`.
    #[inline]
    pub fn range(&self) -> Range {
        Range::with_size(self.width, self.height)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.range().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `p` is a valid cell coordinate.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Flat row-major index of `p`, or `None` if out of range.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }

    /// Cell coordinate of a flat index. The index is not range-checked.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.width as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// Cell containing `world`. No bounds check is performed; the result
    /// may lie outside the grid. A non-finite position maps to
    /// `(i32::MIN, i32::MIN)`, which no grid contains.
    #[inline]
    pub fn world_to_cell(&self, world: Vec2) -> Point {
        if !world.is_finite() {
            return Point::new(i32::MIN, i32::MIN);
        }
        let rel = ((world - self.origin) / self.cell_size).floor();
        Point::new(rel.x as i32, rel.y as i32)
    }

    /// World position of the lower corner of cell `p`.
    #[inline]
    pub fn cell_to_world(&self, p: Point) -> Vec2 {
        self.origin + Vec2::new(p.x as f32, p.y as f32) * self.cell_size
    }

    /// World position of the center of cell `p`.
    #[inline]
    pub fn cell_to_world_centered(&self, p: Point) -> Vec2 {
        self.cell_to_world(p) + Vec2::splat(self.cell_size * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(w: i32, h: i32, size: f32, origin: Vec2) -> GridLayout {
        GridLayout::from_config(
            &GridConfig::new(w, h)
                .with_cell_size(size)
                .with_origin(origin),
        )
    }

    #[test]
    fn index_round_trip() {
        let l = layout(7, 4, 1.0, Vec2::ZERO);
        for p in l.range() {
            let i = l.index(p).unwrap();
            assert_eq!(l.point(i), p);
        }
        assert_eq!(l.index(Point::new(6, 3)), Some(27));
    }

    #[test]
    fn bounds_are_half_open() {
        let l = layout(5, 3, 1.0, Vec2::ZERO);
        assert!(l.contains(Point::new(4, 2)));
        assert!(!l.contains(Point::new(5, 0)));
        assert!(!l.contains(Point::new(0, 3)));
        assert!(!l.contains(Point::new(-1, 0)));
        assert_eq!(l.index(Point::new(5, 0)), None);
    }

    #[test]
    fn world_to_cell_floors() {
        let l = layout(10, 10, 2.0, Vec2::new(-4.0, 1.0));
        assert_eq!(l.world_to_cell(Vec2::new(-4.0, 1.0)), Point::new(0, 0));
        assert_eq!(l.world_to_cell(Vec2::new(-2.1, 2.9)), Point::new(0, 0));
        assert_eq!(l.world_to_cell(Vec2::new(-2.0, 3.0)), Point::new(1, 1));
        // Left of the origin floors to -1, not 0.
        assert_eq!(l.world_to_cell(Vec2::new(-4.5, 1.0)), Point::new(-1, 0));
    }

    #[test]
    fn non_finite_world_is_off_grid() {
        let l = layout(5, 5, 1.0, Vec2::ZERO);
        for w in [
            Vec2::NAN,
            Vec2::new(f32::NAN, 2.5),
            Vec2::new(0.5, f32::INFINITY),
            Vec2::new(f32::NEG_INFINITY, 0.5),
        ] {
            let p = l.world_to_cell(w);
            assert!(!l.contains(p), "{w} -> {p}");
            assert_eq!(l.index(p), None);
        }
    }

    #[test]
    fn centered_round_trip() {
        let l = layout(8, 6, 0.75, Vec2::new(3.0, -2.0));
        for p in l.range() {
            assert_eq!(l.world_to_cell(l.cell_to_world_centered(p)), p);
        }
    }

    #[test]
    fn world_round_trip_within_one_cell() {
        let l = layout(8, 8, 1.5, Vec2::new(10.0, 20.0));
        for &(x, y) in &[(10.0, 20.0), (11.49, 21.6), (17.3, 29.99), (21.9, 31.9)] {
            let w = Vec2::new(x, y);
            let back = l.cell_to_world(l.world_to_cell(w));
            let d = w - back;
            assert!(d.x >= 0.0 && d.x < 1.5, "{w} -> {back}");
            assert!(d.y >= 0.0 && d.y < 1.5, "{w} -> {back}");
        }
    }

    #[test]
    fn centered_adds_half_cell() {
        let l = layout(4, 4, 2.0, Vec2::new(1.0, 1.0));
        assert_eq!(l.cell_to_world(Point::new(1, 2)), Vec2::new(3.0, 5.0));
        assert_eq!(
            l.cell_to_world_centered(Point::new(1, 2)),
            Vec2::new(4.0, 6.0)
        );
    }
}

//! Detached, owned copies of a grid's cells.

use glam::Vec2;

use crate::cell::Cell;
use crate::geom::Point;
use crate::layout::GridLayout;

/// A private copy of a grid's layout and cells.
///
/// Taken with [`NavGrid::snapshot`](crate::NavGrid::snapshot) or
/// [`SharedGrid::snapshot`](crate::SharedGrid::snapshot). Later blockage
/// changes on the source grid are not visible here, so a snapshot can be
/// moved to another thread and searched without synchronization.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSnapshot {
    layout: GridLayout,
    cells: Vec<Cell>,
}

impl GridSnapshot {
    pub(crate) fn new(layout: GridLayout, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(layout.len(), cells.len());
        Self { layout, cells }
    }

    #[inline]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.layout.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.layout.height()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        self.layout.index(p)
    }

    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        self.layout.point(idx)
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn cell_at(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.cell_at(p).is_some_and(Cell::is_walkable)
    }

    /// Walkability by flat index. Out-of-range indices are not walkable.
    #[inline]
    pub fn is_walkable_index(&self, idx: usize) -> bool {
        self.cells.get(idx).is_some_and(Cell::is_walkable)
    }

    #[inline]
    pub fn world_to_cell(&self, world: Vec2) -> Point {
        self.layout.world_to_cell(world)
    }

    #[inline]
    pub fn cell_to_world_centered(&self, p: Point) -> Vec2 {
        self.layout.cell_to_world_centered(p)
    }
}

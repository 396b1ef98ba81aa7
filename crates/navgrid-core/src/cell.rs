//! The [`Cell`] type is one lattice position and its walkability.

use crate::geom::Point;

/// A single grid cell.
///
/// Cells are plain values stored contiguously in row-major order. They carry
/// no search state; pathfinders keep their own scratch arrays keyed by
/// [`index`](Cell::index).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: Point,
    /// Flat row-major index (`y * width + x`).
    pub index: usize,
    pub blocked: bool,
}

impl Cell {
    /// Create a cell at `pos` with the given flat index.
    #[inline]
    pub const fn new(pos: Point, index: usize, blocked: bool) -> Self {
        Self {
            pos,
            index,
            blocked,
        }
    }

    #[inline]
    pub const fn is_walkable(&self) -> bool {
        !self.blocked
    }

    /// Set the blockage flag (builder).
    #[inline]
    pub const fn with_blocked(mut self, blocked: bool) -> Self {
        self.blocked = blocked;
        self
    }
}

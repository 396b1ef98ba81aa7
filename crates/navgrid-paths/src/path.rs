//! Path results and query errors.

use std::fmt;

use glam::Vec2;
use navgrid_core::{GridLayout, Point};

use crate::direction::Direction;

/// A found path: cells from start to goal inclusive, with its total cost.
///
/// The empty path (cost 0, no cells) stands for "no path".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells: Vec<Point>,
    cost: i32,
}

impl Path {
    pub(crate) fn new(cells: Vec<Point>, cost: i32) -> Self {
        Self { cells, cost }
    }

    /// The "no path" value.
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of waypoints (steps + 1 for a non-empty path).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Number of moves.
    #[inline]
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Total cost in octile units (10 per orthogonal, 14 per diagonal step).
    #[inline]
    pub fn cost(&self) -> i32 {
        self.cost
    }

    #[inline]
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    pub fn start(&self) -> Option<Point> {
        self.cells.first().copied()
    }

    pub fn goal(&self) -> Option<Point> {
        self.cells.last().copied()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.cells.contains(&p)
    }

    /// Direction of every move, in order. `None` marks a gap between two
    /// non-adjacent cells, which a path produced by this crate never has.
    pub fn directions(&self) -> impl Iterator<Item = Option<Direction>> + '_ {
        self.cells
            .windows(2)
            .map(|w| Direction::from_offset(w[1] - w[0]))
    }

    /// Cell-centered world positions of every waypoint.
    pub fn to_world(&self, layout: &GridLayout) -> Vec<Vec2> {
        self.cells
            .iter()
            .map(|&p| layout.cell_to_world_centered(p))
            .collect()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "no path");
        }
        for (i, p) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, " (cost {})", self.cost)
    }
}

/// Why a query produced no path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// The start position lies outside the grid.
    StartOutOfRange(Point),
    /// The goal position lies outside the grid.
    GoalOutOfRange(Point),
    /// The start cell is blocked and the policy rejects it.
    StartBlocked(Point),
    /// Both endpoints are valid but no walkable route connects them.
    Unreachable { start: Point, goal: Point },
}

impl PathError {
    /// Whether the query itself was invalid, as opposed to merely having no
    /// route.
    pub fn is_invalid_query(&self) -> bool {
        !matches!(self, Self::Unreachable { .. })
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartOutOfRange(p) => write!(f, "start {p} is outside the grid"),
            Self::GoalOutOfRange(p) => write!(f, "goal {p} is outside the grid"),
            Self::StartBlocked(p) => write!(f, "start {p} is blocked"),
            Self::Unreachable { start, goal } => write!(f, "no path from {start} to {goal}"),
        }
    }
}

impl std::error::Error for PathError {}

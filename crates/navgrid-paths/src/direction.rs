//! The compass direction table and per-search neighbor offsets.

use std::fmt;

use navgrid_core::{GridLayout, Point};

use crate::distance::{DIAGONAL_COST, ORTHOGONAL_COST};

/// One of the eight compass directions. North is `-y`.
///
/// Declaration order is the table order used when a caller asks for every
/// direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Every direction in table order. Use this to ask for 8-way movement
    /// explicitly.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// North, east, south, west.
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The four diagonals.
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// Unit offset of one step in this direction.
    #[inline]
    pub const fn offset(self) -> Point {
        match self {
            Direction::North => Point::new(0, -1),
            Direction::NorthEast => Point::new(1, -1),
            Direction::East => Point::new(1, 0),
            Direction::SouthEast => Point::new(1, 1),
            Direction::South => Point::new(0, 1),
            Direction::SouthWest => Point::new(-1, 1),
            Direction::West => Point::new(-1, 0),
            Direction::NorthWest => Point::new(-1, -1),
        }
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast
                | Direction::SouthEast
                | Direction::SouthWest
                | Direction::NorthWest
        )
    }

    /// Cost of one step: 10 orthogonal, 14 diagonal.
    #[inline]
    pub const fn step_cost(self) -> i32 {
        if self.is_diagonal() {
            DIAGONAL_COST
        } else {
            ORTHOGONAL_COST
        }
    }

    /// The direction whose offset is `d`, if `d` is a unit step.
    pub fn from_offset(d: Point) -> Option<Direction> {
        Self::ALL.into_iter().find(|dir| dir.offset() == d)
    }

    /// The opposite direction.
    #[inline]
    pub const fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::North => "N",
            Direction::NorthEast => "NE",
            Direction::East => "E",
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::West => "W",
            Direction::NorthWest => "NW",
        };
        f.write_str(s)
    }
}

/// Resolve a caller-supplied direction list.
///
/// An empty list means "every direction" ([`Direction::ALL`]), not "no
/// movement".
#[inline]
pub fn resolve(dirs: &[Direction]) -> &[Direction] {
    if dirs.is_empty() {
        &Direction::ALL
    } else {
        dirs
    }
}

/// One entry of a neighbor table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub offset: Point,
    pub cost: i32,
}

impl From<Direction> for Step {
    fn from(d: Direction) -> Self {
        Step {
            offset: d.offset(),
            cost: d.step_cost(),
        }
    }
}

/// Neighbor-offset table for one search.
///
/// Built from a direction list (see [`resolve`]); duplicates are dropped and
/// the caller's order is kept, since it decides which of several equal-cost
/// cells the search looks at first.
#[derive(Debug, Clone, Default)]
pub struct Neighbors {
    steps: Vec<Step>,
}

impl Neighbors {
    /// Build a table for `dirs`.
    pub fn new(dirs: &[Direction]) -> Self {
        let mut n = Self {
            steps: Vec::with_capacity(8),
        };
        n.set_directions(dirs);
        n
    }

    /// Rebuild the table in place, reusing its buffer.
    pub fn set_directions(&mut self, dirs: &[Direction]) {
        self.steps.clear();
        for &d in resolve(dirs) {
            let step = Step::from(d);
            if !self.steps.contains(&step) {
                self.steps.push(step);
            }
        }
    }

    /// The table, in evaluation order.
    #[inline]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// In-range neighbors of `p` as `(flat index, position, step cost)`.
    pub fn around<'a>(
        &'a self,
        p: Point,
        layout: &'a GridLayout,
    ) -> impl Iterator<Item = (usize, Point, i32)> + 'a {
        self.steps.iter().filter_map(move |s| {
            let n = p + s.offset;
            layout.index(n).map(|i| (i, n, s.cost))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navgrid_core::{GridConfig, NavGrid};

    #[test]
    fn offsets_are_unit_steps() {
        for d in Direction::ALL {
            let o = d.offset();
            assert!(Point::ZERO.is_adjacent(o));
            assert_eq!(d.is_diagonal(), o.x != 0 && o.y != 0);
            assert_eq!(Direction::from_offset(o), Some(d));
            assert_eq!(d.reverse().offset(), -o);
        }
        assert_eq!(Direction::from_offset(Point::new(2, 0)), None);
        assert_eq!(Direction::from_offset(Point::ZERO), None);
    }

    #[test]
    fn step_costs() {
        for d in Direction::CARDINAL {
            assert_eq!(d.step_cost(), 10);
        }
        for d in Direction::DIAGONAL {
            assert_eq!(d.step_cost(), 14);
        }
    }

    #[test]
    fn empty_list_resolves_to_all() {
        assert_eq!(resolve(&[]), &Direction::ALL);
        assert_eq!(resolve(&Direction::CARDINAL), &Direction::CARDINAL);
        assert_eq!(Neighbors::new(&[]).steps().len(), 8);
    }

    #[test]
    fn neighbors_keep_order_and_drop_duplicates() {
        let n = Neighbors::new(&[Direction::West, Direction::North, Direction::West]);
        let offsets: Vec<_> = n.steps().iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![Point::new(-1, 0), Point::new(0, -1)]);
    }

    #[test]
    fn neighbors_around_filters_range() {
        let g = NavGrid::new(GridConfig::new(3, 3)).unwrap();
        let n = Neighbors::new(&Direction::ALL);
        let corner: Vec<_> = n.around(Point::new(0, 0), g.layout()).collect();
        assert_eq!(
            corner,
            vec![(1, Point::new(1, 0), 10), (4, Point::new(1, 1), 14), (3, Point::new(0, 1), 10)]
        );
        assert_eq!(n.around(Point::new(1, 1), g.layout()).count(), 8);
    }

    #[test]
    fn set_directions_reuses_table() {
        let mut n = Neighbors::new(&Direction::ALL);
        n.set_directions(&Direction::CARDINAL);
        assert_eq!(n.steps().len(), 4);
        assert!(n.steps().iter().all(|s| s.cost == 10));
    }
}

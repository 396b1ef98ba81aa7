//! The [`NavGrid`] type is the authoritative walkability lattice of one
//! navigable area.
//!
//! A `NavGrid` owns its [`Cell`]s by value in a flat row-major buffer. After
//! construction the only mutation is [`set_blockage`](NavGrid::set_blockage).
//! Out-of-range queries never panic: lookups return `None` and predicates
//! return `false`.

use std::fmt;

use glam::Vec2;

use crate::cell::Cell;
use crate::config::{ConfigError, GridConfig};
use crate::geom::{Point, Range};
use crate::layout::GridLayout;
use crate::snapshot::GridSnapshot;

/// Map character for a walkable cell.
pub const FLOOR_CHAR: char = '.';
/// Map character for a blocked cell.
pub const WALL_CHAR: char = '#';

/// A rectangular navigation grid.
#[derive(Debug, Clone, PartialEq)]
pub struct NavGrid {
    layout: GridLayout,
    cells: Vec<Cell>,
}

impl NavGrid {
    /// Create a grid from a validated configuration.
    pub fn new(config: GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let layout = GridLayout::from_config(&config);
        let cells = layout
            .range()
            .iter()
            .enumerate()
            .map(|(i, p)| Cell::new(p, i, config.blocked))
            .collect();
        log::debug!(
            "navgrid: created {}x{} grid (cell size {}, origin {})",
            config.width,
            config.height,
            config.cell_size,
            config.origin
        );
        Ok(Self { layout, cells })
    }

    /// Parse a grid from an ASCII map.
    ///
    /// Every line is one row, top row first (`y = 0`). [`WALL_CHAR`] marks a
    /// blocked cell and [`FLOOR_CHAR`] a walkable one; any other character
    /// is rejected. Leading and trailing blank lines are ignored. The width
    /// and height of `base` are replaced by the map's dimensions; its cell
    /// size and origin are kept.
    pub fn from_ascii(base: GridConfig, text: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = text
            .trim_matches(|c| c == '\n' || c == '\r')
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .collect();
        let Some(first) = lines.first() else {
            return Err(GridError::Empty);
        };
        let width = first.chars().count();
        if width == 0 {
            return Err(GridError::Empty);
        }

        let mut blocked = Vec::with_capacity(width * lines.len());
        for (y, line) in lines.iter().enumerate() {
            let mut found = 0;
            for (x, ch) in line.chars().enumerate() {
                match ch {
                    WALL_CHAR => blocked.push(true),
                    FLOOR_CHAR => blocked.push(false),
                    _ => {
                        return Err(GridError::InvalidChar {
                            ch,
                            pos: Point::new(x as i32, y as i32),
                        });
                    }
                }
                found += 1;
            }
            if found != width {
                return Err(GridError::InconsistentWidth {
                    line: y,
                    expected: width,
                    found,
                });
            }
        }

        let config = GridConfig {
            width: width as i32,
            height: lines.len() as i32,
            blocked: false,
            ..base
        };
        let mut grid = Self::new(config)?;
        for (cell, b) in grid.cells.iter_mut().zip(blocked) {
            cell.blocked = b;
        }
        Ok(grid)
    }

    /// Render the grid in the format accepted by [`from_ascii`](Self::from_ascii).
    pub fn to_ascii(&self) -> String {
        self.render(|_| None)
    }

    /// Render the grid as ASCII, letting `overlay` replace the character of
    /// any cell.
    pub fn render(&self, overlay: impl Fn(Point) -> Option<char>) -> String {
        let w = self.width() as usize;
        let mut out = String::with_capacity((w + 1) * self.height() as usize);
        for cell in &self.cells {
            let ch = overlay(cell.pos).unwrap_or(if cell.blocked {
                WALL_CHAR
            } else {
                FLOOR_CHAR
            });
            out.push(ch);
            if cell.pos.x as usize == w - 1 {
                out.push('\n');
            }
        }
        out
    }

    // -----------------------------------------------------------------------
    // Geometry
    // -----------------------------------------------------------------------

    /// Size, cell size and origin.
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
    pub fn cell_size(&self) -> f32 {
        self.layout.cell_size()
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.layout.origin()
    }

    /// The valid cell range.
    #[inline]
    pub fn range(&self) -> Range {
        self.layout.range()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.layout.contains(p)
    }

    /// Flat index of `p`, or `None` if out of range.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        self.layout.index(p)
    }

    /// Cell coordinate of a flat index.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        self.layout.point(idx)
    }

    /// Cell containing `world`; not bounds-checked.
    #[inline]
    pub fn world_to_cell(&self, world: Vec2) -> Point {
        self.layout.world_to_cell(world)
    }

    /// Lower corner of cell `p` in world space.
    #[inline]
    pub fn cell_to_world(&self, p: Point) -> Vec2 {
        self.layout.cell_to_world(p)
    }

    /// Center of cell `p` in world space.
    #[inline]
    pub fn cell_to_world_centered(&self, p: Point) -> Vec2 {
        self.layout.cell_to_world_centered(p)
    }

    // -----------------------------------------------------------------------
    // Cells
    // -----------------------------------------------------------------------

    /// The cell at `p`, or `None` outside `[0, width) × [0, height)`.
    #[inline]
    pub fn cell_at(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// The cell containing `world`, or `None` if it falls outside the grid.
    #[inline]
    pub fn cell_at_world(&self, world: Vec2) -> Option<&Cell> {
        self.cell_at(self.world_to_cell(world))
    }

    /// Whether `p` is inside the grid and not blocked.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.cell_at(p).is_some_and(Cell::is_walkable)
    }

    /// Block or unblock the cell at `p`, leaving every other cell untouched.
    ///
    /// Returns `false` without doing anything if `p` is out of range.
    pub fn set_blockage(&mut self, p: Point, blocked: bool) -> bool {
        let Some(i) = self.index(p) else {
            log::warn!("navgrid: set_blockage ignored for out-of-range cell {p}");
            return false;
        };
        self.cells[i].blocked = blocked;
        true
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of walkable cells.
    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_walkable()).count()
    }

    /// Copy of the blockage flags in row-major order (`true` = walkable).
    pub fn walkability(&self) -> Vec<bool> {
        self.cells.iter().map(Cell::is_walkable).collect()
    }

    /// Detached copy of the grid for searches that must not observe later
    /// mutation.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::new(self.layout, self.cells.clone())
    }
}

impl fmt::Display for NavGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ascii())
    }
}

/// Errors that can occur when building a grid from an ASCII map.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The map has no rows or an empty first row.
    Empty,
    /// A row's width differs from the first row's.
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than [`WALL_CHAR`] or [`FLOOR_CHAR`] was found.
    InvalidChar { ch: char, pos: Point },
    /// The resulting configuration was rejected.
    Config(ConfigError),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid map is empty"),
            Self::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(
                f,
                "grid map line {line} has width {found}, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "grid map contains invalid character {ch:?} at {pos}")
            }
            Self::Config(e) => write!(f, "invalid grid config: {e}"),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for GridError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

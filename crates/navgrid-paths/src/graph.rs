//! The in-place executor: A* over long-lived search records.

use glam::Vec2;
use navgrid_core::{NavGrid, Point};

use crate::config::SearchConfig;
use crate::direction::{Direction, Neighbors};
use crate::path::{Path, PathError};
use crate::scratch::{Generational, OpenSet, SearchNode};
use crate::search;

/// Synchronous pathfinder that keeps one search record per grid cell across
/// calls.
///
/// Every query reuses the same record array, open set and neighbor table, so
/// repeated queries allocate nothing after warm-up beyond the returned path.
/// Records are invalidated lazily by bumping a generation counter rather
/// than by sweeping the whole array. Searching needs `&mut self`: one
/// pathfinder runs one search at a time, on the caller's thread, to
/// completion.
#[derive(Debug, Default)]
pub struct GraphPathfinder {
    nodes: Vec<SearchNode>,
    generation: u32,
    open: OpenSet,
    neighbors: Neighbors,
    config: SearchConfig,
}

impl GraphPathfinder {
    /// Create a pathfinder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pathfinder with the given options.
    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create a pathfinder with records preallocated for `grid`.
    pub fn for_grid(grid: &NavGrid, config: SearchConfig) -> Self {
        let mut pf = Self::with_config(config);
        pf.reserve(grid.len());
        pf
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// Number of cells the record array currently covers.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Grow the record array to cover `len` cells. Never shrinks, so a
    /// pathfinder can serve several grids of different sizes.
    fn reserve(&mut self, len: usize) {
        if len > self.nodes.len() {
            self.nodes.resize(len, SearchNode::fresh(self.generation));
        }
    }

    /// Start a new search generation, invalidating every record.
    fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale records could alias the new generation.
            self.nodes.fill(SearchNode::fresh(0));
            self.generation = 1;
        }
        self.generation
    }

    /// Find a path between two world positions.
    ///
    /// Returns the cell-centered world waypoints from start to goal
    /// inclusive, or an empty vector if either position is off the grid or
    /// the goal cannot be reached. An empty `dirs` allows all eight
    /// directions.
    pub fn find_path(
        &mut self,
        grid: &NavGrid,
        start: Vec2,
        end: Vec2,
        dirs: &[Direction],
    ) -> Vec<Vec2> {
        match self.try_find_path_world(grid, start, end, dirs) {
            Ok(path) => path.to_world(grid.layout()),
            Err(_) => Vec::new(),
        }
    }

    /// Like [`find_path`](Self::find_path) but reports why no path exists.
    pub fn try_find_path_world(
        &mut self,
        grid: &NavGrid,
        start: Vec2,
        end: Vec2,
        dirs: &[Direction],
    ) -> Result<Path, PathError> {
        let start = grid.world_to_cell(start);
        let end = grid.world_to_cell(end);
        self.try_find_path(grid, start, end, dirs)
    }

    /// Find a path between two cells. Returns the empty path on failure.
    pub fn find_cell_path(
        &mut self,
        grid: &NavGrid,
        start: Point,
        end: Point,
        dirs: &[Direction],
    ) -> Path {
        self.try_find_path(grid, start, end, dirs).unwrap_or_default()
    }

    /// Find a path between two cells, distinguishing invalid queries from
    /// unreachable goals.
    pub fn try_find_path(
        &mut self,
        grid: &NavGrid,
        start: Point,
        end: Point,
        dirs: &[Direction],
    ) -> Result<Path, PathError> {
        let started = search::start_timer(&self.config);

        self.reserve(grid.len());
        let generation = self.next_generation();
        self.neighbors.set_directions(dirs);

        let cells = grid.cells();
        let mut store = Generational {
            nodes: &mut self.nodes,
            generation,
        };
        let result = search::astar(
            &mut store,
            &mut self.open,
            &self.neighbors,
            grid.layout(),
            |i| cells[i].is_walkable(),
            start,
            end,
            &self.config,
        );

        search::log_timing("graph", start, end, &result, started);
        result
    }
}

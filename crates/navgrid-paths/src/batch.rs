//! The isolated executor: A* as a self-contained job over a grid snapshot.
//!
//! A job owns everything it reads and writes. The walkability copy travels
//! with it as a [`GridSnapshot`]; the search records, neighbor table, open
//! set and reconstruction buffer are allocated when it runs and dropped
//! before it returns, on every exit path. Nothing a job touches is shared
//! with the authoritative grid, so jobs can run on any thread and in any
//! number.

use glam::Vec2;
use navgrid_core::{GridSnapshot, Point, SharedGrid};
use rayon::prelude::*;

use crate::config::SearchConfig;
use crate::direction::{Direction, Neighbors};
use crate::path::{Path, PathError};
use crate::scratch::{OpenSet, SearchNode};
use crate::search;

/// Find a path over a snapshot. Returns the empty path on failure.
///
/// An empty `dirs` allows all eight directions.
pub fn find_path_batch(
    start: Point,
    end: Point,
    snapshot: &GridSnapshot,
    dirs: &[Direction],
) -> Path {
    try_find_path_batch(start, end, snapshot, dirs, &SearchConfig::default()).unwrap_or_default()
}

/// Find a path over a snapshot, distinguishing invalid queries from
/// unreachable goals.
pub fn try_find_path_batch(
    start: Point,
    end: Point,
    snapshot: &GridSnapshot,
    dirs: &[Direction],
    config: &SearchConfig,
) -> Result<Path, PathError> {
    let started = search::start_timer(config);

    let neighbors = Neighbors::new(dirs);
    let mut nodes = vec![SearchNode::default(); snapshot.len()];
    let mut open = OpenSet::with_capacity(64);

    let result = search::astar(
        &mut nodes,
        &mut open,
        &neighbors,
        snapshot.layout(),
        |i| snapshot.is_walkable_index(i),
        start,
        end,
        config,
    );

    search::log_timing("batch", start, end, &result, started);
    result
}

/// One unit of pathfinding work.
///
/// Carries its own snapshot, so it is `Send` and may outlive any borrow of
/// the grid it was taken from.
#[derive(Debug, Clone)]
pub struct PathJob {
    pub start: Point,
    pub end: Point,
    pub snapshot: GridSnapshot,
    /// Allowed moves; empty means all eight.
    pub directions: Vec<Direction>,
    pub config: SearchConfig,
}

impl PathJob {
    /// A job between two cells with every direction allowed.
    pub fn new(snapshot: GridSnapshot, start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            snapshot,
            directions: Vec::new(),
            config: SearchConfig::default(),
        }
    }

    /// A job between two world positions. The positions are resolved to
    /// cells now; range checks happen when the job runs.
    pub fn from_world(snapshot: GridSnapshot, start: Vec2, end: Vec2) -> Self {
        let start = snapshot.world_to_cell(start);
        let end = snapshot.world_to_cell(end);
        Self::new(snapshot, start, end)
    }

    /// Snapshot a shared grid and build a job between two world positions.
    ///
    /// The grid's read lock is held only while the cells are copied.
    pub fn from_shared(grid: &SharedGrid, start: Vec2, end: Vec2) -> Self {
        Self::from_world(grid.snapshot(), start, end)
    }

    /// Restrict the allowed moves (builder).
    pub fn with_directions(mut self, dirs: &[Direction]) -> Self {
        self.directions = dirs.to_vec();
        self
    }

    /// Set search options (builder).
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the job, consuming it. Returns the empty path on failure.
    pub fn run(self) -> Path {
        self.try_run().unwrap_or_default()
    }

    /// Run the job, consuming it and reporting why no path exists.
    pub fn try_run(self) -> Result<Path, PathError> {
        try_find_path_batch(
            self.start,
            self.end,
            &self.snapshot,
            &self.directions,
            &self.config,
        )
    }

    /// Centered world waypoints of `path` on this job's grid.
    pub fn waypoints(&self, path: &Path) -> Vec<Vec2> {
        path.to_world(self.snapshot.layout())
    }
}

/// Run many jobs on the rayon thread pool. Results are in input order.
pub fn run_jobs(jobs: Vec<PathJob>) -> Vec<Path> {
    log::debug!("batch: running {} path jobs", jobs.len());
    jobs.into_par_iter().map(PathJob::run).collect()
}

/// Answer many queries against one snapshot in parallel. Results are in
/// input order.
pub fn find_paths_batch(
    snapshot: &GridSnapshot,
    queries: &[(Point, Point)],
    dirs: &[Direction],
    config: &SearchConfig,
) -> Vec<Path> {
    queries
        .par_iter()
        .map(|&(start, end)| {
            try_find_path_batch(start, end, snapshot, dirs, config).unwrap_or_default()
        })
        .collect()
}

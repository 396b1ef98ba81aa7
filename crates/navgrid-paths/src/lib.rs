//! A* pathfinding on navigation grids.
//!
//! Two executors run the same search and return the same paths:
//!
//! - [`GraphPathfinder`] searches the authoritative [`NavGrid`] in place,
//!   reusing one record per cell across calls. Synchronous, one search at a
//!   time, no allocation after warm-up beyond the result.
//! - [`PathJob`] / [`find_path_batch`] search a [`GridSnapshot`] with
//!   job-scoped scratch storage, so any number of searches can run on other
//!   threads while the grid keeps changing. [`run_jobs`] fans jobs out on
//!   the rayon pool.
//!
//! Moves are restricted per query with a [`Direction`] list; an empty list
//! allows all eight. Orthogonal moves cost 10 and diagonal moves 14, and the
//! heuristic is the octile distance.
//!
//! [`NavGrid`]: navgrid_core::NavGrid
//! [`GridSnapshot`]: navgrid_core::GridSnapshot

mod batch;
mod config;
mod direction;
mod distance;
mod graph;
mod path;
mod scratch;
mod search;

pub use batch::{PathJob, find_path_batch, find_paths_batch, run_jobs, try_find_path_batch};
pub use config::{BlockedStartPolicy, SearchConfig};
pub use direction::{Direction, Neighbors, Step, resolve};
pub use distance::{DIAGONAL_COST, ORTHOGONAL_COST, chebyshev, manhattan, octile};
pub use graph::GraphPathfinder;
pub use path::{Path, PathError};

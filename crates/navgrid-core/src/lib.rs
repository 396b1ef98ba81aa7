//! **navgrid-core**: navigation grid core types.
//!
//! This crate provides the spatial side of the *navgrid* workspace:
//! integer cell geometry, the walkability lattice of a navigable area, the
//! mapping between world space and cell coordinates, and detached snapshots
//! for searches that run away from the authoritative grid.
//!
//! Pathfinding itself lives in `navgrid-paths`.

pub mod cell;
pub mod config;
pub mod geom;
pub mod grid;
pub mod layout;
pub mod shared;
pub mod snapshot;

pub use cell::Cell;
pub use config::{ConfigError, GridConfig, MAX_CELLS};
pub use geom::{Point, Range};
pub use glam::Vec2;
pub use grid::{FLOOR_CHAR, GridError, NavGrid, WALL_CHAR};
pub use layout::GridLayout;
pub use shared::SharedGrid;
pub use snapshot::GridSnapshot;

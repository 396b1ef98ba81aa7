//! The [`SharedGrid`] type is a thread-safe handle on an authoritative grid.
//!
//! Blockage changes take the write lock; snapshots take the read lock only
//! for the duration of the copy. A snapshot therefore always observes a
//! state between two whole updates, never a half-applied one.

use std::sync::Arc;

use glam::Vec2;
use parking_lot::{RwLock, RwLockReadGuard};

use crate::geom::Point;
use crate::grid::NavGrid;
use crate::snapshot::GridSnapshot;

/// Cloneable, `Send + Sync` handle on a [`NavGrid`].
///
/// Cloning yields another handle on the **same** grid.
#[derive(Debug, Clone)]
pub struct SharedGrid {
    inner: Arc<RwLock<NavGrid>>,
}

impl SharedGrid {
    pub fn new(grid: NavGrid) -> Self {
        Self {
            inner: Arc::new(RwLock::new(grid)),
        }
    }

    /// Block or unblock one cell. Returns `false` if `p` is out of range.
    pub fn set_blockage(&self, p: Point, blocked: bool) -> bool {
        self.inner.write().set_blockage(p, blocked)
    }

    /// Apply several changes under a single write lock.
    pub fn update<R>(&self, f: impl FnOnce(&mut NavGrid) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut *guard)
    }

    /// Copy the current cells out under the read lock.
    pub fn snapshot(&self) -> GridSnapshot {
        self.inner.read().snapshot()
    }

    /// Read access to the grid. Holding the guard blocks writers.
    pub fn read(&self) -> RwLockReadGuard<'_, NavGrid> {
        self.inner.read()
    }

    pub fn is_walkable(&self, p: Point) -> bool {
        self.inner.read().is_walkable(p)
    }

    /// Cell containing `world`; not bounds-checked. The layout never changes
    /// after construction, so the answer cannot go stale.
    pub fn world_to_cell(&self, world: Vec2) -> Point {
        self.inner.read().world_to_cell(world)
    }

    /// Take the grid back if this is the last handle.
    pub fn try_unwrap(self) -> Result<NavGrid, Self> {
        Arc::try_unwrap(self.inner)
            .map(|lock| lock.into_inner())
            .map_err(|inner| Self { inner })
    }
}

impl From<NavGrid> for SharedGrid {
    fn from(grid: NavGrid) -> Self {
        Self::new(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GridConfig;
    use std::thread;

    fn shared(w: i32, h: i32) -> SharedGrid {
        SharedGrid::new(NavGrid::new(GridConfig::new(w, h)).unwrap())
    }

    #[test]
    fn handles_share_state() {
        let a = shared(3, 3);
        let b = a.clone();
        assert!(a.set_blockage(Point::new(2, 2), true));
        assert!(!b.is_walkable(Point::new(2, 2)));
        assert!(!b.set_blockage(Point::new(3, 3), true));
    }

    #[test]
    fn snapshot_sees_whole_updates_only() {
        let grid = shared(8, 1);
        let writer = {
            let grid = grid.clone();
            thread::spawn(move || {
                for i in 0..500 {
                    let blocked = i % 2 == 0;
                    grid.update(|g| {
                        for x in 0..8 {
                            g.set_blockage(Point::new(x, 0), blocked);
                        }
                    });
                }
            })
        };
        for _ in 0..500 {
            let snap = grid.snapshot();
            let walkable = snap.cells().iter().filter(|c| c.is_walkable()).count();
            assert!(walkable == 0 || walkable == 8, "torn snapshot: {walkable}");
        }
        writer.join().unwrap();
    }

    #[test]
    fn try_unwrap_last_handle() {
        let a = shared(2, 2);
        let b = a.clone();
        let a = a.try_unwrap().unwrap_err();
        drop(b);
        let grid = a.try_unwrap().unwrap();
        assert_eq!(grid.len(), 4);
    }
}

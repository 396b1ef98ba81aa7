//! The A* loop shared by both executors.
//!
//! Costs are octile (10 orthogonal, 14 diagonal) and the heuristic is the
//! octile distance to the goal. The open member with the lowest `f` is
//! expanded next; ties go to whichever entered the open set first.
//! Neighbors are evaluated in the order of the caller's direction list.

use std::time::{Duration, Instant};

use navgrid_core::{GridLayout, Point};

use crate::config::{BlockedStartPolicy, SearchConfig};
use crate::direction::Neighbors;
use crate::distance::octile;
use crate::path::{Path, PathError};
use crate::scratch::{NO_PARENT, NodeState, NodeStore, OpenSet};

/// Run one search from `start` to `goal`.
///
/// `walkable` answers for flat indices inside `layout`. `nodes` must hold a
/// valid (fresh or generation-checked) record for every index.
#[allow(clippy::too_many_arguments)]
pub(crate) fn astar<N: NodeStore>(
    nodes: &mut N,
    open: &mut OpenSet,
    neighbors: &Neighbors,
    layout: &GridLayout,
    walkable: impl Fn(usize) -> bool,
    start: Point,
    goal: Point,
    config: &SearchConfig,
) -> Result<Path, PathError> {
    let Some(start_idx) = layout.index(start) else {
        return Err(PathError::StartOutOfRange(start));
    };
    let Some(goal_idx) = layout.index(goal) else {
        return Err(PathError::GoalOutOfRange(goal));
    };
    if config.blocked_start == BlockedStartPolicy::Reject && !walkable(start_idx) {
        return Err(PathError::StartBlocked(start));
    }
    if start_idx == goal_idx {
        return Ok(Path::new(vec![start], 0));
    }
    // A blocked goal is never opened; skip the exhaustive search.
    if !walkable(goal_idx) {
        return Err(PathError::Unreachable { start, goal });
    }

    open.clear();
    {
        let h = octile(start, goal);
        let n = nodes.node_mut(start_idx);
        n.g = 0;
        n.h = h;
        n.f = h;
        n.came_from = NO_PARENT;
        n.state = NodeState::Open;
        n.seq = open.insert(start_idx, h);
    }

    let mut expanded = 0usize;
    while let Some(entry) = open.pop() {
        let ci = entry.idx;
        let current = *nodes.node_mut(ci);

        // Superseded entry of a record that was improved or already closed.
        if current.state != NodeState::Open || current.f != entry.f {
            continue;
        }

        if ci == goal_idx {
            log::trace!("astar: {start} -> {goal} found after {expanded} expansions");
            return Ok(reconstruct(nodes, layout, goal_idx, current.g));
        }

        nodes.node_mut(ci).state = NodeState::Closed;
        expanded += 1;

        for (ni, np, step_cost) in neighbors.around(layout.point(ci), layout) {
            let n = nodes.node_mut(ni);
            if n.state == NodeState::Closed {
                continue;
            }
            if !walkable(ni) {
                n.state = NodeState::Closed;
                continue;
            }

            let tentative_g = current.g.saturating_add(step_cost);
            if tentative_g >= n.g {
                continue;
            }

            let h = if n.state == NodeState::Open {
                n.h
            } else {
                octile(np, goal)
            };
            n.came_from = ci;
            n.g = tentative_g;
            n.h = h;
            n.f = tentative_g.saturating_add(h);
            if n.state == NodeState::Open {
                open.decrease(ni, n.f, n.seq);
            } else {
                n.state = NodeState::Open;
                n.seq = open.insert(ni, n.f);
            }
        }
    }

    log::trace!("astar: {start} -> {goal} exhausted after {expanded} expansions");
    Err(PathError::Unreachable { start, goal })
}

fn reconstruct<N: NodeStore>(
    nodes: &mut N,
    layout: &GridLayout,
    goal_idx: usize,
    cost: i32,
) -> Path {
    let mut cells = Vec::new();
    let mut ci = goal_idx;
    while ci != NO_PARENT {
        cells.push(layout.point(ci));
        ci = nodes.node_mut(ci).came_from;
    }
    cells.reverse();
    Path::new(cells, cost)
}

/// Start a timer if timing logs are on.
#[inline]
pub(crate) fn start_timer(config: &SearchConfig) -> Option<Instant> {
    config.log_timing.then(Instant::now)
}

/// Emit the timing summary of one search.
pub(crate) fn log_timing(
    executor: &str,
    start: Point,
    goal: Point,
    result: &Result<Path, PathError>,
    started: Option<Instant>,
) {
    let Some(t) = started else {
        return;
    };
    let elapsed: Duration = t.elapsed();
    match result {
        Ok(path) => log::debug!(
            "{executor}: {start} -> {goal}: {} waypoints, cost {}, {elapsed:?}",
            path.len(),
            path.cost()
        ),
        Err(e) => log::debug!("{executor}: {start} -> {goal}: {e}, {elapsed:?}"),
    }
}

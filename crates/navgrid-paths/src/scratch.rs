//! Per-cell search records and the open set.
//!
//! Both executors run the same A* loop over these types; they only differ in
//! where the records live and how long they survive.

use std::collections::BinaryHeap;

/// Sentinel `g` for a record no path has reached yet.
pub(crate) const UNREACHABLE: i32 = i32::MAX;

/// Sentinel predecessor index.
pub(crate) const NO_PARENT: usize = usize::MAX;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum NodeState {
    Unvisited,
    Open,
    Closed,
}

/// Search state of one cell, keyed by the cell's flat index.
#[derive(Copy, Clone, Debug)]
pub(crate) struct SearchNode {
    /// Best known cost from the start.
    pub(crate) g: i32,
    /// Heuristic estimate to the goal.
    pub(crate) h: i32,
    /// `g + h`.
    pub(crate) f: i32,
    pub(crate) came_from: usize,
    /// Position in the open set's insertion order.
    pub(crate) seq: u64,
    pub(crate) state: NodeState,
    /// Search this record belongs to (long-lived scratch only).
    pub(crate) generation: u32,
}

impl SearchNode {
    #[inline]
    pub(crate) const fn fresh(generation: u32) -> Self {
        Self {
            g: UNREACHABLE,
            h: 0,
            f: UNREACHABLE,
            came_from: NO_PARENT,
            seq: 0,
            state: NodeState::Unvisited,
            generation,
        }
    }
}

impl Default for SearchNode {
    fn default() -> Self {
        Self::fresh(0)
    }
}

/// Storage for search records.
pub(crate) trait NodeStore {
    /// The record for `idx`, valid for the current search.
    fn node_mut(&mut self, idx: usize) -> &mut SearchNode;
}

/// Job-scoped records: freshly allocated, every entry valid.
impl NodeStore for Vec<SearchNode> {
    #[inline]
    fn node_mut(&mut self, idx: usize) -> &mut SearchNode {
        &mut self[idx]
    }
}

/// Long-lived records, lazily invalidated by a generation counter.
pub(crate) struct Generational<'a> {
    pub(crate) nodes: &'a mut [SearchNode],
    pub(crate) generation: u32,
}

impl NodeStore for Generational<'_> {
    #[inline]
    fn node_mut(&mut self, idx: usize) -> &mut SearchNode {
        let n = &mut self.nodes[idx];
        if n.generation != self.generation {
            *n = SearchNode::fresh(self.generation);
        }
        n
    }
}

// ---------------------------------------------------------------------------
// Open set
// ---------------------------------------------------------------------------

/// Open-set entry, ordered so `BinaryHeap` pops the lowest `f` first and,
/// among equal `f`, the record that entered the open set first.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub(crate) struct OpenEntry {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) seq: u64,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue over open records.
///
/// Selection is equivalent to scanning an insertion-ordered open list for
/// the first minimum `f`. A record improved while open keeps its original
/// sequence number, so it keeps its place in that order; the superseded
/// heap entry is skipped when popped.
#[derive(Debug, Default)]
pub(crate) struct OpenSet {
    heap: BinaryHeap<OpenEntry>,
    next_seq: u64,
}

impl OpenSet {
    pub(crate) fn with_capacity(cap: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(cap),
            next_seq: 0,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }

    /// Add a new record; returns its sequence number.
    pub(crate) fn insert(&mut self, idx: usize, f: i32) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(OpenEntry { idx, f, seq });
        seq
    }

    /// Re-queue a record that is already open with a lower `f`.
    pub(crate) fn decrease(&mut self, idx: usize, f: i32, seq: u64) {
        self.heap.push(OpenEntry { idx, f, seq });
    }

    pub(crate) fn pop(&mut self) -> Option<OpenEntry> {
        self.heap.pop()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}

//! The open set, ordered by `f` with an insertion-order tie-break.
//!
//! Relaxation lowers a node's `f` in place, so the heap may hold several
//! entries for one node. Only the entry whose `f` matches the node's current
//! value is live; the others are skipped when popped.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::config::TieBreak;
use crate::node::{NodeId, SearchNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Entry {
    f: i32,
    /// Larger rank wins among equal `f`.
    rank: u64,
    id: NodeId,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: reverse `f` so the smallest pops first.
        other
            .f
            .cmp(&self.f)
            .then(self.rank.cmp(&other.rank))
            .then(self.id.cmp(&other.id))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
    live: usize,
    tie_break: TieBreak,
}

impl Frontier {
    pub(crate) fn reset(&mut self, tie_break: TieBreak) {
        self.heap.clear();
        self.live = 0;
        self.tie_break = tie_break;
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.live == 0
    }

    fn entry(&self, id: NodeId, node: &SearchNode) -> Entry {
        let rank = match self.tie_break {
            TieBreak::Newest => node.sequence,
            TieBreak::Oldest => u64::MAX - node.sequence,
        };
        Entry {
            f: node.f,
            rank,
            id,
        }
    }

    /// Add a newly discovered node.
    pub(crate) fn push(&mut self, id: NodeId, node: &SearchNode) {
        let e = self.entry(id, node);
        self.heap.push(e);
        self.live += 1;
    }

    /// Record a lowered `f` for a node already in the frontier.
    pub(crate) fn update(&mut self, id: NodeId, node: &SearchNode) {
        let e = self.entry(id, node);
        self.heap.push(e);
    }

    /// Remove and return the best live node. `is_live(id, f)` must report
    /// whether `id` is still open with exactly that `f`.
    pub(crate) fn pop(&mut self, is_live: impl Fn(NodeId, i32) -> bool) -> Option<NodeId> {
        while let Some(e) = self.heap.pop() {
            if is_live(e.id, e.f) {
                self.live -= 1;
                return Some(e.id);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_core::Point;

    fn node(f: i32, sequence: u64) -> SearchNode {
        // h = 0 so that f == g.
        SearchNode::new(Point::ZERO, f, Point::ZERO, None, sequence)
    }

    #[test]
    fn lowest_f_first() {
        let mut fr = Frontier::default();
        fr.reset(TieBreak::Newest);
        let nodes = [node(5, 0), node(3, 1), node(4, 2)];
        for (i, n) in nodes.iter().enumerate() {
            fr.push(i, n);
        }
        let order: Vec<_> = std::iter::from_fn(|| fr.pop(|_, _| true)).collect();
        assert_eq!(order, vec![1, 2, 0]);
        assert!(fr.is_empty());
    }

    #[test]
    fn newest_wins_ties() {
        let mut fr = Frontier::default();
        fr.reset(TieBreak::Newest);
        let nodes = [node(4, 1), node(4, 2), node(4, 3)];
        for (i, n) in nodes.iter().enumerate() {
            fr.push(i, n);
        }
        assert_eq!(fr.pop(|_, _| true), Some(2));
        assert_eq!(fr.pop(|_, _| true), Some(1));
        assert_eq!(fr.len(), 1);
    }

    #[test]
    fn oldest_wins_ties() {
        let mut fr = Frontier::default();
        fr.reset(TieBreak::Oldest);
        let nodes = [node(4, 1), node(4, 2), node(4, 3)];
        for (i, n) in nodes.iter().enumerate() {
            fr.push(i, n);
        }
        assert_eq!(fr.pop(|_, _| true), Some(0));
    }

    #[test]
    fn stale_entries_are_skipped() {
        let mut fr = Frontier::default();
        fr.reset(TieBreak::Newest);
        let mut nodes = vec![node(6, 1), node(5, 2)];
        fr.push(0, &nodes[0]);
        fr.push(1, &nodes[1]);
        nodes[0].reroute(9, 4);
        fr.update(0, &nodes[0]);
        assert_eq!(fr.len(), 2);

        let live = |id: NodeId, f: i32| nodes[id].f == f;
        assert_eq!(fr.pop(live), Some(0));
        assert_eq!(fr.pop(live), Some(1));
        // The f=6 entry for node 0 is left behind and must not count.
        assert_eq!(fr.pop(live), None);
        assert!(fr.is_empty());
    }
}

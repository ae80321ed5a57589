use gridpath_core::Point;

/// Index of a node in the per-search arena.
pub(crate) type NodeId = usize;

/// Cell-table marker for a cell with no node this search.
pub(crate) const NO_NODE: NodeId = usize::MAX;

/// Where a discovered cell currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeState {
    /// Discovered but not yet expanded (open set).
    Frontier,
    /// Expanded; never reopened (closed set).
    Visited,
}

/// A grid cell as discovered during one search run.
#[derive(Debug, Clone)]
pub(crate) struct SearchNode {
    pub(crate) coord: Point,
    pub(crate) g: i32,
    /// Manhattan distance to the goal, fixed at creation.
    pub(crate) h: i32,
    /// Always `g + h`.
    pub(crate) f: i32,
    pub(crate) parent: Option<NodeId>,
    /// Creation order within the search; never changes after creation.
    pub(crate) sequence: u64,
    pub(crate) state: NodeState,
}

impl SearchNode {
    pub(crate) fn new(
        coord: Point,
        g: i32,
        goal: Point,
        parent: Option<NodeId>,
        sequence: u64,
    ) -> Self {
        let h = coord.manhattan(goal);
        Self {
            coord,
            g,
            h,
            f: g + h,
            parent,
            sequence,
            state: NodeState::Frontier,
        }
    }

    /// Re-parent onto a strictly shorter route. `sequence` is left alone.
    #[inline]
    pub(crate) fn reroute(&mut self, parent: NodeId, g: i32) {
        self.parent = Some(parent);
        self.g = g;
        self.f = g + self.h;
    }
}

/// Read-only view of a node left over from the last search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeInfo {
    pub coord: Point,
    /// Steps from the start along the best known route.
    pub g: i32,
    /// Manhattan distance to the goal.
    pub h: i32,
    pub f: i32,
    /// Discovery order; the start node is 0.
    pub sequence: u64,
    /// Cell this node was reached from, `None` for the start.
    pub parent: Option<Point>,
    pub state: NodeState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_fixed_at_creation() {
        let mut n = SearchNode::new(Point::new(1, 1), 5, Point::new(4, 3), None, 7);
        assert_eq!(n.h, 5);
        assert_eq!(n.f, 10);
        n.reroute(3, 2);
        assert_eq!(n.h, 5);
        assert_eq!(n.g, 2);
        assert_eq!(n.f, 7);
        assert_eq!(n.parent, Some(3));
        assert_eq!(n.sequence, 7);
        assert_eq!(n.state, NodeState::Frontier);
    }
}

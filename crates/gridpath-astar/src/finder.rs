use gridpath_core::{Point, Range};

use crate::config::{SearchConfig, Termination};
use crate::error::InvalidRequest;
use crate::frontier::Frontier;
use crate::node::{NO_NODE, NodeId, NodeInfo, NodeState, SearchNode};
use crate::traits::GridProvider;

/// Neighbour enumeration order: +y, -y, +x, -x.
///
/// Only affects which of several equally short paths is returned.
const DIRS: [Point; 4] = [
    Point::new(0, 1),
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(-1, 0),
];

/// Result of a search that ran.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Cells from the one after the start up to and including the goal.
    /// Empty when start and goal coincide.
    Found(Vec<Point>),
    /// The frontier ran dry before the goal was reached.
    NotFound,
}

impl Outcome {
    /// The path, if one was found.
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            Self::Found(path) => Some(path),
            Self::NotFound => None,
        }
    }

    /// Number of steps of the found path.
    pub fn len(&self) -> Option<usize> {
        self.path().map(<[Point]>::len)
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Owned copy of the open and closed sets left by a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchSnapshot {
    /// Frontier cells in row-major order.
    pub frontier: Vec<Point>,
    /// Visited cells in row-major order.
    pub visited: Vec<Point>,
}

/// A* search engine for 4-connected, unit-cost grids.
///
/// Each call to [`search`](Self::search) starts from a clean slate; only the
/// buffers are reused. The nodes of the most recent search stay readable
/// through [`frontier`](Self::frontier), [`visited`](Self::visited),
/// [`node_at`](Self::node_at) and [`snapshot`](Self::snapshot) until the
/// next call.
#[derive(Debug, Default)]
pub struct PathFinder {
    config: SearchConfig,
    rng: Range,
    width: usize,
    /// Node arena for the current search.
    nodes: Vec<SearchNode>,
    /// Flat cell table: node index per cell, or [`NO_NODE`].
    cells: Vec<NodeId>,
    frontier: Frontier,
    next_sequence: u64,
}

impl PathFinder {
    /// Create a finder with the default policies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a finder with the given policies.
    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Change the policies used by subsequent searches.
    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// Find a shortest path from `start` to `goal` over `grid`.
    ///
    /// Fails fast with [`InvalidRequest`] when an endpoint is out of bounds
    /// or blocked, or the bounds are too large to index. A failed request
    /// clears the state of the previous search. The grid is never modified.
    pub fn search<G: GridProvider>(
        &mut self,
        grid: &G,
        start: Point,
        goal: Point,
    ) -> Result<Outcome, InvalidRequest> {
        if let Err(err) = validate(grid, start, goal) {
            self.reset(Range::default());
            return Err(err);
        }
        self.reset(grid.bounds());

        let start_id = self.alloc(start, 0, None, goal);
        if start == goal {
            self.close(start_id);
            log::debug!("search {start} -> {goal}: already at goal");
            return Ok(Outcome::Found(Vec::new()));
        }

        // The start is expanded up front, then closed.
        self.expand(grid, start_id, goal);
        self.close(start_id);

        let outcome = loop {
            if self.frontier.is_empty() {
                break Outcome::NotFound;
            }
            if self.config.termination == Termination::OnDiscovery {
                if let Some(goal_id) = self.frontier_node(goal) {
                    break Outcome::Found(self.reconstruct(goal_id));
                }
            }

            let nodes = &self.nodes;
            let Some(current) = self
                .frontier
                .pop(|id, f| nodes[id].state == NodeState::Frontier && nodes[id].f == f)
            else {
                break Outcome::NotFound;
            };
            self.close(current);

            if self.nodes[current].coord == goal {
                // Only reachable with `Termination::OnExpansion`.
                break Outcome::Found(self.reconstruct(current));
            }
            self.expand(grid, current, goal);
        };

        log::debug!(
            "search {start} -> {goal}: {} ({} frontier, {} visited)",
            match &outcome {
                Outcome::Found(path) => format!("found, {} steps", path.len()),
                Outcome::NotFound => "no path".to_string(),
            },
            self.frontier.len(),
            self.nodes.len() - self.frontier.len(),
        );
        Ok(outcome)
    }

    /// Discover the walkable neighbours of `id`, relaxing those already in
    /// the frontier. Visited neighbours are never reopened.
    fn expand<G: GridProvider>(&mut self, grid: &G, id: NodeId, goal: Point) {
        let coord = self.nodes[id].coord;
        let g = self.nodes[id].g;

        for d in DIRS {
            let Some(np) = coord.checked_add(d) else {
                continue;
            };
            let Some(ci) = self.idx(np) else {
                continue;
            };
            if grid.is_obstacle(np) {
                continue;
            }
            match self.cells[ci] {
                NO_NODE => {
                    self.discover(np, g + 1, Some(id), goal);
                }
                existing => match self.nodes[existing].state {
                    NodeState::Visited => {}
                    NodeState::Frontier => {
                        self.relax(existing, id);
                    }
                },
            }
        }
    }

    /// Re-parent `existing` onto `candidate` if that route is strictly
    /// shorter. Returns whether the node changed.
    fn relax(&mut self, existing: NodeId, candidate: NodeId) -> bool {
        let g = self.nodes[candidate].g + 1;
        if self.nodes[existing].g <= g {
            return false;
        }
        let node = &mut self.nodes[existing];
        log::trace!("relax {}: g {} -> {}", node.coord, node.g, g);
        node.reroute(candidate, g);
        self.frontier.update(existing, &self.nodes[existing]);
        true
    }

    /// Create a frontier node for `p`.
    fn discover(&mut self, p: Point, g: i32, parent: Option<NodeId>, goal: Point) -> NodeId {
        let id = self.alloc(p, g, parent, goal);
        self.frontier.push(id, &self.nodes[id]);
        id
    }

    /// Create a node for `p` and take the next sequence number.
    fn alloc(&mut self, p: Point, g: i32, parent: Option<NodeId>, goal: Point) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(SearchNode::new(p, g, goal, parent, self.next_sequence));
        self.next_sequence += 1;
        if let Some(ci) = self.idx(p) {
            self.cells[ci] = id;
        }
        id
    }

    fn close(&mut self, id: NodeId) {
        self.nodes[id].state = NodeState::Visited;
    }

    fn frontier_node(&self, p: Point) -> Option<NodeId> {
        let id = self.cells[self.idx(p)?];
        (id != NO_NODE && self.nodes[id].state == NodeState::Frontier).then_some(id)
    }

    /// Follow parent links back to (excluding) the start, then reverse.
    fn reconstruct(&self, mut id: NodeId) -> Vec<Point> {
        let mut path = Vec::with_capacity(self.nodes[id].g.max(0) as usize);
        while let Some(parent) = self.nodes[id].parent {
            path.push(self.nodes[id].coord);
            id = parent;
        }
        path.reverse();
        path
    }

    fn reset(&mut self, rng: Range) {
        self.rng = rng;
        self.width = rng.width().max(0) as usize;
        self.nodes.clear();
        self.cells.clear();
        self.cells.resize(rng.len(), NO_NODE);
        self.frontier.reset(self.config.tie_break);
        self.next_sequence = 0;
    }

    // -----------------------------------------------------------------------
    // Read-only views of the last search
    // -----------------------------------------------------------------------

    /// Bounds of the grid searched last.
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Frontier cells of the last search, row-major.
    pub fn frontier(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells_in(NodeState::Frontier)
    }

    /// Visited cells of the last search, row-major. Includes the start.
    pub fn visited(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells_in(NodeState::Visited)
    }

    /// The node discovered for `p` by the last search, if any.
    pub fn node_at(&self, p: Point) -> Option<NodeInfo> {
        let id = *self.cells.get(self.idx(p)?)?;
        if id == NO_NODE {
            return None;
        }
        let n = &self.nodes[id];
        Some(NodeInfo {
            coord: n.coord,
            g: n.g,
            h: n.h,
            f: n.f,
            sequence: n.sequence,
            parent: n.parent.map(|pi| self.nodes[pi].coord),
            state: n.state,
        })
    }

    /// Owned copy of the frontier and visited sets.
    pub fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            frontier: self.frontier().collect(),
            visited: self.visited().collect(),
        }
    }

    fn cells_in(&self, state: NodeState) -> impl Iterator<Item = Point> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |&(_, &id)| id != NO_NODE && self.nodes[id].state == state)
            .map(move |(ci, _)| self.point(ci))
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}

pub(crate) fn validate<G: GridProvider>(
    grid: &G,
    start: Point,
    goal: Point,
) -> Result<(), InvalidRequest> {
    let bounds = grid.bounds();
    check_bounds(bounds)?;
    if !bounds.contains(start) {
        return Err(InvalidRequest::StartOutOfBounds(start));
    }
    if !bounds.contains(goal) {
        return Err(InvalidRequest::GoalOutOfBounds(goal));
    }
    if grid.is_obstacle(start) {
        return Err(InvalidRequest::StartBlocked(start));
    }
    if grid.is_obstacle(goal) {
        return Err(InvalidRequest::GoalBlocked(goal));
    }
    Ok(())
}

/// Rejects bounds whose sides or cell count overflow the index arithmetic.
pub(crate) fn check_bounds(bounds: Range) -> Result<(), InvalidRequest> {
    if bounds.is_empty() {
        return Ok(());
    }
    let fits = match (bounds.checked_width(), bounds.checked_height()) {
        (Some(w), Some(h)) => {
            w.checked_add(h).is_some() && (w as usize).checked_mul(h as usize).is_some()
        }
        _ => false,
    };
    if fits {
        Ok(())
    } else {
        Err(InvalidRequest::BoundsTooLarge(bounds))
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use crate::grid::ObstacleGrid;

    #[test]
    fn outcome_and_snapshot_serialize() {
        let grid = ObstacleGrid::new(Range::sized(2, 2));
        let mut pf = PathFinder::new();
        let out = pf.search(&grid, Point::new(0, 0), Point::new(1, 0)).unwrap();
        let json = serde_json::to_string(&out).unwrap();
        let back: Outcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, out);

        let snap: SearchSnapshot = serde_json::from_str(&serde_json::to_string(&pf.snapshot()).unwrap()).unwrap();
        assert_eq!(snap.visited, vec![Point::new(0, 0)]);
        assert_eq!(snap.frontier, vec![Point::new(1, 0), Point::new(0, 1)]);
    }
}

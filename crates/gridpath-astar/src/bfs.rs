//! Breadth-first reference distances.

use std::collections::VecDeque;

use gridpath_core::Point;

use crate::finder::check_bounds;
use crate::traits::GridProvider;

/// Sentinel for cells the breadth-first pass did not reach.
const UNREACHED: i32 = i32::MAX;

/// Shortest number of 4-directional steps from `start` to `goal`, or `None`
/// if the goal is unreachable, either endpoint is not walkable, or the bounds
/// are too large to index.
///
/// Every step costs 1, so this is the exact optimum an A* search on the same
/// grid must match.
pub fn bfs_distance<G: GridProvider>(grid: &G, start: Point, goal: Point) -> Option<i32> {
    if !grid.is_walkable(start) || !grid.is_walkable(goal) {
        return None;
    }
    if start == goal {
        return Some(0);
    }

    let rng = grid.bounds();
    check_bounds(rng).ok()?;
    let width = rng.width() as usize;
    let idx = |p: Point| (p.y - rng.min.y) as usize * width + (p.x - rng.min.x) as usize;

    let mut dist = vec![UNREACHED; rng.len()];
    let mut queue = VecDeque::new();
    dist[idx(start)] = 0;
    queue.push_back(start);

    while let Some(cp) = queue.pop_front() {
        let nd = dist[idx(cp)] + 1;
        for d in [Point::new(0, 1), Point::new(0, -1), Point::new(1, 0), Point::new(-1, 0)] {
            let Some(np) = cp.checked_add(d) else {
                continue;
            };
            if !grid.is_walkable(np) || dist[idx(np)] != UNREACHED {
                continue;
            }
            if np == goal {
                return Some(nd);
            }
            dist[idx(np)] = nd;
            queue.push_back(np);
        }
    }
    None
}

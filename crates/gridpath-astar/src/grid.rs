//! A bounded grid with a mutable set of blocked cells.

use std::collections::HashSet;

use gridpath_core::{Point, Range};

use crate::traits::GridProvider;

/// Grid bounds plus a set of blocked cells.
///
/// Cells outside the bounds can never be blocked; inserting one is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleGrid {
    bounds: Range,
    obstacles: HashSet<Point>,
}

impl ObstacleGrid {
    /// Create an obstacle-free grid covering `bounds`.
    pub fn new(bounds: Range) -> Self {
        Self {
            bounds,
            obstacles: HashSet::new(),
        }
    }

    /// Create a grid and block every in-bounds cell of `obstacles`.
    pub fn with_obstacles(bounds: Range, obstacles: impl IntoIterator<Item = Point>) -> Self {
        let mut grid = Self::new(bounds);
        for p in obstacles {
            grid.insert(p);
        }
        grid
    }

    /// The grid bounds.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Block `p`. Returns `true` if the cell was free and inside the bounds.
    pub fn insert(&mut self, p: Point) -> bool {
        if !self.bounds.contains(p) {
            return false;
        }
        self.obstacles.insert(p)
    }

    /// Unblock `p`. Returns `true` if it was blocked.
    pub fn remove(&mut self, p: Point) -> bool {
        self.obstacles.remove(&p)
    }

    /// Flip the blocked state of `p`. Returns the new state, or `None` when
    /// `p` is out of bounds.
    pub fn toggle(&mut self, p: Point) -> Option<bool> {
        if !self.bounds.contains(p) {
            return None;
        }
        if self.obstacles.remove(&p) {
            Some(false)
        } else {
            self.obstacles.insert(p);
            Some(true)
        }
    }

    /// Unblock every cell.
    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Whether `p` is blocked.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.obstacles.contains(&p)
    }

    /// Blocked cells, in no particular order.
    pub fn obstacles(&self) -> impl Iterator<Item = Point> + '_ {
        self.obstacles.iter().copied()
    }

    /// Number of blocked cells.
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

impl GridProvider for ObstacleGrid {
    #[inline]
    fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    fn is_obstacle(&self, p: Point) -> bool {
        self.obstacles.contains(&p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_ignores_out_of_bounds() {
        let mut g = ObstacleGrid::new(Range::sized(3, 3));
        assert!(g.insert(Point::new(1, 1)));
        assert!(!g.insert(Point::new(1, 1)));
        assert!(!g.insert(Point::new(3, 0)));
        assert!(!g.insert(Point::new(-1, 2)));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn toggle_flips_state() {
        let mut g = ObstacleGrid::new(Range::sized(3, 3));
        assert_eq!(g.toggle(Point::new(0, 2)), Some(true));
        assert!(g.is_obstacle(Point::new(0, 2)));
        assert_eq!(g.toggle(Point::new(0, 2)), Some(false));
        assert!(g.is_empty());
        assert_eq!(g.toggle(Point::new(9, 9)), None);
    }

    #[test]
    fn walkable_respects_bounds_and_obstacles() {
        let g = ObstacleGrid::with_obstacles(Range::sized(2, 2), [Point::new(1, 0)]);
        assert!(g.is_walkable(Point::new(0, 0)));
        assert!(!g.is_walkable(Point::new(1, 0)));
        assert!(!g.is_walkable(Point::new(2, 0)));
    }

    #[test]
    fn remove_and_clear() {
        let mut g = ObstacleGrid::with_obstacles(
            Range::sized(4, 4),
            [Point::new(0, 0), Point::new(1, 1), Point::new(2, 2)],
        );
        assert!(g.remove(Point::new(1, 1)));
        assert!(!g.remove(Point::new(1, 1)));
        assert_eq!(g.len(), 2);
        g.clear();
        assert_eq!(g.obstacles().count(), 0);
    }
}

use std::fmt;

use gridpath_core::{Point, Range};

/// A search request that violates the caller's preconditions.
///
/// These are rejected before any search work is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidRequest {
    /// The bounds are too wide or tall to index: a side does not fit in an
    /// `i32`, or the cell count does not fit in a `usize`.
    BoundsTooLarge(Range),
    /// The start cell lies outside the grid bounds.
    StartOutOfBounds(Point),
    /// The goal cell lies outside the grid bounds.
    GoalOutOfBounds(Point),
    /// The start cell is an obstacle.
    StartBlocked(Point),
    /// The goal cell is an obstacle.
    GoalBlocked(Point),
    /// A [`Scene`](crate::Scene) was given the same cell for start and goal.
    /// [`PathFinder::search`](crate::PathFinder::search) accepts this.
    StartIsGoal(Point),
}

impl fmt::Display for InvalidRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundsTooLarge(r) => write!(f, "invalid request: bounds {r} are too large"),
            Self::StartOutOfBounds(p) => write!(f, "invalid request: start {p} is out of bounds"),
            Self::GoalOutOfBounds(p) => write!(f, "invalid request: goal {p} is out of bounds"),
            Self::StartBlocked(p) => write!(f, "invalid request: start {p} is an obstacle"),
            Self::GoalBlocked(p) => write!(f, "invalid request: goal {p} is an obstacle"),
            Self::StartIsGoal(p) => write!(f, "invalid request: start and goal are both {p}"),
        }
    }
}

impl std::error::Error for InvalidRequest {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_cell() {
        let err = InvalidRequest::GoalBlocked(Point::new(2, 3));
        assert_eq!(err.to_string(), "invalid request: goal (2, 3) is an obstacle");
        let err = InvalidRequest::BoundsTooLarge(Range::sized(4, 1));
        assert_eq!(err.to_string(), "invalid request: bounds [(0, 0)-(4, 1)) are too large");
    }
}

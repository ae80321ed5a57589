//! A* shortest-path search on bounded, 4-connected obstacle grids.
//!
//! The engine is [`PathFinder`]. It takes any [`GridProvider`] (bounds plus an
//! obstacle query), a start and a goal, and returns an [`Outcome`]:
//!
//! - every step costs 1 and the heuristic is the Manhattan distance;
//! - the search stops as soon as the goal enters the frontier
//!   (see [`Termination`]);
//! - among frontier nodes with equal `f`, the most recently discovered one is
//!   expanded first (see [`TieBreak`]).
//!
//! After a search the open and closed sets stay readable for rendering via
//! [`PathFinder::snapshot`]. [`Scene`] wraps a finder together with an
//! editable grid and the pointer-driven editing rules that keep start, goal
//! and obstacles consistent.
//!
//! ```
//! use gridpath_astar::{ObstacleGrid, Outcome, PathFinder};
//! use gridpath_core::{Point, Range};
//!
//! let grid = ObstacleGrid::with_obstacles(Range::sized(3, 3), [Point::new(1, 0), Point::new(1, 1)]);
//! let mut finder = PathFinder::new();
//! let outcome = finder.search(&grid, Point::new(0, 0), Point::new(2, 0)).unwrap();
//! assert_eq!(outcome.len(), Some(6));
//! assert!(matches!(outcome, Outcome::Found(_)));
//! ```

mod bfs;
mod config;
mod error;
mod finder;
mod frontier;
mod grid;
mod node;
mod scene;
mod traits;

pub use bfs::bfs_distance;
pub use config::{SearchConfig, Termination, TieBreak};
pub use error::InvalidRequest;
pub use finder::{Outcome, PathFinder, SearchSnapshot};
pub use grid::ObstacleGrid;
pub use node::{NodeInfo, NodeState};
pub use scene::{DragMode, ParseError, Scene};
pub use traits::GridProvider;

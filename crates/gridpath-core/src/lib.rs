//! **gridpath-core** — geometry primitives shared by the gridpath crates.
//!
//! [`Point`] identifies a single grid cell and [`Range`] describes the
//! half-open bounds of a grid.

pub mod geom;

pub use geom::{Point, Range, RangeIter};

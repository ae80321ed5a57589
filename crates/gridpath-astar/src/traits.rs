use gridpath_core::{Point, Range};

/// Read-only view of a grid that a search runs over.
///
/// The grid must not change while a search over it is in progress.
pub trait GridProvider {
    /// Half-open bounds of the walkable area.
    fn bounds(&self) -> Range;

    /// Whether `p` is blocked. Only called for points inside [`bounds`](Self::bounds).
    fn is_obstacle(&self, p: Point) -> bool;

    /// Whether `p` is inside the bounds and not blocked.
    #[inline]
    fn is_walkable(&self, p: Point) -> bool {
        self.bounds().contains(p) && !self.is_obstacle(p)
    }
}

impl<G: GridProvider + ?Sized> GridProvider for &G {
    fn bounds(&self) -> Range {
        (**self).bounds()
    }

    fn is_obstacle(&self, p: Point) -> bool {
        (**self).is_obstacle(p)
    }
}

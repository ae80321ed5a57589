//! An editable grid with start and goal cells.
//!
//! [`Scene`] applies pointer gestures (press, drag, release) to the grid the
//! same way an interactive editor would, keeping the search preconditions
//! intact: start and goal never sit on an obstacle or on each other. The
//! search re-runs on release.

use std::fmt;

use gridpath_core::{Point, Range};

use crate::error::InvalidRequest;
use crate::finder::{Outcome, PathFinder, validate};
use crate::grid::ObstacleGrid;
use crate::traits::GridProvider;

/// What a drag does, decided by where the gesture was pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DragMode {
    #[default]
    Idle,
    MoveStart,
    MoveGoal,
    AddObstacles,
    RemoveObstacles,
}

/// Grid, endpoints and the finder that searches between them.
#[derive(Debug)]
pub struct Scene {
    grid: ObstacleGrid,
    start: Point,
    goal: Point,
    mode: DragMode,
    finder: PathFinder,
    outcome: Option<Outcome>,
}

impl Scene {
    /// Create a scene. Both endpoints must be distinct walkable cells of `grid`.
    pub fn new(grid: ObstacleGrid, start: Point, goal: Point) -> Result<Self, InvalidRequest> {
        validate(&grid, start, goal)?;
        if start == goal {
            return Err(InvalidRequest::StartIsGoal(start));
        }
        Ok(Self {
            grid,
            start,
            goal,
            mode: DragMode::Idle,
            finder: PathFinder::new(),
            outcome: None,
        })
    }

    /// Parse a scene drawn in ASCII, one grid row per line (`y` grows down).
    ///
    /// `#` is an obstacle, `.` a free cell, `S` the start and `G` the goal.
    /// Leading and trailing whitespace of the whole text is ignored; every
    /// line must have the same width.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseError::Empty);
        }
        let mut width: Option<usize> = None;
        let mut obstacles = Vec::new();
        let mut start = None;
        let mut goal = None;
        let mut height = 0;

        for (y, line) in s.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            let w = line.chars().count();
            match width {
                None => width = Some(w),
                Some(expected) if expected != w => {
                    return Err(ParseError::InconsistentWidth {
                        line: y,
                        expected,
                        found: w,
                    });
                }
                Some(_) => {}
            }
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                match ch {
                    '.' => {}
                    '#' => obstacles.push(pos),
                    'S' | 'G' => {
                        let slot = if ch == 'S' { &mut start } else { &mut goal };
                        if slot.is_some() {
                            return Err(ParseError::DuplicateMarker { ch, pos });
                        }
                        *slot = Some(pos);
                    }
                    _ => return Err(ParseError::InvalidChar { ch, pos }),
                }
            }
            height = y + 1;
        }

        let start = start.ok_or(ParseError::MissingStart)?;
        let goal = goal.ok_or(ParseError::MissingGoal)?;
        let bounds = Range::sized(width.unwrap_or(0) as i32, height as i32);
        let grid = ObstacleGrid::with_obstacles(bounds, obstacles);
        Ok(Self {
            grid,
            start,
            goal,
            mode: DragMode::Idle,
            finder: PathFinder::new(),
            outcome: None,
        })
    }

    pub fn grid(&self) -> &ObstacleGrid {
        &self.grid
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    /// The finder, holding the frontier and visited sets of the last search.
    pub fn finder(&self) -> &PathFinder {
        &self.finder
    }

    pub fn finder_mut(&mut self) -> &mut PathFinder {
        &mut self.finder
    }

    /// Outcome of the last search, `None` before the first one.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    // -----------------------------------------------------------------------
    // Gestures
    // -----------------------------------------------------------------------

    /// Begin a gesture at `p` and pick the drag mode for it.
    pub fn press(&mut self, p: Point) -> DragMode {
        self.mode = if !self.grid.bounds().contains(p) {
            DragMode::Idle
        } else if p == self.start {
            DragMode::MoveStart
        } else if p == self.goal {
            DragMode::MoveGoal
        } else if self.grid.contains(p) {
            DragMode::RemoveObstacles
        } else {
            DragMode::AddObstacles
        };
        self.mode
    }

    /// Apply the current drag mode at `p`. Returns whether anything changed.
    pub fn drag(&mut self, p: Point) -> bool {
        let changed = match self.mode {
            DragMode::Idle => false,
            DragMode::AddObstacles => p != self.start && p != self.goal && self.grid.insert(p),
            DragMode::RemoveObstacles => self.grid.remove(p),
            DragMode::MoveStart => {
                let ok = p != self.start && p != self.goal && self.grid.is_walkable(p);
                if ok {
                    self.start = p;
                }
                ok
            }
            DragMode::MoveGoal => {
                let ok = p != self.goal && p != self.start && self.grid.is_walkable(p);
                if ok {
                    self.goal = p;
                }
                ok
            }
        };
        if changed {
            log::trace!("{:?} at {p}", self.mode);
        }
        changed
    }

    /// End the gesture and search again.
    pub fn release(&mut self) -> Result<&Outcome, InvalidRequest> {
        self.mode = DragMode::Idle;
        self.search()
    }

    /// Search from start to goal on the current grid and keep the outcome.
    pub fn search(&mut self) -> Result<&Outcome, InvalidRequest> {
        let outcome = self.finder.search(&self.grid, self.start, self.goal)?;
        Ok(self.outcome.insert(outcome))
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// ASCII picture of the grid and the last search.
    ///
    /// `#` obstacle, `S` start, `G` goal, `*` path, `o` frontier,
    /// `x` visited, `.` untouched. One line per row.
    pub fn render(&self) -> String {
        let bounds = self.grid.bounds();
        let width = bounds.width().max(0) as usize;
        let mut cells = vec!['.'; bounds.len()];
        let at = |p: Point| (p.y - bounds.min.y) as usize * width + (p.x - bounds.min.x) as usize;

        // The finder may hold a search over different bounds.
        if self.finder.range() == bounds {
            for p in self.finder.visited() {
                cells[at(p)] = 'x';
            }
            for p in self.finder.frontier() {
                cells[at(p)] = 'o';
            }
        }
        if let Some(path) = self.outcome.as_ref().and_then(Outcome::path) {
            for &p in path.iter().filter(|p| bounds.contains(**p)) {
                cells[at(p)] = '*';
            }
        }
        for p in self.grid.obstacles() {
            cells[at(p)] = '#';
        }
        cells[at(self.start)] = 'S';
        cells[at(self.goal)] = 'G';

        let mut out = String::with_capacity(cells.len() + bounds.height().max(0) as usize);
        for row in cells.chunks(width.max(1)) {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

/// Errors that can occur when parsing a scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The text holds no rows.
    Empty,
    /// A row is wider or narrower than the first one.
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than `.`, `#`, `S` or `G`.
    InvalidChar { ch: char, pos: Point },
    /// `S` or `G` appears more than once.
    DuplicateMarker { ch: char, pos: Point },
    MissingStart,
    MissingGoal,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "scene: no rows"),
            Self::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(f, "scene: line {line} is {found} wide, expected {expected}"),
            Self::InvalidChar { ch, pos } => {
                write!(f, "scene: invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::DuplicateMarker { ch, pos } => write!(f, "scene: second \u{201c}{ch}\u{201d} at {pos}"),
            Self::MissingStart => write!(f, "scene: no start (S)"),
            Self::MissingGoal => write!(f, "scene: no goal (G)"),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    const DETOUR: &str = "\
S#G
.#.
...";

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn parse_markers_and_obstacles() {
        let scene = Scene::parse(DETOUR).unwrap();
        assert_eq!(scene.grid().bounds(), Range::sized(3, 3));
        assert_eq!(scene.start(), p(0, 0));
        assert_eq!(scene.goal(), p(2, 0));
        assert!(scene.grid().contains(p(1, 0)));
        assert!(scene.grid().contains(p(1, 1)));
        assert_eq!(scene.grid().len(), 2);
        assert!(scene.outcome().is_none());
    }

    #[test]
    fn render_before_search_shows_layout() {
        let scene = Scene::parse(DETOUR).unwrap();
        assert_eq!(scene.render(), "S#G\n.#.\n...\n");
    }

    #[test]
    fn render_after_search_marks_path() {
        let mut scene = Scene::parse(DETOUR).unwrap();
        assert_eq!(scene.search().unwrap().len(), Some(6));
        assert_eq!(scene.render(), "S#G\n*#*\n***\n");
    }

    #[test]
    fn render_marks_frontier_and_visited() {
        let mut scene = Scene::parse(
            "\
.....
S...G
.....",
        )
        .unwrap();
        scene.search().unwrap();
        let picture = scene.render();
        assert!(picture.contains('o'));
        assert!(picture.contains('*'));
        assert_eq!(picture.lines().nth(1), Some("S***G"));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Scene::parse("  \n ").unwrap_err(), ParseError::Empty);
        assert_eq!(
            Scene::parse("S.\n.G.").unwrap_err(),
            ParseError::InconsistentWidth {
                line: 1,
                expected: 2,
                found: 3
            }
        );
        assert_eq!(
            Scene::parse("S?G").unwrap_err(),
            ParseError::InvalidChar { ch: '?', pos: p(1, 0) }
        );
        assert_eq!(
            Scene::parse("S.S\n..G").unwrap_err(),
            ParseError::DuplicateMarker { ch: 'S', pos: p(2, 0) }
        );
        assert_eq!(Scene::parse("..G").unwrap_err(), ParseError::MissingStart);
        assert_eq!(Scene::parse("S..").unwrap_err(), ParseError::MissingGoal);
    }

    #[test]
    fn parse_error_messages() {
        let err = Scene::parse("S?G").unwrap_err();
        assert_eq!(err.to_string(), "scene: invalid character \u{201c}?\u{201d} at (1, 0)");
        assert_eq!(ParseError::MissingGoal.to_string(), "scene: no goal (G)");
    }

    #[test]
    fn new_rejects_blocked_endpoints() {
        let grid = ObstacleGrid::with_obstacles(Range::sized(3, 3), [p(1, 1)]);
        assert_eq!(
            Scene::new(grid.clone(), p(1, 1), p(0, 0)).unwrap_err(),
            InvalidRequest::StartBlocked(p(1, 1))
        );
        assert_eq!(
            Scene::new(grid.clone(), p(0, 0), p(5, 0)).unwrap_err(),
            InvalidRequest::GoalOutOfBounds(p(5, 0))
        );
        assert!(Scene::new(grid, p(0, 0), p(2, 2)).is_ok());
    }

    #[test]
    fn new_rejects_shared_endpoint() {
        let grid = ObstacleGrid::new(Range::sized(3, 3));
        assert_eq!(
            Scene::new(grid, p(1, 1), p(1, 1)).unwrap_err(),
            InvalidRequest::StartIsGoal(p(1, 1))
        );
    }

    #[test]
    fn press_picks_mode() {
        let mut scene = Scene::parse(DETOUR).unwrap();
        assert_eq!(scene.press(p(0, 0)), DragMode::MoveStart);
        assert_eq!(scene.press(p(2, 0)), DragMode::MoveGoal);
        assert_eq!(scene.press(p(1, 0)), DragMode::RemoveObstacles);
        assert_eq!(scene.press(p(0, 2)), DragMode::AddObstacles);
        assert_eq!(scene.press(p(9, 9)), DragMode::Idle);
    }

    #[test]
    fn painting_skips_endpoints() {
        let mut scene = Scene::parse(DETOUR).unwrap();
        scene.press(p(0, 1));
        assert!(scene.drag(p(0, 1)));
        assert!(!scene.drag(p(0, 1)));
        assert!(!scene.drag(p(0, 0)));
        assert!(!scene.drag(p(2, 0)));
        assert!(!scene.drag(p(3, 0)));
        assert!(scene.grid().contains(p(0, 1)));
        assert!(!scene.grid().contains(p(0, 0)));
    }

    #[test]
    fn erasing_obstacles() {
        let mut scene = Scene::parse(DETOUR).unwrap();
        scene.press(p(1, 0));
        assert!(scene.drag(p(1, 0)));
        assert!(scene.drag(p(1, 1)));
        assert!(!scene.drag(p(0, 2)));
        assert!(scene.grid().is_empty());
        assert_eq!(scene.release().unwrap(), &Outcome::Found(vec![p(1, 0), p(2, 0)]));
    }

    #[test]
    fn moving_endpoints_avoids_conflicts() {
        let mut scene = Scene::parse(DETOUR).unwrap();
        scene.press(p(0, 0));
        assert!(!scene.drag(p(1, 0)), "onto an obstacle");
        assert!(!scene.drag(p(2, 0)), "onto the goal");
        assert!(!scene.drag(p(0, -1)), "out of bounds");
        assert!(scene.drag(p(0, 2)));
        assert_eq!(scene.start(), p(0, 2));

        scene.press(p(2, 0));
        assert!(!scene.drag(p(0, 2)), "onto the start");
        assert!(scene.drag(p(2, 2)));
        assert_eq!(scene.goal(), p(2, 2));

        let outcome = scene.release().unwrap();
        assert_eq!(outcome, &Outcome::Found(vec![p(1, 2), p(2, 2)]));
        assert_eq!(scene.mode(), DragMode::Idle);
    }

    #[test]
    fn release_reports_walled_off_goal() {
        let mut scene = Scene::parse(DETOUR).unwrap();
        scene.press(p(1, 2));
        assert!(scene.drag(p(1, 2)));
        assert_eq!(scene.release().unwrap(), &Outcome::NotFound);
        assert_eq!(scene.render(), "S#G\nx#.\nx#.\n");
    }
}

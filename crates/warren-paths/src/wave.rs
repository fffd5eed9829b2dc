//! Wave (BFS-distance) pathfinding.
//!
//! A [`WaveSearch`] labels open cells with their distance from `from`,
//! one wave per [`step`](WaveSearch::step), until the target is reached or
//! a wave adds no labels. Grid edges are unweighted, so the labeling is
//! exact shortest-path distance and no priority queue is involved.
//! Backtracking walks the labels down from the target, picking uniformly at
//! random among equal-label neighbors — which of several equally short
//! paths gets drawn is random, their length never is.

use std::fmt;

use log::warn;
use rand::Rng;
use rand::RngExt;

use warren_core::{CellKind, GridError, MazeGrid, Point};

/// Pathfinding and waypoint-validation failures.
#[derive(Debug)]
pub enum PathError {
    /// No open corridor connects the pair. Recoverable: the route assembler
    /// records the pair as a missing segment and moves on.
    Unreachable { from: Point, to: Point },
    /// Fewer than two waypoints.
    TooFewWaypoints(usize),
    /// A waypoint names a Wall cell.
    WaypointOnWall(Point),
    /// A waypoint lies outside the grid.
    WaypointOutOfBounds(Point),
    /// Two consecutive waypoints are the same cell.
    DuplicateWaypoint(Point),
    /// Grid access failed mid-search.
    Grid(GridError),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable { from, to } => write!(f, "no way from {from} to {to}"),
            Self::TooFewWaypoints(n) => {
                write!(f, "route needs at least 2 waypoints, got {n}")
            }
            Self::WaypointOnWall(p) => write!(f, "waypoint {p} is a wall"),
            Self::WaypointOutOfBounds(p) => write!(f, "waypoint {p} is outside the grid"),
            Self::DuplicateWaypoint(p) => {
                write!(f, "waypoint {p} repeats its predecessor")
            }
            Self::Grid(e) => write!(f, "grid access during pathfinding: {e}"),
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for PathError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Result of one wave expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveStep {
    /// The search finished (either way) and further steps are no-ops.
    pub done: bool,
    /// The target holds a distance label.
    pub found: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Found,
    Exhausted,
}

/// One wave-expansion search between two open cells.
///
/// Construction seeds `label(from, to) = 1` after clearing any stale labels
/// for this target; each [`step`](WaveSearch::step) expands exactly one
/// wave, so a host loop can interleave a redraw per wave. Labels are keyed
/// by target on the grid itself, so searches toward different targets can
/// coexist.
pub struct WaveSearch {
    from: Point,
    to: Point,
    frontier: Vec<Point>,
    depth: u32,
    state: State,
}

impl WaveSearch {
    /// Validate the pair and seed the search.
    ///
    /// Both endpoints must be in bounds, open, and distinct. The grid's
    /// neighbor cache is refreshed here if topology changed since the last
    /// rebuild.
    pub fn new(grid: &mut MazeGrid, from: Point, to: Point) -> Result<Self, PathError> {
        for p in [from, to] {
            let kind = grid
                .kind(p)
                .map_err(|_| PathError::WaypointOutOfBounds(p))?;
            if kind.is_wall() {
                return Err(PathError::WaypointOnWall(p));
            }
        }
        if from == to {
            return Err(PathError::DuplicateWaypoint(from));
        }
        grid.ensure_neighbor_cache();
        grid.reset_labels(to);
        grid.set_label(from, to, 1);
        Ok(Self {
            from,
            to,
            frontier: vec![from],
            depth: 1,
            state: State::Running,
        })
    }

    /// The seed cell of the search.
    #[inline]
    pub fn origin(&self) -> Point {
        self.from
    }

    /// The cell the waves expand toward.
    #[inline]
    pub fn target(&self) -> Point {
        self.to
    }

    /// Distance of the current frontier from `from` (the seed wave is 1).
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    fn status(&self) -> WaveStep {
        WaveStep {
            done: self.state != State::Running,
            found: self.state == State::Found,
        }
    }

    fn unreachable(&self) -> PathError {
        PathError::Unreachable {
            from: self.from,
            to: self.to,
        }
    }

    /// Expand one wave.
    ///
    /// Every cached open neighbor of the current frontier that has no label
    /// for this target receives `depth + 1` and joins the next frontier;
    /// untouched open cells are marked [`CellKind::OpenVisited`] as the wave
    /// sweeps them. The whole wave completes before the target is checked.
    /// A wave that labels nothing ends the search as unreachable — reported,
    /// not fatal.
    pub fn step(&mut self, grid: &mut MazeGrid) -> WaveStep {
        if self.state != State::Running {
            return self.status();
        }

        let mut next = Vec::new();
        for &p in &self.frontier {
            let nbrs = grid.cached_neighbors(p).to_vec();
            for n in nbrs {
                if grid.label(n, self.to).is_some() {
                    continue;
                }
                grid.set_label(n, self.to, self.depth + 1);
                if grid.get(n).map(|c| c.kind) == Some(CellKind::OpenUnvisited) {
                    let _ = grid.set_kind(n, CellKind::OpenVisited);
                }
                next.push(n);
            }
        }
        self.depth += 1;

        if next.is_empty() {
            warn!("no way from {} to {}", self.from, self.to);
            self.state = State::Exhausted;
        } else {
            self.frontier = next;
            if grid.label(self.to, self.to).is_some() {
                self.state = State::Found;
            }
        }
        self.status()
    }

    /// Walk the labels back from the target and return the `from → to`
    /// cell sequence.
    ///
    /// At each cell the neighbor with the strictly smallest label is taken;
    /// among ties the choice is uniformly random, which only selects among
    /// equally short paths. Errors if the search has not (successfully)
    /// finished.
    pub fn backtrack<R: Rng>(
        &self,
        grid: &MazeGrid,
        rng: &mut R,
    ) -> Result<Vec<Point>, PathError> {
        if self.state != State::Found {
            return Err(self.unreachable());
        }
        let mut way = vec![self.to];
        let mut cur = self.to;
        while cur != self.from {
            let labeled: Vec<(Point, u32)> = grid
                .open_neighbors(cur)
                .into_iter()
                .filter_map(|n| grid.label(n, self.to).map(|d| (n, d)))
                .collect();
            let Some(&(_, lowest)) = labeled.iter().min_by_key(|(_, d)| *d) else {
                return Err(self.unreachable());
            };
            let ties: Vec<Point> = labeled
                .iter()
                .filter(|(_, d)| *d == lowest)
                .map(|(n, _)| *n)
                .collect();
            cur = ties[rng.random_range(0..ties.len())];
            way.push(cur);
        }
        way.reverse();
        Ok(way)
    }

    /// Drive [`step`](WaveSearch::step) to completion, then backtrack.
    pub fn run<R: Rng>(
        &mut self,
        grid: &mut MazeGrid,
        rng: &mut R,
    ) -> Result<Vec<Point>, PathError> {
        loop {
            let status = self.step(grid);
            if status.done {
                return if status.found {
                    self.backtrack(grid, rng)
                } else {
                    Err(self.unreachable())
                };
            }
        }
    }
}

/// Find the shortest path between two open cells in one call.
pub fn find_path<R: Rng>(
    grid: &mut MazeGrid,
    from: Point,
    to: Point,
    rng: &mut R,
) -> Result<Vec<Point>, PathError> {
    WaveSearch::new(grid, from, to)?.run(grid, rng)
}

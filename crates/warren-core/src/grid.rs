//! The [`MazeGrid`] — the single source of truth for maze topology.
//!
//! The grid owns all cell state: kinds, carve weights, the open-neighbor
//! cache, per-target distance labels, and the queue of kind-change
//! notifications a host drains to drive redraw or frame capture.

use std::collections::HashMap;

use rand::Rng;
use rand::RngExt;

use crate::cell::{Cell, CellKind};
use crate::error::GridError;
use crate::geom::Point;

// ---------------------------------------------------------------------------
// GridConfig
// ---------------------------------------------------------------------------

/// Validated dimensions for template construction.
///
/// Both extents must be odd and at least 3 so that the border ring is all
/// Wall, interior cells with an even coordinate are carve candidates, and
/// interior odd×odd cells are rooms. Dimensions are an explicit value passed
/// to construction, never ambient state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    pub cols: i32,
    pub rows: i32,
}

impl GridConfig {
    /// Validate and build a config.
    pub fn new(cols: i32, rows: i32) -> Result<Self, GridError> {
        if cols < 3 || rows < 3 || cols % 2 == 0 || rows % 2 == 0 {
            return Err(GridError::InvalidDimensions { cols, rows });
        }
        Ok(Self { cols, rows })
    }

    /// Total cell count.
    #[inline]
    pub fn len(self) -> usize {
        (self.cols as usize) * (self.rows as usize)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// KindChange
// ---------------------------------------------------------------------------

/// One recorded kind transition.
///
/// Exactly one `KindChange` is queued per [`MazeGrid::set_kind`] call, with
/// the old and new kind (which may be equal — hosts that only care about
/// topology can filter on `old != new`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KindChange {
    pub at: Point,
    pub old: CellKind,
    pub new: CellKind,
}

// ---------------------------------------------------------------------------
// MazeGrid
// ---------------------------------------------------------------------------

/// A rectangular grid of [`Cell`]s backed by a flat buffer (`y * cols + x`).
///
/// Grids are built wholesale — by [`template`](MazeGrid::template) for
/// generation or [`from_kinds`](MazeGrid::from_kinds) for the loaders — and
/// fully rebuilt on regeneration or reload, never patched cell by cell.
#[derive(Debug)]
pub struct MazeGrid {
    cols: i32,
    rows: i32,
    cells: Vec<Cell>,
    /// Per-cell open-neighbor cache, in left/right/up/down order.
    nbrs: Vec<Vec<Point>>,
    nbrs_dirty: bool,
    /// Per-target distance maps. 0 means unlabeled; seeds start at 1.
    labels: HashMap<Point, Vec<u32>>,
    changes: Vec<KindChange>,
}

impl MazeGrid {
    /// Build the generation template for `config`.
    ///
    /// Border cells are Wall; interior cells with at least one even
    /// coordinate are Wall candidates with a uniformly random carve weight
    /// in `[0, rows*cols]`; interior odd×odd cells are open rooms.
    pub fn template<R: Rng>(config: GridConfig, rng: &mut R) -> Self {
        let GridConfig { cols, rows } = config;
        let max_weight = (cols * rows) as u32;
        let mut cells = Vec::with_capacity(config.len());
        for y in 0..rows {
            for x in 0..cols {
                let cell = if x == 0 || x == cols - 1 || y == 0 || y == rows - 1 {
                    Cell::new(CellKind::Wall)
                } else if x % 2 == 0 || y % 2 == 0 {
                    Cell::candidate(rng.random_range(0..=max_weight))
                } else {
                    Cell::new(CellKind::OpenUnvisited)
                };
                cells.push(cell);
            }
        }
        Self::from_cells(cols, rows, cells)
    }

    /// Build a grid from a row-major kind buffer (loader entry point).
    ///
    /// Accepts any positive dimensions; the odd-size rule only constrains
    /// [`template`](MazeGrid::template) construction.
    pub fn from_kinds(cols: i32, rows: i32, kinds: Vec<CellKind>) -> Result<Self, GridError> {
        if cols < 1 || rows < 1 {
            return Err(GridError::InvalidDimensions { cols, rows });
        }
        if kinds.len() != (cols as usize) * (rows as usize) {
            return Err(GridError::DimensionMismatch {
                cols,
                rows,
                len: kinds.len(),
            });
        }
        let cells = kinds.into_iter().map(Cell::new).collect();
        Ok(Self::from_cells(cols, rows, cells))
    }

    fn from_cells(cols: i32, rows: i32, cells: Vec<Cell>) -> Self {
        let len = cells.len();
        Self {
            cols,
            rows,
            cells,
            nbrs: vec![Vec::new(); len],
            nbrs_dirty: true,
            labels: HashMap::new(),
            changes: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Dimensions and lookup
    // -----------------------------------------------------------------------

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Whether `p` lies inside `[0, cols) × [0, rows)`.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.cols && p.y >= 0 && p.y < self.rows
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some((p.y * self.cols + p.x) as usize)
        } else {
            None
        }
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        Point::new(idx as i32 % self.cols, idx as i32 / self.cols)
    }

    fn oob(&self, pos: Point) -> GridError {
        GridError::OutOfBounds {
            pos,
            cols: self.cols,
            rows: self.rows,
        }
    }

    /// The cell at `p`, or `OutOfBounds`.
    pub fn cell(&self, p: Point) -> Result<Cell, GridError> {
        self.idx(p).map(|i| self.cells[i]).ok_or_else(|| self.oob(p))
    }

    /// The kind at `p`, or `OutOfBounds`.
    pub fn kind(&self, p: Point) -> Result<CellKind, GridError> {
        self.cell(p).map(|c| c.kind)
    }

    /// Infallible lookup; `None` outside bounds.
    #[inline]
    pub fn get(&self, p: Point) -> Option<Cell> {
        self.idx(p).map(|i| self.cells[i])
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Set the kind at `p`, recording exactly one [`KindChange`].
    ///
    /// This is the host notification point: every call queues one change,
    /// drained via [`drain_changes`](MazeGrid::drain_changes).
    pub fn set_kind(&mut self, p: Point, kind: CellKind) -> Result<(), GridError> {
        let i = self.idx(p).ok_or_else(|| self.oob(p))?;
        let old = self.cells[i].kind;
        self.cells[i].kind = kind;
        if old.is_wall() != kind.is_wall() {
            self.nbrs_dirty = true;
        }
        self.changes.push(KindChange { at: p, old, new: kind });
        Ok(())
    }

    /// Take the carve weight at `p`, leaving the candidate resolved.
    pub fn take_weight(&mut self, p: Point) -> Result<Option<u32>, GridError> {
        let i = self.idx(p).ok_or_else(|| self.oob(p))?;
        Ok(self.cells[i].carve_weight.take())
    }

    /// Drain the queued kind changes in FIFO order.
    pub fn drain_changes(&mut self) -> Vec<KindChange> {
        std::mem::take(&mut self.changes)
    }

    // -----------------------------------------------------------------------
    // Neighbors
    // -----------------------------------------------------------------------

    /// The up-to-4 orthogonal non-Wall neighbors of `p`, computed now, in
    /// the fixed left/right/up/down order.
    pub fn open_neighbors(&self, p: Point) -> Vec<Point> {
        p.neighbors_4()
            .into_iter()
            .filter(|&n| self.get(n).is_some_and(|c| c.kind.is_open()))
            .collect()
    }

    /// Recompute the open-neighbor cache for every non-Wall cell.
    ///
    /// Wall cells get an empty list. Must run after any topology change
    /// before cached lookups are trusted;
    /// [`ensure_neighbor_cache`](MazeGrid::ensure_neighbor_cache) does this
    /// lazily.
    pub fn rebuild_neighbor_cache(&mut self) {
        for i in 0..self.cells.len() {
            if self.cells[i].kind.is_open() {
                let nbrs = self.open_neighbors(self.point(i));
                self.nbrs[i] = nbrs;
            } else {
                self.nbrs[i].clear();
            }
        }
        self.nbrs_dirty = false;
    }

    /// Rebuild the neighbor cache only if a wall/open transition occurred
    /// since the last rebuild.
    pub fn ensure_neighbor_cache(&mut self) {
        if self.nbrs_dirty {
            self.rebuild_neighbor_cache();
        }
    }

    /// The cached open neighbors of `p` (empty for Walls or out of bounds).
    pub fn cached_neighbors(&self, p: Point) -> &[Point] {
        static EMPTY: [Point; 0] = [];
        match self.idx(p) {
            Some(i) => &self.nbrs[i],
            None => &EMPTY,
        }
    }

    // -----------------------------------------------------------------------
    // Distance labels
    // -----------------------------------------------------------------------

    /// The wave distance recorded at `p` for `target`, if labeled.
    pub fn label(&self, p: Point, target: Point) -> Option<u32> {
        let i = self.idx(p)?;
        match self.labels.get(&target)?[i] {
            0 => None,
            d => Some(d),
        }
    }

    /// Record wave distance `d` at `p` for `target`. No-op out of bounds.
    pub fn set_label(&mut self, p: Point, target: Point, d: u32) {
        let Some(i) = self.idx(p) else { return };
        let len = self.cells.len();
        self.labels
            .entry(target)
            .or_insert_with(|| vec![0; len])[i] = d;
    }

    /// Clear every cell's label for `target`.
    ///
    /// Precondition of any wave search that reuses the grid with the same
    /// target: stale labels from an earlier run would stop the expansion
    /// immediately.
    pub fn reset_labels(&mut self, target: Point) {
        self.labels.remove(&target);
    }

    /// Clear the labels of every target.
    pub fn clear_all_labels(&mut self) {
        self.labels.clear();
    }

    // -----------------------------------------------------------------------
    // Iteration
    // -----------------------------------------------------------------------

    /// Row-major iterator over `(Point, Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &c)| (self.point(i), c))
    }

    /// The positions of all non-Wall cells, row-major.
    pub fn open_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.iter()
            .filter(|(_, c)| c.kind.is_open())
            .map(|(p, _)| p)
    }

    /// Unresolved carve candidates as `(position, weight)`, row-major.
    ///
    /// Row-major order is the tie-break order for equal weights, so it is
    /// part of the generation-determinism contract.
    pub fn candidates(&self) -> impl Iterator<Item = (Point, u32)> + '_ {
        self.iter()
            .filter_map(|(p, c)| c.carve_weight.map(|w| (p, w)))
    }
}

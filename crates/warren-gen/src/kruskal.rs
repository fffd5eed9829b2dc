//! Randomized-Kruskal maze generation.
//!
//! Wall candidates are the graph's edges, rooms its vertices: processing
//! candidates in ascending weight order and carving exactly those that do
//! not close a cycle yields a perfect maze — connected, acyclic, one path
//! between any two open cells — the moment a single component spans every
//! room.

use std::fmt;

use log::{debug, trace};

use warren_core::{CellKind, GridError, MazeGrid, Point};

use crate::dset::DisjointSet;

/// Fatal generation failures.
#[derive(Debug)]
pub enum GenError {
    /// The edge list ran out before the rooms formed a single component.
    ///
    /// Valid odd-sized templates cannot produce this; seeing it means the
    /// grid the generator was built from violated the construction rule.
    Disconnected { joined: usize, rooms: usize },
    /// Grid access failed mid-generation.
    Grid(GridError),
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected { joined, rooms } => write!(
                f,
                "edge list exhausted with {joined} of {rooms} rooms connected"
            ),
            Self::Grid(e) => write!(f, "grid access during generation: {e}"),
        }
    }
}

impl std::error::Error for GenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Disconnected { .. } => None,
        }
    }
}

impl From<GridError> for GenError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Outcome of one generator step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenStep {
    /// The candidate was carved open, merging the components around it.
    Carved(Point),
    /// The candidate closed a cycle and stays a permanent wall.
    Kept(Point),
    /// Generation already finished; no edge was consumed.
    Done,
}

/// A candidate wall together with the rooms it would join.
#[derive(Debug)]
struct Edge {
    wall: Point,
    weight: u32,
    rooms: Vec<Point>,
}

/// Step-wise Kruskal generator.
///
/// Built once per template; drive it with [`step`](MazeGen::step) (one edge
/// per call, so a host loop can interleave a redraw per step) or
/// [`run`](MazeGen::run) to completion. The generator owns the edge list
/// and the disjoint-set; the grid stays the single source of cell state.
pub struct MazeGen {
    edges: Vec<Edge>,
    next: usize,
    dset: DisjointSet,
    room_total: usize,
    carved: usize,
    done: bool,
}

impl MazeGen {
    /// Build the edge list from the untouched template.
    ///
    /// Every candidate's open-neighbor set is computed now, before any
    /// carving, so the sets contain room cells only. Candidates with no
    /// open neighbor are resolved immediately as permanent walls and
    /// dropped. Edges sort ascending by weight with a stable sort: equal
    /// weights keep their row-major insertion order, making generation a
    /// pure function of the template (and therefore of its seed).
    pub fn new(grid: &mut MazeGrid) -> Result<Self, GenError> {
        let room_total = grid.open_cells().count();

        let mut edges = Vec::new();
        let mut dropped = Vec::new();
        for (wall, weight) in grid.candidates() {
            let rooms = grid.open_neighbors(wall);
            if rooms.is_empty() {
                dropped.push(wall);
            } else {
                edges.push(Edge { wall, weight, rooms });
            }
        }
        for wall in dropped {
            grid.take_weight(wall)?;
        }
        edges.sort_by_key(|e| e.weight);

        debug!(
            "maze generation: {} edges over {} rooms",
            edges.len(),
            room_total
        );

        Ok(Self {
            edges,
            next: 0,
            dset: DisjointSet::new(),
            room_total,
            carved: 0,
            // A lone room (or an empty grid) is already spanning.
            done: room_total <= 1,
        })
    }

    /// Whether the spanning condition has been reached.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Number of candidates carved so far.
    #[inline]
    pub fn carved(&self) -> usize {
        self.carved
    }

    /// Fraction of rooms already joined into some component, in `0.0..=1.0`.
    ///
    /// Suitable for host progress display.
    pub fn coverage(&self) -> f64 {
        if self.room_total == 0 {
            1.0
        } else {
            self.dset.len() as f64 / self.room_total as f64
        }
    }

    /// Process the next edge.
    ///
    /// Carves the candidate unless its room set already lies within one
    /// component (a cycle). The spanning check runs after every carve:
    /// generation is done when the disjoint-set holds every room in a
    /// single component — exact coverage, not edge-list exhaustion.
    /// Exhausting the list first is the fatal
    /// [`Disconnected`](GenError::Disconnected) invariant violation.
    pub fn step(&mut self, grid: &mut MazeGrid) -> Result<GenStep, GenError> {
        if self.done {
            return Ok(GenStep::Done);
        }
        let Some(edge) = self.edges.get(self.next) else {
            return Err(GenError::Disconnected {
                joined: self.dset.len(),
                rooms: self.room_total,
            });
        };
        let wall = edge.wall;
        let rooms = edge.rooms.clone();
        self.next += 1;

        grid.take_weight(wall)?;

        // Cycle iff every adjacent room is already known and they all share
        // one representative. An unseen room means the carve introduces a
        // new component rather than closing a loop.
        let cycle = {
            let mut roots = rooms.iter().map(|&r| self.dset.find(r));
            match roots.next().flatten() {
                Some(first) => roots.all(|r| r == Some(first)),
                None => false,
            }
        };

        if cycle {
            trace!("edge {wall} kept (cycle)");
            return Ok(GenStep::Kept(wall));
        }

        grid.set_kind(wall, CellKind::OpenUnvisited)?;
        for pair in rooms.windows(2) {
            self.dset.union(pair[0], pair[1]);
        }
        if rooms.len() == 1 {
            self.dset.insert(rooms[0]);
        }
        self.carved += 1;
        trace!("edge {wall} carved, joining {rooms:?}");

        if self.dset.len() == self.room_total && self.dset.components() == 1 {
            self.done = true;
            // Edges after the terminating one will never be carved; resolve
            // them as permanent walls so no candidate weight survives
            // generation.
            for edge in &self.edges[self.next..] {
                grid.take_weight(edge.wall)?;
            }
            debug!(
                "maze generation done: {} carved of {} edges",
                self.carved,
                self.edges.len()
            );
        }
        Ok(GenStep::Carved(wall))
    }

    /// Drive [`step`](MazeGen::step) until the spanning condition holds.
    pub fn run(&mut self, grid: &mut MazeGrid) -> Result<(), GenError> {
        while !self.done {
            self.step(grid)?;
        }
        Ok(())
    }
}

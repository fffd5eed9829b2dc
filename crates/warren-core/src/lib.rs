//! **warren-core** — grid-maze engine core types.
//!
//! This crate provides the state layer of the *warren* engine: geometry
//! primitives, the cell model, and [`MazeGrid`] — the single source of truth
//! for maze topology, carve weights, wave-distance labels, the open-neighbor
//! cache and the kind-change notification queue that hosts drain to drive
//! presentation. Algorithms live in the sibling crates (`warren-gen`,
//! `warren-paths`); persistence in `warren-io`.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::{Cell, CellKind, PresentationHint};
pub use error::GridError;
pub use geom::Point;
pub use grid::{GridConfig, KindChange, MazeGrid};

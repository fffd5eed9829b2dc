//! **warren-gen** — maze generation for the *warren* engine.
//!
//! A randomized-Kruskal generator treating wall candidates as edges and
//! rooms as vertices, backed by a union-find with explicit membership.
//! Step-wise by design: a host loop advances one edge per frame.

pub mod dset;
pub mod kruskal;

pub use dset::DisjointSet;
pub use kruskal::{GenError, GenStep, MazeGen};

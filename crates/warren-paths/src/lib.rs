//! **warren-paths** — pathfinding for the *warren* engine.
//!
//! Wave (BFS-distance) search between open cells with step-wise driving and
//! random tie-breaking on backtrack, plus the route assembler that chains
//! searches over an ordered waypoint list.

pub mod route;
pub mod wave;

pub use route::{Route, assemble, validate_waypoints};
pub use wave::{PathError, WaveSearch, WaveStep, find_path};

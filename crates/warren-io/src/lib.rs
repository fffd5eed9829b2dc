//! **warren-io** — persisted grid formats for the *warren* engine.
//!
//! Two round-trippable representations of a maze's Wall/Open layout: a
//! glyph text format and a monochrome PNG raster. Loaders build fresh
//! grids and abort on malformed input without touching any existing one.

pub mod bitmap;
pub mod error;
pub mod text;

pub use bitmap::{DEFAULT_CELL_SIZE, decode_bitmap, encode_bitmap, load_png, save_png};
pub use error::FormatError;
pub use text::{DEFAULT_WALL_GLYPH, DEFAULT_WAY_GLYPH, load_txt, read_txt, save_txt, write_txt};

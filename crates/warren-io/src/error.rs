use std::fmt;

use warren_core::GridError;

/// Malformed persisted grids and the I/O failures around them.
///
/// Loading never mutates an existing grid: loaders build a fresh
/// [`warren_core::MazeGrid`] and any error aborts before a grid exists.
#[derive(Debug)]
pub enum FormatError {
    /// Wall and way glyphs differ in character length (or are empty).
    GlyphMismatch { wall: String, way: String },
    /// A `wall=`/`way=` header line is absent.
    MissingHeader(&'static str),
    /// The file ended mid-structure (or a row ends in a partial glyph).
    Truncated { row: usize },
    /// A body chunk matches neither glyph.
    UnknownToken { row: usize, col: usize },
    /// A body row with a different width than the first.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// No grid content at all.
    Empty,
    /// A zero cell size cannot scale a raster.
    InvalidCellSize,
    Grid(GridError),
    Io(std::io::Error),
    Image(image::ImageError),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GlyphMismatch { wall, way } => write!(
                f,
                "wall glyph {wall:?} and way glyph {way:?} must have the same nonzero length"
            ),
            Self::MissingHeader(name) => write!(f, "missing '{name}=' header line"),
            Self::Truncated { row } => write!(f, "grid body truncated in row {row}"),
            Self::UnknownToken { row, col } => {
                write!(f, "unknown glyph at row {row}, column {col}")
            }
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {row} holds {found} cells, expected {expected}"
            ),
            Self::Empty => write!(f, "no grid content"),
            Self::InvalidCellSize => write!(f, "cell size must be nonzero"),
            Self::Grid(e) => write!(f, "loaded grid rejected: {e}"),
            Self::Io(e) => write!(f, "i/o failure: {e}"),
            Self::Image(e) => write!(f, "image failure: {e}"),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for FormatError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<std::io::Error> for FormatError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<image::ImageError> for FormatError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}

//! The monochrome bitmap format.
//!
//! One grid cell occupies a `cell_size × cell_size` pixel block. Saving
//! writes white blocks for open cells and black for walls; loading
//! downsamples by `cell_size` (nearest-neighbor), thresholds to monochrome,
//! maps lit pixels to open cells, and forces the border ring to Wall
//! whatever the pixels say.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use log::debug;

use warren_core::{CellKind, MazeGrid, Point};

use crate::error::FormatError;

/// Pixels per cell used by the stock tooling.
pub const DEFAULT_CELL_SIZE: u32 = 32;

/// Render `grid` as a grayscale raster, one block per cell.
pub fn encode_bitmap(grid: &MazeGrid, cell_size: u32) -> Result<GrayImage, FormatError> {
    if cell_size == 0 {
        return Err(FormatError::InvalidCellSize);
    }
    let width = grid.cols() as u32 * cell_size;
    let height = grid.rows() as u32 * cell_size;
    Ok(GrayImage::from_fn(width, height, |px, py| {
        let p = Point::new((px / cell_size) as i32, (py / cell_size) as i32);
        let open = grid.get(p).is_some_and(|c| c.kind.is_open());
        Luma([if open { 255 } else { 0 }])
    }))
}

/// Rebuild a grid from a grayscale raster.
pub fn decode_bitmap(img: &GrayImage, cell_size: u32) -> Result<MazeGrid, FormatError> {
    if cell_size == 0 {
        return Err(FormatError::InvalidCellSize);
    }
    let cols = img.width() / cell_size;
    let rows = img.height() / cell_size;
    if cols == 0 || rows == 0 {
        return Err(FormatError::Empty);
    }
    let small = imageops::resize(img, cols, rows, FilterType::Nearest);

    let mut kinds = Vec::with_capacity((cols * rows) as usize);
    for y in 0..rows {
        for x in 0..cols {
            let border = x == 0 || x == cols - 1 || y == 0 || y == rows - 1;
            // Monochrome threshold: only a lit pixel counts as open.
            let lit = small.get_pixel(x, y)[0] >= 128;
            kinds.push(if lit && !border {
                CellKind::OpenUnvisited
            } else {
                CellKind::Wall
            });
        }
    }
    let grid = MazeGrid::from_kinds(cols as i32, rows as i32, kinds)?;
    debug!("loaded {cols}x{rows} grid from bitmap");
    Ok(grid)
}

/// Save `grid` to a PNG file at `path`.
pub fn save_png<P: AsRef<Path>>(
    grid: &MazeGrid,
    path: P,
    cell_size: u32,
) -> Result<(), FormatError> {
    encode_bitmap(grid, cell_size)?.save(path)?;
    Ok(())
}

/// Load a grid from the PNG file at `path`.
pub fn load_png<P: AsRef<Path>>(path: P, cell_size: u32) -> Result<MazeGrid, FormatError> {
    let img = image::open(path)?.to_luma8();
    decode_bitmap(&img, cell_size)
}

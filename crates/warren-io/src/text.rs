//! The glyph text format.
//!
//! ```text
//! wall=▓▓
//! way=░░
//!
//! ▓▓▓▓▓▓
//! ▓▓░░▓▓
//! ▓▓▓▓▓▓
//! ```
//!
//! Two header lines name the glyphs (equal character length, checked before
//! any parsing), a blank separator, then one line per row. Loading infers
//! the dimensions from the body. Only the Wall/Open partition survives a
//! round trip: every open kind saves as the way glyph and loads back as
//! untouched open.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;

use warren_core::{CellKind, MazeGrid, Point};

use crate::error::FormatError;

/// Glyphs the original tooling writes by default.
pub const DEFAULT_WALL_GLYPH: &str = "▓▓";
pub const DEFAULT_WAY_GLYPH: &str = "░░";

fn check_glyphs(wall: &str, way: &str) -> Result<usize, FormatError> {
    let len = wall.chars().count();
    if len == 0 || way.chars().count() != len {
        return Err(FormatError::GlyphMismatch {
            wall: wall.to_string(),
            way: way.to_string(),
        });
    }
    Ok(len)
}

/// Write `grid` in the text format.
pub fn write_txt<W: Write>(
    grid: &MazeGrid,
    out: &mut W,
    wall: &str,
    way: &str,
) -> Result<(), FormatError> {
    check_glyphs(wall, way)?;
    writeln!(out, "wall={wall}")?;
    writeln!(out, "way={way}")?;
    writeln!(out)?;
    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            let open = grid
                .get(Point::new(x, y))
                .is_some_and(|c| c.kind.is_open());
            out.write_all(if open { way } else { wall }.as_bytes())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Save `grid` to `path` in the text format.
pub fn save_txt<P: AsRef<Path>>(
    grid: &MazeGrid,
    path: P,
    wall: &str,
    way: &str,
) -> Result<(), FormatError> {
    let mut out = BufWriter::new(File::create(path)?);
    write_txt(grid, &mut out, wall, way)?;
    out.flush()?;
    Ok(())
}

fn header_glyph(
    line: Option<std::io::Result<String>>,
    name: &'static str,
) -> Result<String, FormatError> {
    let line = line.ok_or(FormatError::Truncated { row: 0 })??;
    line.strip_prefix(name)
        .and_then(|rest| rest.strip_prefix('='))
        .map(str::to_string)
        .ok_or(FormatError::MissingHeader(name))
}

/// Parse a grid from the text format.
pub fn read_txt<R: BufRead>(input: R) -> Result<MazeGrid, FormatError> {
    let mut lines = input.lines();
    let wall = header_glyph(lines.next(), "wall")?;
    let way = header_glyph(lines.next(), "way")?;
    let glyph_len = check_glyphs(&wall, &way)?;

    // Blank separator; its content is not interpreted.
    lines.next().ok_or(FormatError::Truncated { row: 0 })??;

    let mut kinds = Vec::new();
    let mut cols: Option<usize> = None;
    let mut rows = 0usize;
    for line in lines {
        let line = line?;
        let chars: Vec<char> = line.chars().collect();
        let mut width = 0usize;
        for (col, chunk) in chars.chunks(glyph_len).enumerate() {
            if chunk.len() < glyph_len {
                return Err(FormatError::Truncated { row: rows });
            }
            let token: String = chunk.iter().collect();
            if token == wall {
                kinds.push(CellKind::Wall);
            } else if token == way {
                kinds.push(CellKind::OpenUnvisited);
            } else {
                return Err(FormatError::UnknownToken { row: rows, col });
            }
            width += 1;
        }
        match cols {
            None => cols = Some(width),
            Some(expected) if expected != width => {
                return Err(FormatError::RaggedRow {
                    row: rows,
                    expected,
                    found: width,
                });
            }
            Some(_) => {}
        }
        rows += 1;
    }

    let cols = cols.filter(|&c| c > 0).ok_or(FormatError::Empty)?;
    let grid = MazeGrid::from_kinds(cols as i32, rows as i32, kinds)?;
    debug!("loaded {cols}x{rows} grid from text");
    Ok(grid)
}

/// Load a grid from a text-format file at `path`.
pub fn load_txt<P: AsRef<Path>>(path: P) -> Result<MazeGrid, FormatError> {
    read_txt(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use warren_core::GridConfig;
    use warren_gen::MazeGen;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn wall_open_layout(grid: &MazeGrid) -> Vec<bool> {
        grid.iter().map(|(_, c)| c.kind.is_open()).collect()
    }

    #[test]
    fn round_trip_preserves_wall_open_partition() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut grid = MazeGrid::template(GridConfig::new(9, 7).unwrap(), &mut rng);
        MazeGen::new(&mut grid).unwrap().run(&mut grid).unwrap();

        let mut buf = Vec::new();
        write_txt(&grid, &mut buf, DEFAULT_WALL_GLYPH, DEFAULT_WAY_GLYPH).unwrap();
        let loaded = read_txt(buf.as_slice()).unwrap();

        assert_eq!(loaded.cols(), 9);
        assert_eq!(loaded.rows(), 7);
        assert_eq!(wall_open_layout(&loaded), wall_open_layout(&grid));
    }

    #[test]
    fn visual_state_collapses_to_open() {
        let mut grid =
            MazeGrid::from_kinds(3, 1, vec![CellKind::Wall; 3]).unwrap();
        grid.set_kind(p(1, 0), CellKind::OnPath).unwrap();
        grid.set_kind(p(2, 0), CellKind::OpenVisited).unwrap();

        let mut buf = Vec::new();
        write_txt(&grid, &mut buf, "#", ".").unwrap();
        assert_eq!(String::from_utf8(buf.clone()).unwrap(), "wall=#\nway=.\n\n#..\n");

        let loaded = read_txt(buf.as_slice()).unwrap();
        assert_eq!(loaded.kind(p(1, 0)).unwrap(), CellKind::OpenUnvisited);
        assert_eq!(loaded.kind(p(2, 0)).unwrap(), CellKind::OpenUnvisited);
    }

    #[test]
    fn glyph_length_mismatch_rejected_before_parsing() {
        let grid = MazeGrid::from_kinds(1, 1, vec![CellKind::Wall]).unwrap();
        let mut buf = Vec::new();
        assert!(matches!(
            write_txt(&grid, &mut buf, "##", "."),
            Err(FormatError::GlyphMismatch { .. })
        ));
        assert!(matches!(
            read_txt("wall=##\nway=.\n\n##\n".as_bytes()),
            Err(FormatError::GlyphMismatch { .. })
        ));
        assert!(matches!(
            read_txt("wall=\nway=\n\n\n".as_bytes()),
            Err(FormatError::GlyphMismatch { .. })
        ));
    }

    #[test]
    fn missing_header_rejected() {
        assert!(matches!(
            read_txt("way=.\nwall=#\n\n#\n".as_bytes()),
            Err(FormatError::MissingHeader("wall"))
        ));
        assert!(matches!(
            read_txt("wall=#\nbogus\n\n#\n".as_bytes()),
            Err(FormatError::MissingHeader("way"))
        ));
    }

    #[test]
    fn truncation_and_bad_tokens_rejected() {
        // File ends right after the headers.
        assert!(matches!(
            read_txt("wall=#\nway=.\n".as_bytes()),
            Err(FormatError::Truncated { .. })
        ));
        // Partial trailing glyph.
        assert!(matches!(
            read_txt("wall=##\nway=..\n\n##..#\n".as_bytes()),
            Err(FormatError::Truncated { row: 0 })
        ));
        // A chunk that is neither glyph.
        assert!(matches!(
            read_txt("wall=#\nway=.\n\n#x#\n".as_bytes()),
            Err(FormatError::UnknownToken { row: 0, col: 1 })
        ));
        // Inconsistent row widths.
        assert!(matches!(
            read_txt("wall=#\nway=.\n\n###\n##\n".as_bytes()),
            Err(FormatError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        ));
        // Headers and separator but zero body rows.
        assert!(matches!(
            read_txt("wall=#\nway=.\n\n".as_bytes()),
            Err(FormatError::Empty)
        ));
    }

    #[test]
    fn load_infers_dimensions() {
        let text = "wall=▓▓\nway=░░\n\n▓▓▓▓▓▓\n▓▓░░▓▓\n▓▓▓▓▓▓\n";
        let grid = read_txt(text.as_bytes()).unwrap();
        assert_eq!((grid.cols(), grid.rows()), (3, 3));
        assert_eq!(grid.open_cells().collect::<Vec<_>>(), vec![p(1, 1)]);
    }
}

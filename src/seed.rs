//! Seed codec: decode textual seed files into a grid, encode a grid back.
//!
//! Two decode formats exist. Version 1 is a bare coordinate list; version 2
//! is a shape list (cells, rectangles, ellipses) stamped onto the grid in
//! file order, last write wins. Encoding always produces version 1: shape
//! provenance is deliberately lost.

use crate::error::{BoundsError, ParseError, SeedError};
use crate::grid::{Cell, Grid};
use std::path::Path;

/// Header line of a v1 (coordinate list) seed file.
pub const V1_HEADER: &str = "#version=1.0";
/// Header line of a v2 (shape list) seed file.
pub const V2_HEADER: &str = "#version=2.0";

/// A region to stamp onto the grid during decoding.
///
/// Transient: shapes exist only between parsing a line and stamping it,
/// they are never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Point {
        fill: Cell,
        row: usize,
        col: usize,
    },
    /// Axis-aligned box, all bounds inclusive
    Box {
        fill: Cell,
        bottom: usize,
        left: usize,
        top: usize,
        right: usize,
    },
    /// Ellipse inscribed in an axis-aligned box
    Ellipse {
        fill: Cell,
        bottom: usize,
        left: usize,
        top: usize,
        right: usize,
    },
}

impl Shape {
    /// Check the shape's extent against the grid, reporting the offending
    /// corner. Seeds are never clamped to fit.
    fn check_bounds(&self, grid: &Grid) -> Result<(), BoundsError> {
        let (row, col) = match *self {
            Self::Point { row, col, .. } => (row, col),
            Self::Box { top, right, .. } | Self::Ellipse { top, right, .. } => (top, right),
        };
        if grid.in_bounds(row, col) {
            Ok(())
        } else {
            Err(BoundsError::new(row, col, grid.rows(), grid.cols()))
        }
    }

    /// Stamp the shape's fill value onto the grid.
    ///
    /// Bounds must have been checked already; later shapes overwrite
    /// earlier ones at overlapping coordinates.
    fn stamp(&self, grid: &mut Grid) {
        match *self {
            Self::Point { fill, row, col } => grid.set(row, col, fill),
            Self::Box {
                fill,
                bottom,
                left,
                top,
                right,
            } => {
                for row in bottom..=top {
                    for col in left..=right {
                        grid.set(row, col, fill);
                    }
                }
            }
            Self::Ellipse {
                fill,
                bottom,
                left,
                top,
                right,
            } => {
                let cr = (bottom + top) as f64 / 2.0;
                let cc = (left + right) as f64 / 2.0;
                let h = (top - bottom + 1) as f64;
                let w = (right - left + 1) as f64;
                for row in bottom..=top {
                    for col in left..=right {
                        let dr = row as f64 - cr;
                        let dc = col as f64 - cc;
                        if 4.0 * dc * dc / (w * w) + 4.0 * dr * dr / (h * h) <= 1.0 {
                            grid.set(row, col, fill);
                        }
                    }
                }
            }
        }
    }
}

/// Decode seed text into a grid of the given dimensions.
pub fn decode(text: &str, rows: usize, cols: usize) -> Result<Grid, SeedError> {
    let mut lines = text.lines();
    let header = lines.next().map(str::trim).unwrap_or("");

    let mut grid = Grid::new(rows, cols);
    match header {
        V1_HEADER => {
            for line in lines {
                if line.trim().is_empty() {
                    continue;
                }
                let (row, col) = parse_v1_line(line)?;
                if !grid.in_bounds(row, col) {
                    return Err(BoundsError::new(row, col, rows, cols).into());
                }
                grid.set(row, col, Cell::Alive);
            }
        }
        V2_HEADER => {
            for line in lines {
                if line.trim().is_empty() {
                    continue;
                }
                let shape = parse_v2_line(line)?;
                shape.check_bounds(&grid)?;
                shape.stamp(&mut grid);
            }
        }
        other => return Err(ParseError::new("seed header", other).into()),
    }
    Ok(grid)
}

/// Read and decode a seed file.
pub fn load<P: AsRef<Path>>(path: P, rows: usize, cols: usize) -> Result<Grid, SeedError> {
    let text = std::fs::read_to_string(path)?;
    decode(&text, rows, cols)
}

/// Encode a grid in v1 form: header plus one `ROW COL` line per alive
/// cell, ascending row-major.
pub fn encode(grid: &Grid) -> String {
    let mut out = String::from(V1_HEADER);
    out.push('\n');
    for (row, col) in grid.alive_cells() {
        out.push_str(&format!("{} {}\n", row, col));
    }
    out
}

/// Encode a grid and write it to a file.
pub fn save<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<(), SeedError> {
    std::fs::write(path, encode(grid))?;
    Ok(())
}

/// Parse a v1 line: two whitespace-separated non-negative integers.
fn parse_v1_line(line: &str) -> Result<(usize, usize), ParseError> {
    let mut fields = line.split_whitespace();
    let row = fields.next();
    let col = fields.next();
    match (row, col, fields.next()) {
        (Some(row), Some(col), None) => {
            let row = row.parse().map_err(|_| ParseError::new("seed line", line))?;
            let col = col.parse().map_err(|_| ParseError::new("seed line", line))?;
            Ok((row, col))
        }
        _ => Err(ParseError::new("seed line", line)),
    }
}

/// Parse a v2 shape line: `(o|.) kind: coord, coord[, coord, coord]`.
///
/// The punctuation `( ) : ,` only delimits; whitespace is insignificant.
fn parse_v2_line(line: &str) -> Result<Shape, ParseError> {
    let cleaned: String = line
        .chars()
        .map(|c| if matches!(c, '(' | ')' | ':' | ',') { ' ' } else { c })
        .collect();
    let mut tokens = cleaned.split_whitespace();

    let fill = match tokens.next() {
        Some("o") => Cell::Alive,
        Some(".") => Cell::Dead,
        _ => return Err(ParseError::new("seed line", line)),
    };
    let kind = tokens
        .next()
        .ok_or_else(|| ParseError::new("seed line", line))?;
    let coords: Vec<usize> = tokens
        .map(|t| t.parse().map_err(|_| ParseError::new("seed line", line)))
        .collect::<Result<_, _>>()?;

    match (kind.to_ascii_lowercase().as_str(), coords.as_slice()) {
        ("cell", &[row, col]) => Ok(Shape::Point { fill, row, col }),
        ("rectangle", &[bottom, left, top, right]) if bottom <= top && left <= right => {
            Ok(Shape::Box {
                fill,
                bottom,
                left,
                top,
                right,
            })
        }
        ("ellipse", &[bottom, left, top, right]) if bottom <= top && left <= right => {
            Ok(Shape::Ellipse {
                fill,
                bottom,
                left,
                top,
                right,
            })
        }
        ("cell" | "rectangle" | "ellipse", _) => Err(ParseError::new("seed line", line)),
        _ => Err(ParseError::new("shape kind", kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_v1() {
        let text = "#version=1.0\n1 2\n3 0\n";
        let grid = decode(text, 5, 5).unwrap();

        assert_eq!(grid.count_alive(), 2);
        assert!(grid.get(1, 2).is_alive());
        assert!(grid.get(3, 0).is_alive());
    }

    #[test]
    fn test_decode_v1_out_of_bounds() {
        let text = "#version=1.0\n1 2\n7 0\n";
        let err = decode(text, 5, 5).unwrap_err();
        assert!(matches!(err, SeedError::Bounds(b) if b.row == 7));
    }

    #[test]
    fn test_decode_v1_malformed_line() {
        for text in [
            "#version=1.0\n1\n",
            "#version=1.0\n1 2 3\n",
            "#version=1.0\na b\n",
            "#version=1.0\n-1 2\n",
        ] {
            let err = decode(text, 5, 5).unwrap_err();
            assert!(matches!(err, SeedError::Parse(_)), "input: {:?}", text);
        }
    }

    #[test]
    fn test_decode_unknown_header() {
        let err = decode("#version=3.0\n", 5, 5).unwrap_err();
        assert!(matches!(err, SeedError::Parse(p) if p.token == "#version=3.0"));
    }

    #[test]
    fn test_decode_v2_cell() {
        let grid = decode("#version=2.0\n(o) cell: 2, 3\n", 5, 5).unwrap();
        assert_eq!(grid.count_alive(), 1);
        assert!(grid.get(2, 3).is_alive());
    }

    #[test]
    fn test_decode_v2_rectangle() {
        let grid = decode("#version=2.0\n(o) rectangle: 0, 0, 2, 2\n", 5, 5).unwrap();

        assert_eq!(grid.count_alive(), 9);
        for row in 0..3 {
            for col in 0..3 {
                assert!(grid.get(row, col).is_alive());
            }
        }
        assert!(!grid.get(3, 0).is_alive());
    }

    #[test]
    fn test_decode_v2_whitespace_insignificant() {
        let a = decode("#version=2.0\n(o) rectangle: 1, 1, 3, 3\n", 6, 6).unwrap();
        let b = decode("#version=2.0\n(o)rectangle:1,1,3,3\n", 6, 6).unwrap();
        let c = decode("#version=2.0\n ( o )  rectangle : 1 , 1 , 3 , 3 \n", 6, 6).unwrap();

        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_decode_v2_ellipse() {
        // 5x5 bounding box: the inscribed ellipse is a diamond-ish disc
        // that keeps the corners dead.
        let grid = decode("#version=2.0\n(o) ellipse: 0, 0, 4, 4\n", 5, 5).unwrap();

        assert!(grid.get(2, 2).is_alive());
        assert!(grid.get(0, 2).is_alive());
        assert!(grid.get(2, 0).is_alive());
        assert!(!grid.get(0, 0).is_alive());
        assert!(!grid.get(4, 4).is_alive());
    }

    #[test]
    fn test_decode_v2_last_write_wins() {
        let text = "#version=2.0\n(o) rectangle: 0, 0, 3, 3\n(.) cell: 1, 1\n";
        let grid = decode(text, 5, 5).unwrap();

        assert!(!grid.get(1, 1).is_alive());
        assert!(grid.get(0, 0).is_alive());
        assert_eq!(grid.count_alive(), 15);
    }

    #[test]
    fn test_decode_v2_unknown_shape() {
        let err = decode("#version=2.0\n(o) triangle: 1, 1\n", 5, 5).unwrap_err();
        assert!(matches!(err, SeedError::Parse(p) if p.token == "triangle"));
    }

    #[test]
    fn test_decode_v2_shape_out_of_bounds() {
        let err = decode("#version=2.0\n(o) rectangle: 0, 0, 2, 6\n", 5, 5).unwrap_err();
        assert!(matches!(err, SeedError::Bounds(b) if b.col == 6));
    }

    #[test]
    fn test_decode_v2_wrong_coord_count() {
        let err = decode("#version=2.0\n(o) rectangle: 0, 0, 2\n", 5, 5).unwrap_err();
        assert!(matches!(err, SeedError::Parse(_)));
    }

    #[test]
    fn test_encode_is_v1_row_major() {
        let grid = decode("#version=2.0\n(o) rectangle: 1, 1, 1, 2\n", 4, 4).unwrap();
        let text = encode(&grid);
        assert_eq!(text, "#version=1.0\n1 1\n1 2\n");
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let original = decode("#version=2.0\n(o) ellipse: 0, 0, 4, 6\n", 8, 8).unwrap();
        let reloaded = decode(&encode(&original), 8, 8).unwrap();
        assert_eq!(reloaded, original);
    }

    #[test]
    fn test_empty_grid_encodes_header_only() {
        let grid = Grid::new(4, 4);
        assert_eq!(encode(&grid), "#version=1.0\n");
    }
}

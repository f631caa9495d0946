//! Dense bounded grid of cell states.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Dead,
    Alive,
}

impl Cell {
    #[inline]
    pub fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Dead
    }
}

/// A dense rows x columns board.
///
/// Owned exclusively by the engine during a run; history snapshots are
/// clones, never aliases. Equality is exact cell-for-cell comparison,
/// which is what steady-state detection relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major cell storage
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-dead grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Dead; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Get a cell state; out-of-range coordinates read as dead.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if self.in_bounds(row, col) {
            self.cells[row * self.cols + col]
        } else {
            Cell::Dead
        }
    }

    /// Set a cell state; out-of-range coordinates are ignored.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if self.in_bounds(row, col) {
            self.cells[row * self.cols + col] = cell;
        }
    }

    /// Coin-flip every cell alive with probability `factor`.
    ///
    /// This is the fallback path when no seed file is given or decoding
    /// fails.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, factor: f64) {
        for cell in &mut self.cells {
            *cell = if rng.gen::<f64>() < factor {
                Cell::Alive
            } else {
                Cell::Dead
            };
        }
    }

    /// Coordinates of all alive cells in ascending row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(|(i, _)| (i / self.cols, i % self.cols))
    }

    pub fn count_alive(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count_alive() == 0
    }
}

impl fmt::Display for Grid {
    /// Plain-text rendering: `#` alive, `.` dead, one row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let ch = if self.get(row, col).is_alive() { '#' } else { '.' };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_grid_is_dead() {
        let grid = Grid::new(4, 6);
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.cols(), 6);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_get_set() {
        let mut grid = Grid::new(5, 5);
        grid.set(2, 3, Cell::Alive);

        assert!(grid.get(2, 3).is_alive());
        assert!(!grid.get(3, 2).is_alive());
        assert_eq!(grid.count_alive(), 1);
    }

    #[test]
    fn test_out_of_range_reads_dead() {
        let grid = Grid::new(4, 4);
        assert!(!grid.get(4, 0).is_alive());
        assert!(!grid.get(0, 100).is_alive());
    }

    #[test]
    fn test_alive_cells_row_major() {
        let mut grid = Grid::new(4, 4);
        grid.set(2, 1, Cell::Alive);
        grid.set(0, 3, Cell::Alive);
        grid.set(2, 0, Cell::Alive);

        let cells: Vec<_> = grid.alive_cells().collect();
        assert_eq!(cells, vec![(0, 3), (2, 0), (2, 1)]);
    }

    #[test]
    fn test_randomize_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut grid = Grid::new(8, 8);

        grid.randomize(&mut rng, 1.0);
        assert_eq!(grid.count_alive(), 64);

        grid.randomize(&mut rng, 0.0);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_clone_does_not_alias() {
        let mut grid = Grid::new(4, 4);
        let snapshot = grid.clone();
        grid.set(1, 1, Cell::Alive);

        assert!(snapshot.is_empty());
        assert_ne!(grid, snapshot);
    }
}

//! Generation-stepping engine: neighbour counting, rule application,
//! history tracking, steady-state detection, and the ghost overlay.

use crate::config::Config;
use crate::grid::{Cell, Grid};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Bounded FIFO of prior grid snapshots.
///
/// Front is the most recent generation; the oldest snapshot is evicted
/// once capacity is exceeded. Snapshots are clones of the live grid,
/// never aliases, and exist only to be compared for equality.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<Grid>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a snapshot as the most recent entry, evicting the oldest if
    /// the buffer is full.
    pub fn push(&mut self, grid: Grid) {
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_back();
        }
        self.snapshots.push_front(grid);
    }

    /// Index of the first snapshot equal to `grid`, most recent first.
    pub fn position_of(&self, grid: &Grid) -> Option<usize> {
        self.snapshots.iter().position(|s| s == grid)
    }

    /// Snapshot `index` generations back (0 = most recent).
    pub fn get(&self, index: usize) -> Option<&Grid> {
        self.snapshots.get(index)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// The new grid matched a snapshot still held in history.
    Steady {
        /// Generation distance to the matching snapshot
        periodicity: usize,
        /// True when the match is the immediately preceding generation,
        /// i.e. the grid stopped changing at all
        fixed_point: bool,
    },
    /// The generation limit was reached with no repeated state.
    GenerationLimit,
}

/// Summary of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Generations actually executed
    pub generations: u64,
    pub halt: Halt,
}

/// The simulation engine.
///
/// Strictly sequential: each generation is a pure function of the previous
/// grid plus configuration. The engine performs no I/O and owns its grid
/// and history exclusively for the run's duration; once given a validated
/// configuration, stepping never fails.
pub struct Engine {
    grid: Grid,
    history: History,
    config: Config,
    /// Neighbour offsets precomputed from the active neighbourhood
    offsets: Vec<(i64, i64)>,
    generation: u64,
    halted: Option<Halt>,
}

impl Engine {
    /// Create an engine over an already-built grid.
    ///
    /// The grid must match the configured board dimensions.
    pub fn new(config: Config, grid: Grid) -> Self {
        debug_assert_eq!(grid.rows(), config.rows);
        debug_assert_eq!(grid.cols(), config.columns);

        let offsets = config.neighbourhood.offsets();
        Self {
            grid,
            history: History::new(config.memory),
            offsets,
            config,
            generation: 0,
            halted: None,
        }
    }

    /// Create an engine over a randomly seeded grid.
    pub fn new_random(config: Config) -> Self {
        let seed = rand::thread_rng().gen();
        Self::new_random_with_seed(config, seed)
    }

    /// Create an engine over a randomly seeded grid with a specific RNG
    /// seed for reproducibility.
    pub fn new_random_with_seed(config: Config, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut grid = Grid::new(config.rows, config.columns);
        grid.randomize(&mut rng, config.random_factor);
        Self::new(config, grid)
    }

    /// Advance one generation.
    ///
    /// Returns the halt reason once the run has stopped; further calls
    /// leave the engine untouched and keep returning it.
    pub fn step(&mut self) -> Option<Halt> {
        if self.halted.is_some() {
            return self.halted;
        }

        let next = self.next_generation();

        // Pre-transition snapshot goes in first, so a fixed point shows up
        // as a match at index 0.
        self.history.push(self.grid.clone());
        self.grid = next;
        self.generation += 1;

        if let Some(index) = self.history.position_of(&self.grid) {
            self.halted = Some(Halt::Steady {
                periodicity: index + 1,
                fixed_point: index == 0,
            });
        } else if self.generation >= self.config.generations {
            self.halted = Some(Halt::GenerationLimit);
        }
        self.halted
    }

    /// Compute the next grid from the current one.
    ///
    /// Every cell reads the pre-transition grid only, so all cells
    /// transition simultaneously.
    fn next_generation(&self) -> Grid {
        let mut next = Grid::new(self.grid.rows(), self.grid.cols());
        for row in 0..self.grid.rows() {
            for col in 0..self.grid.cols() {
                let count = self.live_neighbours(row, col);
                let alive = if self.grid.get(row, col).is_alive() {
                    self.config.survival.contains(count)
                } else {
                    self.config.birth.contains(count)
                };
                if alive {
                    next.set(row, col, Cell::Alive);
                }
            }
        }
        next
    }

    /// Count alive neighbours of a cell.
    ///
    /// Bounded mode drops out-of-range neighbours from the sum; periodic
    /// mode wraps them to the opposite edge instead.
    fn live_neighbours(&self, row: usize, col: usize) -> u32 {
        let rows = self.grid.rows() as i64;
        let cols = self.grid.cols() as i64;
        let mut count = 0;

        for &(dr, dc) in &self.offsets {
            let mut r = row as i64 + dr;
            let mut c = col as i64 + dc;
            if self.config.periodic {
                r = (r % rows + rows) % rows;
                c = (c % cols + cols) % cols;
            } else if r < 0 || r >= rows || c < 0 || c >= cols {
                continue;
            }
            if self.grid.get(r as usize, c as usize).is_alive() {
                count += 1;
            }
        }
        count
    }

    /// Run until the engine halts, returning a summary.
    pub fn run(&mut self) -> RunReport {
        loop {
            if let Some(halt) = self.step() {
                return RunReport {
                    generations: self.generation,
                    halt,
                };
            }
        }
    }

    /// Run until halt, invoking `callback` after every generation.
    ///
    /// This is the render boundary: the callback sees the post-transition
    /// engine and may draw it however it chooses.
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> RunReport
    where
        F: FnMut(&Engine),
    {
        loop {
            let halt = self.step();
            callback(self);
            if let Some(halt) = halt {
                return RunReport {
                    generations: self.generation,
                    halt,
                };
            }
        }
    }

    /// Display-support overlay with fading trails of recently dead cells.
    ///
    /// Value 1 marks a cell alive now; values 2 to 4 mark a cell dead now
    /// but alive 1 to 3 generations ago (most recent match wins); 0 is
    /// everything else. Pure: recomputable on demand, never mutates the
    /// engine.
    pub fn ghost_overlay(&self) -> Vec<Vec<u8>> {
        let mut overlay = vec![vec![0u8; self.grid.cols()]; self.grid.rows()];
        for row in 0..self.grid.rows() {
            for col in 0..self.grid.cols() {
                if self.grid.get(row, col).is_alive() {
                    overlay[row][col] = 1;
                    continue;
                }
                for age in 0..3 {
                    if let Some(snapshot) = self.history.get(age) {
                        if snapshot.get(row, col).is_alive() {
                            overlay[row][col] = age as u8 + 2;
                            break;
                        }
                    }
                }
            }
        }
        overlay
    }

    /// The post-transition grid of the latest generation.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Generations executed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Halt reason, once the run has stopped.
    pub fn halted(&self) -> Option<Halt> {
        self.halted
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}

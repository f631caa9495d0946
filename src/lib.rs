//! # GRIDLIFE
//!
//! Generalized life-like cellular automaton simulator on a bounded 2D grid.
//!
//! ## Features
//!
//! - **Configurable rules**: arbitrary birth/survival sets, written as
//!   values or ranges (`( 2 3...6 )`)
//! - **Configurable geometry**: Chebyshev or Manhattan neighbourhoods of
//!   order 1-10, with optional self-counting and toroidal wraparound
//! - **Steady-state detection**: bounded history of prior generations,
//!   periodicity reporting
//! - **Seed files**: coordinate-list (v1) and shape-list (v2) formats
//! - **Reproducible**: seeded random number generation
//!
//! ## Quick Start
//!
//! ```rust
//! use gridlife::{Config, Engine, Halt};
//!
//! let mut config = Config::default();
//! config.rows = 10;
//! config.columns = 10;
//!
//! let mut engine = Engine::new_random_with_seed(config, 42);
//! let report = engine.run();
//!
//! match report.halt {
//!     Halt::Steady { periodicity, .. } => {
//!         println!("steady after {} generations, period {}", report.generations, periodicity)
//!     }
//!     Halt::GenerationLimit => println!("no steady state found"),
//! }
//! ```
//!
//! ## Seed files
//!
//! ```rust
//! use gridlife::seed;
//!
//! let grid = seed::decode("#version=2.0\n(o) rectangle: 1, 1, 3, 3\n", 8, 8).unwrap();
//! let v1 = seed::encode(&grid);
//! assert!(v1.starts_with("#version=1.0"));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod neighbourhood;
pub mod rules;
pub mod seed;

// Re-export main types
pub use config::{Config, ConfigWarning};
pub use engine::{Engine, Halt, History, RunReport};
pub use grid::{Cell, Grid};
pub use neighbourhood::{Metric, Neighbourhood};
pub use rules::RuleSet;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

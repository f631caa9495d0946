//! Error types for the simulation core.
//!
//! Every error here is recoverable by construction: call sites are expected
//! to catch it and substitute a default value or a randomly generated grid,
//! logging a warning. The engine itself never fails once its inputs have
//! been validated.

use std::fmt;

/// A token or line that could not be interpreted.
///
/// Always carries the offending input verbatim so the caller can show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// What was being parsed when it failed
    pub what: &'static str,
    /// The offending token or line, verbatim
    pub token: String,
}

impl ParseError {
    pub fn new(what: &'static str, token: impl Into<String>) -> Self {
        Self {
            what,
            token: token.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.what, self.token)
    }
}

impl std::error::Error for ParseError {}

/// A coordinate or shape extent that falls outside the target grid.
///
/// Distinct from [`ParseError`] so callers can choose a different fallback
/// message ("seed too large for board" rather than "seed file malformed").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundsError {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}

impl BoundsError {
    pub fn new(row: usize, col: usize, rows: usize, cols: usize) -> Self {
        Self {
            row,
            col,
            rows,
            cols,
        }
    }
}

impl fmt::Display for BoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "coordinate ({}, {}) outside {}x{} board",
            self.row, self.col, self.rows, self.cols
        )
    }
}

impl std::error::Error for BoundsError {}

/// A configuration field outside its documented numeric bound.
///
/// Raised at field-assignment time, never inside the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeError {
    pub field: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl RangeError {
    pub fn new(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self {
            field,
            value,
            min,
            max,
        }
    }
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} outside allowed range [{}, {}]",
            self.field, self.value, self.min, self.max
        )
    }
}

impl std::error::Error for RangeError {}

/// Errors that can occur while reading or decoding a seed file.
#[derive(Debug)]
pub enum SeedError {
    /// Malformed header, line, or shape token
    Parse(ParseError),
    /// Seed coordinates do not fit the target board
    Bounds(BoundsError),
    /// Underlying file could not be read or written
    Io(std::io::Error),
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "seed format invalid: {}", e),
            Self::Bounds(e) => write!(f, "seed too large for board: {}", e),
            Self::Io(e) => write!(f, "seed IO error: {}", e),
        }
    }
}

impl std::error::Error for SeedError {}

impl From<ParseError> for SeedError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<BoundsError> for SeedError {
    fn from(e: BoundsError) -> Self {
        Self::Bounds(e)
    }
}

impl From<std::io::Error> for SeedError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_carries_token() {
        let err = ParseError::new("rule token", "3..x");
        assert_eq!(err.token, "3..x");
        assert!(err.to_string().contains("3..x"));
    }

    #[test]
    fn test_seed_error_distinguishes_bounds() {
        let err: SeedError = BoundsError::new(10, 2, 8, 8).into();
        assert!(matches!(err, SeedError::Bounds(_)));
        assert!(err.to_string().contains("seed too large"));
    }
}

//! Neighbourhood geometry: which cells count as adjacent.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Distance metric for adjacency.
///
/// Exactly two metrics exist, so this is a plain variant rather than a
/// trait object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// max(|dr|, |dc|); order 1 gives the classic Moore neighbourhood
    Chebyshev,
    /// |dr| + |dc|; order 1 gives the von Neumann neighbourhood
    Manhattan,
}

impl Metric {
    /// Parse a metric name, case-insensitive. The classic neighbourhood
    /// names are accepted as aliases.
    pub fn parse(token: &str) -> Result<Self, ParseError> {
        match token.to_ascii_lowercase().as_str() {
            "chebyshev" | "moore" => Ok(Self::Chebyshev),
            "manhattan" | "vonneumann" => Ok(Self::Manhattan),
            _ => Err(ParseError::new("neighbourhood type", token)),
        }
    }

    /// Metric distance between two coordinates.
    pub fn distance(self, r1: i64, c1: i64, r2: i64, c2: i64) -> u64 {
        let dr = (r1 - r2).unsigned_abs();
        let dc = (c1 - c2).unsigned_abs();
        match self {
            Self::Chebyshev => dr.max(dc),
            Self::Manhattan => dr + dc,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chebyshev => write!(f, "chebyshev"),
            Self::Manhattan => write!(f, "manhattan"),
        }
    }
}

/// Adjacency rule: metric, order, and whether a cell counts itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbourhood {
    pub metric: Metric,
    /// Maximum metric distance still considered adjacent, 1 to 10
    pub order: u32,
    /// Whether a cell is its own neighbour
    pub count_self: bool,
}

impl Default for Neighbourhood {
    /// Classic Moore neighbourhood: Chebyshev, order 1, no self-count.
    fn default() -> Self {
        Self {
            metric: Metric::Chebyshev,
            order: 1,
            count_self: false,
        }
    }
}

impl Neighbourhood {
    pub fn new(metric: Metric, order: u32, count_self: bool) -> Self {
        Self {
            metric,
            order,
            count_self,
        }
    }

    /// Whether `(r2, c2)` is a neighbour of `(r1, c1)`.
    ///
    /// Identical coordinates resolve to the self-counting flag.
    pub fn is_neighbour(&self, r1: i64, c1: i64, r2: i64, c2: i64) -> bool {
        if r1 == r2 && c1 == c2 {
            self.count_self
        } else {
            self.metric.distance(r1, c1, r2, c2) <= self.order as u64
        }
    }

    /// Relative offsets of every neighbour of a cell, in row-major order.
    ///
    /// Includes `(0, 0)` when the neighbourhood counts itself. The engine
    /// computes this once per run instead of re-testing adjacency per cell.
    pub fn offsets(&self) -> Vec<(i64, i64)> {
        let order = self.order as i64;
        let mut offsets = Vec::new();
        for dr in -order..=order {
            for dc in -order..=order {
                if self.is_neighbour(0, 0, dr, dc) {
                    offsets.push((dr, dc));
                }
            }
        }
        offsets
    }

    /// Maximum possible neighbour count per cell.
    ///
    /// Bounds which rule-set members are reachable at all.
    pub fn size(&self) -> u32 {
        self.offsets().len() as u32
    }
}

impl fmt::Display for Neighbourhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} order {}{}",
            self.metric,
            self.order,
            if self.count_self { " (self-counting)" } else { "" }
        )
    }
}

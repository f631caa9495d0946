//! Birth and survival rule sets.
//!
//! A rule set is an ordered collection of distinct neighbour counts, written
//! as individual values or contiguous runs (`3...6`). Membership decides
//! whether a cell survives or is born for a given neighbour count.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A contiguous run of neighbour counts, inclusive on both ends.
///
/// A singleton value is a run with `lo == hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    lo: u32,
    hi: u32,
}

/// An ordered set of distinct neighbour counts.
///
/// Immutable once constructed; the configuration layer replaces a rule set
/// wholesale when validation reverts it to a default, it never mutates one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuleSet {
    /// Non-overlapping runs sorted ascending. Adjacent runs stay separate
    /// so the textual form survives a parse/format round trip.
    runs: Vec<Run>,
}

impl RuleSet {
    /// Build a rule set from a trusted literal list of values.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        let runs = values.into_iter().map(|v| Run { lo: v, hi: v }).collect();
        Self {
            runs: Self::normalize(runs),
        }
    }

    /// Parse a sequence of rule tokens.
    ///
    /// Each token is either a bare non-negative integer or a range of the
    /// form `A...B` with `A <= B`. Any other token is a parse error carrying
    /// the token verbatim.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, ParseError> {
        let mut runs = Vec::new();
        for token in tokens {
            let token = token.as_ref().trim();
            let run = if let Some((lo, hi)) = token.split_once("...") {
                let lo = parse_value(lo, token)?;
                let hi = parse_value(hi, token)?;
                if lo > hi {
                    return Err(ParseError::new("rule token", token));
                }
                Run { lo, hi }
            } else {
                let v = parse_value(token, token)?;
                Run { lo: v, hi: v }
            };
            runs.push(run);
        }
        Ok(Self {
            runs: Self::normalize(runs),
        })
    }

    /// Sort runs ascending and merge overlaps and duplicates.
    ///
    /// Merely adjacent runs are left alone: `2` followed by `3...6` stays
    /// two runs, so formatting reproduces the input.
    fn normalize(mut runs: Vec<Run>) -> Vec<Run> {
        runs.sort_by_key(|r| (r.lo, r.hi));
        let mut merged: Vec<Run> = Vec::new();
        for run in runs {
            if let Some(last) = merged.last_mut() {
                if run.lo <= last.hi {
                    last.hi = last.hi.max(run.hi);
                    continue;
                }
            }
            merged.push(run);
        }
        merged
    }

    /// Membership test for a neighbour count.
    pub fn contains(&self, n: u32) -> bool {
        self.runs.iter().any(|r| r.lo <= n && n <= r.hi)
    }

    /// Largest member, or `None` for an empty set.
    pub fn max_member(&self) -> Option<u32> {
        self.runs.last().map(|r| r.hi)
    }

    /// First (lowest) member strictly greater than `limit`, if any.
    ///
    /// Used by configuration validation to report the first value that
    /// exceeds the neighbourhood size.
    pub fn first_above(&self, limit: u32) -> Option<u32> {
        self.runs
            .iter()
            .find(|r| r.hi > limit)
            .map(|r| r.lo.max(limit + 1))
    }

    /// All members in ascending order.
    pub fn values(&self) -> Vec<u32> {
        self.runs.iter().flat_map(|r| r.lo..=r.hi).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

fn parse_value(text: &str, token: &str) -> Result<u32, ParseError> {
    text.trim()
        .parse()
        .map_err(|_| ParseError::new("rule token", token))
}

impl fmt::Display for RuleSet {
    /// Renders `( 2 3...6 )`: bare singletons, `A...B` runs, single spaces,
    /// with a space inside each parenthesis.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for run in &self.runs {
            if run.lo == run.hi {
                write!(f, " {}", run.lo)?;
            } else {
                write!(f, " {}...{}", run.lo, run.hi)?;
            }
        }
        write!(f, " )")
    }
}

impl FromStr for RuleSet {
    type Err = ParseError;

    /// Parse the formatted form back: parentheses are ignored, remaining
    /// whitespace-separated tokens go through [`RuleSet::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s
            .split_whitespace()
            .map(|t| t.trim_matches(|c| c == '(' || c == ')'))
            .filter(|t| !t.is_empty())
            .collect();
        Self::parse(&tokens)
    }
}

impl From<RuleSet> for String {
    fn from(rules: RuleSet) -> Self {
        rules.to_string()
    }
}

impl TryFrom<String> for RuleSet {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

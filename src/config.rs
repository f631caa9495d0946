//! Simulation configuration: field ranges, cross-field reconciliation,
//! and YAML load/save.

use crate::error::RangeError;
use crate::neighbourhood::Neighbourhood;
use crate::rules::RuleSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Validated simulation configuration.
///
/// The engine trusts that [`Config::validate`] and [`Config::reconcile`]
/// have run before it is handed one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Board rows, 4 to 48
    pub rows: usize,
    /// Board columns, 4 to 48
    pub columns: usize,
    /// Generation limit, at least 4
    pub generations: u64,
    /// Display updates per second, 1 to 30 (pacing is the caller's concern)
    pub update_rate: u32,
    /// Probability a cell starts alive when randomly seeded, 0 to 1
    pub random_factor: f64,
    /// History depth for steady-state detection, 4 to 512
    pub memory: usize,
    /// Neighbour counts that keep an alive cell alive
    pub survival: RuleSet,
    /// Neighbour counts that bring a dead cell to life
    pub birth: RuleSet,
    pub neighbourhood: Neighbourhood,
    /// Toroidal wraparound at the board edges
    pub periodic: bool,
    /// Overlay fading trails of recently dead cells
    pub ghost: bool,
    /// Wait for the caller between generations
    pub step_mode: bool,
    /// Seed file to decode; random grid when absent
    pub seed_file: Option<PathBuf>,
    /// Where to write the final grid in v1 seed format
    pub output_file: Option<PathBuf>,
}

impl Config {
    /// Default survival set: a live cell needs 2 or 3 live neighbours.
    pub fn default_survival() -> RuleSet {
        RuleSet::new([2, 3])
    }

    /// Default birth set: a dead cell needs exactly 3 live neighbours.
    pub fn default_birth() -> RuleSet {
        RuleSet::new([3])
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 12,
            columns: 45,
            generations: 50,
            update_rate: 5,
            random_factor: 0.5,
            memory: 16,
            survival: Self::default_survival(),
            birth: Self::default_birth(),
            neighbourhood: Neighbourhood::default(),
            periodic: false,
            ghost: false,
            step_mode: false,
            seed_file: None,
            output_file: None,
        }
    }
}

/// A cross-field conflict that was resolved by reverting to a default.
///
/// Reconciliation never hard-fails; the caller decides how to surface
/// these (the CLI logs them as warnings).
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// Neighbourhood order too large for the board; neighbourhood reset
    NeighbourhoodTooLarge { order: u32, rows: usize, columns: usize },
    /// A survival count can never be reached; survival set reset
    SurvivalExceedsNeighbourhood { value: u32, size: u32 },
    /// A birth count can never be reached; birth set reset
    BirthExceedsNeighbourhood { value: u32, size: u32 },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NeighbourhoodTooLarge { order, rows, columns } => write!(
                f,
                "neighbourhood order {} does not fit a {}x{} board, reverting to default",
                order, rows, columns
            ),
            Self::SurvivalExceedsNeighbourhood { value, size } => write!(
                f,
                "survival count {} exceeds neighbourhood size {}, reverting to default",
                value, size
            ),
            Self::BirthExceedsNeighbourhood { value, size } => write!(
                f,
                "birth count {} exceeds neighbourhood size {}, reverting to default",
                value, size
            ),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// Range checks run on the loaded values; cross-field reconciliation is
    /// left to the caller so it can log the warnings.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Check every field against its documented numeric bound.
    ///
    /// Reports the first field found out of range.
    pub fn validate(&self) -> Result<(), RangeError> {
        check_range("rows", self.rows as f64, 4.0, 48.0)?;
        check_range("columns", self.columns as f64, 4.0, 48.0)?;
        check_range("generations", self.generations as f64, 4.0, f64::MAX)?;
        check_range("update_rate", self.update_rate as f64, 1.0, 30.0)?;
        check_range("random_factor", self.random_factor, 0.0, 1.0)?;
        check_range("memory", self.memory as f64, 4.0, 512.0)?;
        check_range("neighbourhood order", self.neighbourhood.order as f64, 1.0, 10.0)?;
        Ok(())
    }

    /// Reconcile cross-field constraints, reverting to defaults on conflict.
    ///
    /// Must re-run whenever rows, columns, or the neighbourhood change.
    /// Order matters: the board-size check may replace the neighbourhood,
    /// and the rule-set checks test against the size recomputed after that.
    pub fn reconcile(&mut self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if (self.neighbourhood.order as usize) * 2 >= self.rows.min(self.columns) {
            warnings.push(ConfigWarning::NeighbourhoodTooLarge {
                order: self.neighbourhood.order,
                rows: self.rows,
                columns: self.columns,
            });
            self.neighbourhood = Neighbourhood::default();
        }

        let size = self.neighbourhood.size();

        if let Some(value) = self.survival.first_above(size) {
            warnings.push(ConfigWarning::SurvivalExceedsNeighbourhood { value, size });
            self.survival = Self::default_survival();
        }

        if let Some(value) = self.birth.first_above(size) {
            warnings.push(ConfigWarning::BirthExceedsNeighbourhood { value, size });
            self.birth = Self::default_birth();
        }

        warnings
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), RangeError> {
    if value < min || value > max {
        Err(RangeError::new(field, value, min, max))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbourhood::Metric;

    #[test]
    fn test_default_config_valid() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.reconcile().is_empty());
    }

    #[test]
    fn test_validate_reports_field() {
        let mut config = Config::default();
        config.rows = 3;

        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "rows");

        config.rows = 12;
        config.random_factor = 1.5;
        assert_eq!(config.validate().unwrap_err().field, "random_factor");
    }

    #[test]
    fn test_reconcile_resets_oversized_neighbourhood() {
        let mut config = Config::default();
        config.rows = 6;
        config.columns = 6;
        config.neighbourhood = Neighbourhood::new(Metric::Chebyshev, 3, false);

        let warnings = config.reconcile();
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            warnings[0],
            ConfigWarning::NeighbourhoodTooLarge { order: 3, .. }
        ));
        assert_eq!(config.neighbourhood, Neighbourhood::default());
    }

    #[test]
    fn test_reconcile_resets_unreachable_rules() {
        let mut config = Config::default();
        // Manhattan order 1 has size 4; counts above that are unreachable.
        config.neighbourhood = Neighbourhood::new(Metric::Manhattan, 1, false);
        config.survival = RuleSet::new([2, 5, 7]);
        config.birth = RuleSet::new([3]);

        let warnings = config.reconcile();
        assert_eq!(
            warnings,
            vec![ConfigWarning::SurvivalExceedsNeighbourhood { value: 5, size: 4 }]
        );
        assert_eq!(config.survival, Config::default_survival());
        assert_eq!(config.birth, RuleSet::new([3]));
    }

    #[test]
    fn test_reconcile_checks_rules_against_new_neighbourhood() {
        // Board check runs first: the order-4 neighbourhood is replaced by
        // the default (size 8) before the rule sets are tested, so a
        // survival count of 8 ends up reachable.
        let mut config = Config::default();
        config.rows = 6;
        config.columns = 6;
        config.neighbourhood = Neighbourhood::new(Metric::Manhattan, 4, false);
        config.survival = RuleSet::new([8]);

        let warnings = config.reconcile();
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.survival, RuleSet::new([8]));
    }

    #[test]
    fn test_birth_reset_is_independent() {
        let mut config = Config::default();
        config.neighbourhood = Neighbourhood::new(Metric::Manhattan, 1, false);
        config.survival = RuleSet::new([2]);
        config.birth = RuleSet::new([6]);

        let warnings = config.reconcile();
        assert_eq!(
            warnings,
            vec![ConfigWarning::BirthExceedsNeighbourhood { value: 6, size: 4 }]
        );
        assert_eq!(config.survival, RuleSet::new([2]));
        assert_eq!(config.birth, Config::default_birth());
    }

    #[test]
    fn test_config_yaml_roundtrip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded: Config = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(loaded.rows, config.rows);
        assert_eq!(loaded.survival, config.survival);
        assert_eq!(loaded.neighbourhood, config.neighbourhood);
    }
}

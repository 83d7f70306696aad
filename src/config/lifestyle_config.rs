// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rule thresholds and heuristic score weights, loadable from TOML

use crate::constants::{defaults, thresholds};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration of the recommendation rule engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LifestyleConfig {
    pub thresholds: RuleThresholds,
    pub score_weights: ScoreWeights,
}

/// Comparison thresholds of the five rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleThresholds {
    /// BMI strictly below is underweight
    pub underweight_bmi: f64,
    /// BMI strictly above is overweight
    pub overweight_bmi: f64,
    pub min_water_liters: f64,
    pub min_workout_days: u8,
    pub min_meals_per_day: u8,
}

/// Weights of the heuristic score formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub bmi_divisor: f64,
    pub water: f64,
    pub workout: f64,
    pub meals: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            underweight_bmi: thresholds::UNDERWEIGHT_BMI,
            overweight_bmi: thresholds::OVERWEIGHT_BMI,
            min_water_liters: thresholds::MIN_WATER_LITERS,
            min_workout_days: thresholds::MIN_WORKOUT_DAYS,
            min_meals_per_day: thresholds::MIN_MEALS_PER_DAY,
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            bmi_divisor: thresholds::SCORE_BMI_DIVISOR,
            water: thresholds::SCORE_WATER_WEIGHT,
            workout: thresholds::SCORE_WORKOUT_WEIGHT,
            meals: thresholds::SCORE_MEALS_WEIGHT,
        }
    }
}

impl LifestyleConfig {
    /// Load configuration from file or use defaults.
    ///
    /// Lookup order: explicit path, `./lifestyle_config.toml`, the user config
    /// directory, then the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::load_from_file(config_path);
        }

        let local = Path::new(defaults::LIFESTYLE_CONFIG_FILE);
        if local.exists() {
            return Self::load_from_file(local);
        }

        if let Some(user_path) = user_config_path() {
            if user_path.exists() {
                return Self::load_from_file(&user_path);
            }
        }

        debug!("No lifestyle config file found, using built-in thresholds");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read lifestyle config file: {}", path.display()))?;

        let config: LifestyleConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse lifestyle config file: {}", path.display()))?;

        config.validate()?;
        debug!(path = %path.display(), "Loaded lifestyle config");
        Ok(config)
    }

    /// Reject configurations the rule engine cannot evaluate sensibly
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("thresholds.underweight_bmi", self.thresholds.underweight_bmi),
            ("thresholds.overweight_bmi", self.thresholds.overweight_bmi),
            ("thresholds.min_water_liters", self.thresholds.min_water_liters),
            ("score_weights.bmi_divisor", self.score_weights.bmi_divisor),
            ("score_weights.water", self.score_weights.water),
            ("score_weights.workout", self.score_weights.workout),
            ("score_weights.meals", self.score_weights.meals),
        ];
        if let Some((name, value)) = values.iter().find(|(_, value)| !value.is_finite()) {
            return Err(anyhow::anyhow!("{name} must be a finite number, got {value}"));
        }

        if self.thresholds.underweight_bmi > self.thresholds.overweight_bmi {
            return Err(anyhow::anyhow!(
                "underweight_bmi ({}) must not exceed overweight_bmi ({})",
                self.thresholds.underweight_bmi,
                self.thresholds.overweight_bmi
            ));
        }
        if self.score_weights.bmi_divisor == 0.0 {
            return Err(anyhow::anyhow!("score_weights.bmi_divisor must not be zero"));
        }
        Ok(())
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(defaults::CONFIG_DIR_NAME)
            .join(defaults::LIFESTYLE_CONFIG_FILE)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_rule_constants() {
        let config = LifestyleConfig::default();
        assert_eq!(config.thresholds.underweight_bmi, 18.5);
        assert_eq!(config.thresholds.overweight_bmi, 25.0);
        assert_eq!(config.thresholds.min_water_liters, 2.5);
        assert_eq!(config.thresholds.min_workout_days, 3);
        assert_eq!(config.thresholds.min_meals_per_day, 3);
        assert_eq!(config.score_weights.meals, 0.8);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[thresholds]\nmin_water_liters = 3.0").unwrap();

        let config = LifestyleConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.thresholds.min_water_liters, 3.0);
        assert_eq!(config.thresholds.min_workout_days, 3);
        assert_eq!(config.score_weights, ScoreWeights::default());
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[thresholds]\nunderweight_bmi = 30.0\noverweight_bmi = 20.0").unwrap();
        assert!(LifestyleConfig::load(Some(file.path())).is_err());

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "thresholds = \"nope\"").unwrap();
        let err = LifestyleConfig::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        for line in [
            "[score_weights]\nbmi_divisor = nan",
            "[thresholds]\nunderweight_bmi = nan",
            "[thresholds]\noverweight_bmi = inf",
            "[score_weights]\nmeals = -inf",
        ] {
            let mut file = NamedTempFile::new().unwrap();
            writeln!(file, "{line}").unwrap();
            let err = LifestyleConfig::load(Some(file.path())).unwrap_err();
            assert!(err.to_string().contains("must be a finite number"), "{line}: {err}");
        }
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = LifestyleConfig::load(Some(Path::new("/nonexistent/lifestyle_config.toml")));
        assert!(result.is_err());
    }
}

//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! engine configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::PayMonth;

use super::types::{EngineMetadata, PayrollConfig, PayrollRules};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/payroll/
/// ├── engine.yaml          # Engine metadata
/// └── rules/
///     ├── 1970-01-01.yaml  # Base rules for historical months
///     └── 2024-04-01.yaml  # Payroll rules effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll").unwrap();
/// let rules = loader.get_rules("2025-06".parse().unwrap()).unwrap();
/// println!("Paid absences per month: {}", rules.paid_absence_allowance);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails with `ConfigNotFound` if `engine.yaml` or the `rules` directory
    /// is missing (or holds no rule files), and with `ConfigParseError` if
    /// any file is invalid YAML or fails validation.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/payroll")?;
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine_path = path.join("engine.yaml");
        let metadata = Self::load_yaml::<EngineMetadata>(&engine_path)?;

        let rules_dir = path.join("rules");
        let rules = Self::load_rules(&rules_dir)?;

        debug!(
            path = %path.display(),
            version = %metadata.version,
            rule_sets = rules.len(),
            "Loaded payroll configuration"
        );

        Ok(Self {
            config: PayrollConfig::new(metadata, rules),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads and validates all rule files from the rules directory.
    fn load_rules(rules_dir: &Path) -> EngineResult<Vec<PayrollRules>> {
        let rules_dir_str = rules_dir.display().to_string();

        let entries = fs::read_dir(rules_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rules_dir_str.clone(),
        })?;

        let mut rules = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rules_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let rule_set = Self::load_yaml::<PayrollRules>(&path)?;
                rule_set
                    .validate()
                    .map_err(|message| EngineError::ConfigParseError {
                        path: path.display().to_string(),
                        message,
                    })?;
                rules.push(rule_set);
            }
        }

        if rules.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rule files found)", rules_dir_str),
            });
        }

        Ok(rules)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the engine metadata.
    pub fn engine(&self) -> &EngineMetadata {
        self.config.engine()
    }

    /// Gets the payroll rules in effect for a month.
    pub fn get_rules(&self, month: PayMonth) -> EngineResult<&PayrollRules> {
        self.config.rules_for(month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn config_path() -> &'static str {
        "./config/payroll"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.engine().name, "Monthly Payroll Engine");
        assert_eq!(loader.engine().currency, "INR");
    }

    #[test]
    fn test_get_rules_for_month() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let rules = loader.get_rules("2025-06".parse().unwrap()).unwrap();
        assert_eq!(rules.paid_absence_allowance, 1);
        assert_eq!(rules.half_day_weight, Decimal::new(5, 1));
        assert_eq!(rules.late_penalty_minutes, 10);
        assert_eq!(rules.months_per_year, 12);
    }

    #[test]
    fn test_rules_loaded_for_each_file() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.config().rules().len(), 3);
    }

    #[test]
    fn test_historical_month_uses_base_rules() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let rules = loader.get_rules("2019-03".parse().unwrap()).unwrap();
        assert_eq!(
            rules.effective_date,
            chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
        );
        assert_eq!(rules.paid_absence_allowance, 1);
    }

    #[test]
    fn test_rules_not_found_for_month_before_effective() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let result = loader.get_rules("1969-12".parse().unwrap());
        assert!(matches!(result, Err(EngineError::RulesNotFound { .. })));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("engine.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }
}

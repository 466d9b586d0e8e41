//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a
//! withholding schedule from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    BracketConfig, DeductionConfig, OverrideConfig, ScheduleConfig, ScheduleMetadata,
};

/// Loads and provides access to a withholding schedule.
///
/// The `ConfigLoader` reads YAML schedule files from a directory and
/// validates the table shapes before handing out a [`ScheduleConfig`].
///
/// # Directory Structure
///
/// The schedule directory should have the following structure:
/// ```text
/// config/jp2024/
/// ├── schedule.yaml    # Schedule metadata
/// ├── deductions.yaml  # Deduction tier tables
/// ├── brackets.yaml    # Primary brackets and secondary bands
/// └── overrides.yaml   # Verification override table
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/jp2024").unwrap();
/// println!("Loaded schedule: {}", loader.metadata().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ScheduleConfig,
}

impl ConfigLoader {
    /// Loads a schedule from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the schedule directory (e.g., "./config/jp2024")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any table violates its ordering or bound invariants
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/jp2024")?;
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<ScheduleMetadata>(&path.join("schedule.yaml"))?;
        let deductions = Self::load_yaml::<DeductionConfig>(&path.join("deductions.yaml"))?;
        let brackets = Self::load_yaml::<BracketConfig>(&path.join("brackets.yaml"))?;
        let overrides = Self::load_yaml::<OverrideConfig>(&path.join("overrides.yaml"))?;

        let config = ScheduleConfig::new(metadata, deductions, brackets, overrides);
        Self::validate(&config)?;

        Ok(Self { config })
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

    /// Validates the structural invariants of a loaded schedule.
    ///
    /// Every table must be ordered ascending with exactly one open-ended
    /// top row, and override bands must be non-overlapping with
    /// `lower_bound < upper_bound`.
    fn validate(config: &ScheduleConfig) -> EngineResult<()> {
        Self::validate_bounds(
            "employment deduction tiers",
            &config
                .deductions()
                .employment
                .iter()
                .map(|t| t.upper_bound)
                .collect::<Vec<_>>(),
        )?;
        Self::validate_bounds(
            "basic deduction tiers",
            &config
                .deductions()
                .basic
                .iter()
                .map(|t| t.upper_bound)
                .collect::<Vec<_>>(),
        )?;
        Self::validate_bounds(
            "primary tax brackets",
            &config
                .brackets()
                .primary
                .iter()
                .map(|b| b.upper_bound)
                .collect::<Vec<_>>(),
        )?;
        Self::validate_bounds(
            "secondary bands",
            &config
                .brackets()
                .secondary
                .iter()
                .map(|b| b.upper_bound)
                .collect::<Vec<_>>(),
        )?;

        if config.deductions().dependents_per_head < Decimal::ZERO {
            return Err(EngineError::InvalidSchedule {
                message: "dependents deduction per head is negative".to_string(),
            });
        }

        let overrides = &config.overrides().zero_dependents;
        for (i, band) in overrides.iter().enumerate() {
            if band.lower_bound >= band.upper_bound {
                return Err(EngineError::InvalidSchedule {
                    message: format!(
                        "override band {} has lower_bound {} >= upper_bound {}",
                        i, band.lower_bound, band.upper_bound
                    ),
                });
            }
            if band.tax < Decimal::ZERO {
                return Err(EngineError::InvalidSchedule {
                    message: format!("override band {} has a negative tax amount", i),
                });
            }
            if let Some(prev) = i.checked_sub(1).and_then(|p| overrides.get(p)) {
                if band.lower_bound < prev.upper_bound {
                    return Err(EngineError::InvalidSchedule {
                        message: format!("override bands {} and {} overlap", i - 1, i),
                    });
                }
            }
        }

        Ok(())
    }

    /// Checks that a table's upper bounds are strictly ascending with a
    /// single open-ended final row.
    fn validate_bounds(table: &str, bounds: &[Option<Decimal>]) -> EngineResult<()> {
        let Some((last, inner)) = bounds.split_last() else {
            return Err(EngineError::InvalidSchedule {
                message: format!("{} table is empty", table),
            });
        };

        if last.is_some() {
            return Err(EngineError::InvalidSchedule {
                message: format!("{}: final row must be open-ended", table),
            });
        }

        let mut previous: Option<Decimal> = None;
        for bound in inner {
            let Some(bound) = bound else {
                return Err(EngineError::InvalidSchedule {
                    message: format!("{}: only the final row may be open-ended", table),
                });
            };
            if previous.is_some_and(|p| p >= *bound) {
                return Err(EngineError::InvalidSchedule {
                    message: format!("{}: upper bounds are not strictly ascending", table),
                });
            }
            previous = Some(*bound);
        }

        Ok(())
    }

    /// Returns the underlying schedule configuration.
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        self.config.metadata()
    }

    /// Consumes the loader, returning the owned schedule configuration.
    pub fn into_config(self) -> ScheduleConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/jp2024"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.metadata().code, "JP-GENSEN-GEPPYO");
    }

    #[test]
    fn test_metadata_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.metadata().code, "JP-GENSEN-GEPPYO");
        assert_eq!(
            loader.metadata().name,
            "Monthly Withholding Tax Schedule (Japan)"
        );
        assert_eq!(loader.metadata().version, "2024-01-01");
        assert!(loader.metadata().source_url.contains("nta.go.jp"));
    }

    #[test]
    fn test_employment_tiers_loaded_in_order() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let tiers = &loader.config().deductions().employment;

        assert_eq!(tiers.len(), 5);
        assert_eq!(tiers[0].upper_bound, Some(dec("135417")));
        assert!(tiers[0].rate.is_none());
        assert_eq!(tiers[0].offset, dec("45834"));
        assert_eq!(tiers[1].rate, Some(dec("0.40")));
        assert!(tiers[4].upper_bound.is_none());
        assert_eq!(tiers[4].offset, dec("162500"));
    }

    #[test]
    fn test_basic_tiers_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let tiers = &loader.config().deductions().basic;

        assert_eq!(tiers.len(), 4);
        assert_eq!(tiers[0].amount, dec("40000"));
        assert_eq!(tiers[3].amount, dec("0"));
        assert!(tiers[3].upper_bound.is_none());
    }

    #[test]
    fn test_primary_brackets_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let brackets = &loader.config().brackets().primary;

        assert_eq!(brackets.len(), 6);
        assert_eq!(brackets[0].upper_bound, Some(dec("162500")));
        assert_eq!(brackets[0].rate, dec("0.05105"));
        assert_eq!(brackets[0].subtraction, dec("0"));
        assert!(brackets[5].upper_bound.is_none());
        assert_eq!(brackets[5].rate, dec("0.4084"));
    }

    #[test]
    fn test_secondary_bands_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let bands = &loader.config().brackets().secondary;

        assert_eq!(bands.len(), 4);
        assert_eq!(bands[0].upper_bound, Some(dec("88000")));
        assert_eq!(bands[0].rate, dec("0.03063"));
        assert_eq!(bands[0].subtraction, dec("0"));
        assert!(bands[3].upper_bound.is_none());
    }

    #[test]
    fn test_override_bands_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let bands = &loader.config().overrides().zero_dependents;

        assert_eq!(bands.len(), 4);
        assert_eq!(bands[0].lower_bound, dec("96000"));
        assert_eq!(bands[0].upper_bound, dec("97000"));
        assert_eq!(bands[0].tax, dec("0"));
        assert_eq!(bands[3].tax, dec("3270"));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        assert!(result.is_err());

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("schedule.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_validate_rejects_empty_table() {
        let result = ConfigLoader::validate_bounds("test table", &[]);
        assert!(matches!(
            result,
            Err(EngineError::InvalidSchedule { message }) if message.contains("empty")
        ));
    }

    #[test]
    fn test_validate_rejects_bounded_final_row() {
        let result =
            ConfigLoader::validate_bounds("test table", &[Some(dec("100")), Some(dec("200"))]);
        assert!(matches!(
            result,
            Err(EngineError::InvalidSchedule { message }) if message.contains("open-ended")
        ));
    }

    #[test]
    fn test_validate_rejects_descending_bounds() {
        let result = ConfigLoader::validate_bounds(
            "test table",
            &[Some(dec("200")), Some(dec("100")), None],
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidSchedule { message }) if message.contains("ascending")
        ));
    }

    #[test]
    fn test_validate_accepts_ascending_bounds() {
        let result = ConfigLoader::validate_bounds(
            "test table",
            &[Some(dec("100")), Some(dec("200")), None],
        );
        assert!(result.is_ok());
    }
}

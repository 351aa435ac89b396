//! Cleaning configuration file support.
//!
//! This module reads the tunable constants of the cleaning operations
//! (rounding precision, report precision, categorical codes, index column
//! name) from TOML. Every section is optional and defaults to the values
//! the free functions in [`crate::transformations`] use.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CleaningError, CleaningResult};

/// Largest number of decimals accepted for rounding settings.
pub const MAX_DECIMALS: u32 = 15;

static DEFAULT_CONFIG: Lazy<CleaningConfig> = Lazy::new(CleaningConfig::default);

/// Rejects a decimal count above [`MAX_DECIMALS`].
pub(crate) fn check_decimals(field: &str, decimals: u32) -> CleaningResult<()> {
    if decimals > MAX_DECIMALS {
        return Err(CleaningError::Configuration(format!(
            "{} must be at most {}, got {}",
            field, MAX_DECIMALS, decimals
        )));
    }
    Ok(())
}

/// Cleaning configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningConfig {
    #[serde(default)]
    pub rounding: RoundingSettings,
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub categorical: CategoricalSettings,
    #[serde(default)]
    pub index: IndexSettings,
}

/// Settings for `round_columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundingSettings {
    #[serde(default = "default_decimals")]
    pub decimals: u32,
}

/// Settings for `missing_value_report`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_precision")]
    pub precision: u32,
    #[serde(default)]
    pub empty_table: EmptyTablePolicy,
}

/// What the missing-value report does with a table that has no rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyTablePolicy {
    /// Report `0.0` for every column.
    #[default]
    Zero,
    /// Fail with [`CleaningError::EmptyTable`].
    Error,
}

/// Settings for the single-letter categorical cleanup (`clean_gender_column`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSettings {
    #[serde(default = "default_categorical_column")]
    pub column: String,
    #[serde(default = "default_keep")]
    pub keep: Vec<String>,
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

/// Settings for `drop_index_column`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSettings {
    #[serde(default = "default_index_column")]
    pub column: String,
}

fn default_decimals() -> u32 {
    2
}

fn default_precision() -> u32 {
    4
}

fn default_categorical_column() -> String {
    "gender".to_string()
}

fn default_keep() -> Vec<String> {
    vec!["M".to_string(), "F".to_string()]
}

fn default_fallback() -> String {
    "U".to_string()
}

fn default_index_column() -> String {
    "Unnamed: 0".to_string()
}

impl Default for RoundingSettings {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            empty_table: EmptyTablePolicy::default(),
        }
    }
}

impl Default for CategoricalSettings {
    fn default() -> Self {
        Self {
            column: default_categorical_column(),
            keep: default_keep(),
            fallback: default_fallback(),
        }
    }
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            column: default_index_column(),
        }
    }
}

impl CleaningConfig {
    /// Shared default configuration.
    pub fn defaults() -> &'static CleaningConfig {
        &DEFAULT_CONFIG
    }

    /// Load cleaning configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(CleaningConfig)` if the file is read, parsed and valid
    /// * `Err(CleaningError::Configuration)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> CleaningResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            CleaningError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded cleaning config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> CleaningResult<Self> {
        let config: CleaningConfig = toml::from_str(content).map_err(|e| {
            CleaningError::Configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load cleaning configuration from the default location.
    ///
    /// Searches for `tabclean.toml` in:
    /// 1. Current directory
    /// 2. `tabclean/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> CleaningResult<Self> {
        let search_paths = [
            PathBuf::from("tabclean.toml"),
            PathBuf::from("tabclean/tabclean.toml"),
            PathBuf::from("../tabclean.toml"),
        ];

        for path in &search_paths {
            if path.exists() {
                return Self::from_file(path);
            }
        }

        Err(CleaningError::Configuration(
            "No tabclean.toml found in standard locations".to_string(),
        ))
    }

    /// Check the settings for values no operation can honor.
    pub fn validate(&self) -> CleaningResult<()> {
        check_decimals("rounding.decimals", self.rounding.decimals)?;
        check_decimals("report.precision", self.report.precision)?;
        if self.categorical.column.is_empty() {
            return Err(CleaningError::Configuration(
                "categorical.column must not be empty".to_string(),
            ));
        }
        for code in &self.categorical.keep {
            let mut chars = code.chars();
            let single_upper = matches!(
                (chars.next(), chars.next()),
                (Some(c), None) if c.is_uppercase()
            );
            if !single_upper {
                return Err(CleaningError::Configuration(format!(
                    "categorical.keep entries must be single uppercase letters, got '{}'",
                    code
                )));
            }
        }
        if self.categorical.fallback.is_empty() {
            return Err(CleaningError::Configuration(
                "categorical.fallback must not be empty".to_string(),
            ));
        }
        if self.index.column.is_empty() {
            return Err(CleaningError::Configuration(
                "index.column must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_fixed_constants() {
        let config = CleaningConfig::defaults();
        assert_eq!(config.rounding.decimals, 2);
        assert_eq!(config.report.precision, 4);
        assert_eq!(config.report.empty_table, EmptyTablePolicy::Zero);
        assert_eq!(config.categorical.column, "gender");
        assert_eq!(config.categorical.keep, vec!["M", "F"]);
        assert_eq!(config.categorical.fallback, "U");
        assert_eq!(config.index.column, "Unnamed: 0");
    }

    #[test]
    fn test_parse_empty_config() {
        let config = CleaningConfig::from_toml_str("").unwrap();
        assert_eq!(&config, CleaningConfig::defaults());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[rounding]
decimals = 3

[report]
empty_table = "error"

[categorical]
column = "sex"
"#;

        let config = CleaningConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.rounding.decimals, 3);
        assert_eq!(config.report.precision, 4);
        assert_eq!(config.report.empty_table, EmptyTablePolicy::Error);
        assert_eq!(config.categorical.column, "sex");
        assert_eq!(config.categorical.keep, vec!["M", "F"]);
    }

    #[test]
    fn test_rejects_bad_keep_codes() {
        let toml = r#"
[categorical]
keep = ["Male"]
"#;
        let result = CleaningConfig::from_toml_str(toml);
        assert!(matches!(result, Err(CleaningError::Configuration(_))));
    }

    #[test]
    fn test_rejects_excessive_precision() {
        let toml = r#"
[report]
precision = 40
"#;
        assert!(CleaningConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_check_decimals_bounds() {
        assert!(check_decimals("decimals", MAX_DECIMALS).is_ok());
        assert_eq!(
            check_decimals("decimals", u32::MAX).unwrap_err(),
            CleaningError::Configuration(format!(
                "decimals must be at most {}, got {}",
                MAX_DECIMALS,
                u32::MAX
            ))
        );
    }

    #[test]
    fn test_rejects_unknown_policy() {
        let toml = r#"
[report]
empty_table = "nan"
"#;
        assert!(CleaningConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[index]\ncolumn = \"index\"\n").unwrap();

        let config = CleaningConfig::from_file(file.path()).unwrap();
        assert_eq!(config.index.column, "index");
    }

    #[test]
    fn test_from_missing_file() {
        let result = CleaningConfig::from_file("/nonexistent/tabclean.toml");
        assert!(matches!(result, Err(CleaningError::Configuration(_))));
    }
}

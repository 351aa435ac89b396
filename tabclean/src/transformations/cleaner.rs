//! Config-driven access to the cleaning operations.

use std::borrow::Cow;
use std::collections::HashMap;

use super::{casting, cleaning, columns, missing};
use crate::config::CleaningConfig;
use crate::core::Table;
use crate::error::CleaningResult;

/// Runs individual cleaning operations with parameters taken from a
/// [`CleaningConfig`].
///
/// Every method maps to one free function in [`crate::transformations`];
/// nothing is chained or remembered between calls. With the default
/// configuration the results are identical to the free functions.
///
/// # Examples
///
/// ```
/// use polars::prelude::*;
/// use tabclean::{CleaningConfig, Table, TableCleaner, Value};
///
/// let config = CleaningConfig::from_toml_str("[rounding]\ndecimals = 1\n").unwrap();
/// let cleaner = TableCleaner::with_config(config).unwrap();
///
/// let table = Table::from_frame(df!("x" => [0.25, 0.35]).unwrap()).unwrap();
/// let rounded = cleaner.round_columns(&table, &["x"]).unwrap();
/// assert_eq!(rounded.get(0, "x"), Some(Value::Float(0.2)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableCleaner {
    config: CleaningConfig,
}

impl TableCleaner {
    /// Create a cleaner with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cleaner with a custom configuration
    ///
    /// The configuration is validated first, so a hand-built config gets the
    /// same checks as one read from TOML.
    pub fn with_config(config: CleaningConfig) -> CleaningResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    pub fn lowercase_columns<'t>(&self, table: &'t mut Table) -> CleaningResult<&'t mut Table> {
        columns::lowercase_columns(table)
    }

    pub fn rename_columns<'t>(
        &self,
        table: &'t Table,
        mapping: Option<&HashMap<String, String>>,
    ) -> CleaningResult<Cow<'t, Table>> {
        columns::rename_columns(table, mapping)
    }

    pub fn drop_index_column(&self, table: &Table) -> CleaningResult<Table> {
        columns::drop_named_column(table, &self.config.index.column)
    }

    pub fn cast_to_integer<S: AsRef<str>>(
        &self,
        table: &Table,
        column_names: &[S],
    ) -> CleaningResult<Table> {
        casting::cast_to_integer(table, column_names)
    }

    pub fn coerce_numeric<S: AsRef<str>>(
        &self,
        table: &Table,
        column_names: &[S],
    ) -> CleaningResult<Table> {
        casting::coerce_numeric(table, column_names)
    }

    pub fn round_columns<S: AsRef<str>>(
        &self,
        table: &Table,
        column_names: &[S],
    ) -> CleaningResult<Table> {
        casting::round_columns_to(table, column_names, self.config.rounding.decimals)
    }

    pub fn missing_value_report(&self, table: &Table) -> CleaningResult<Table> {
        missing::missing_value_report_with(table, &self.config.report)
    }

    pub fn drop_fully_empty_rows(&self, table: &Table) -> CleaningResult<Table> {
        cleaning::drop_fully_empty_rows(table)
    }

    /// Cleans the configured categorical column (`gender` by default).
    pub fn clean_gender_column(&self, table: &Table) -> CleaningResult<Table> {
        cleaning::clean_categorical_column(table, &self.config.categorical)
    }

    pub fn fill_missing_with_median<S: AsRef<str>>(
        &self,
        table: &Table,
        column_names: &[S],
    ) -> CleaningResult<Table> {
        cleaning::fill_missing_with_median(table, column_names)
    }
}

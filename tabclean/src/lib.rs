//! Stateless cleaning utilities for small rectangular tables.
//!
//! The crate offers a [`Table`] (a polars `DataFrame` with row labels, read
//! back cell by cell as [`Value`]s) and a set of independent operations on it: column-name
//! normalization, type casts, rounding, median imputation, empty-row and
//! index-column removal, renaming, categorical cleanup and a missing-value
//! report. See [`transformations`] for the operations and [`config`] for the
//! optional TOML settings.

pub mod config;
pub mod core;
pub mod error;
pub mod transformations;

pub use config::{CleaningConfig, EmptyTablePolicy};
pub use crate::core::{ColumnType, Table, Value};
pub use error::{CleaningError, CleaningResult};
pub use transformations::TableCleaner;

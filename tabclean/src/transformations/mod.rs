//! Table cleaning and transformation operations.
//!
//! Each function applies one narrow transformation to a [`Table`] and is
//! independent of the others. Only [`lowercase_columns`] mutates its input;
//! every other operation leaves the caller's table untouched and returns a
//! new one (or, for [`rename_columns`] without a mapping, borrows the input
//! back).
//!
//! # Modules
//!
//! - [`columns`]: Lowercase, rename and drop columns
//! - [`casting`]: Integer casts, numeric coercion, rounding
//! - [`cleaning`]: Drop empty rows, clean categorical codes, impute medians
//! - [`missing`]: Missing-value report
//! - [`cleaner`]: [`TableCleaner`], the same operations driven by a config
//!
//! # Example
//!
//! ```
//! use polars::prelude::*;
//! use tabclean::Table;
//! use tabclean::transformations::{clean_gender_column, lowercase_columns};
//!
//! let mut table = Table::from_frame(df!("Gender" => ["female", "other"]).unwrap()).unwrap();
//! lowercase_columns(&mut table).unwrap();
//! let cleaned = clean_gender_column(&table).unwrap();
//! assert_eq!(cleaned.get(1, "gender").as_ref().and_then(|v| v.as_str()), Some("U"));
//! ```
//!
//! [`Table`]: crate::core::Table

pub mod casting;
pub mod cleaner;
pub mod cleaning;
pub mod columns;
pub mod missing;


pub use casting::{cast_to_integer, coerce_numeric, round_columns, round_columns_to};
pub use cleaner::TableCleaner;
pub use cleaning::{
    clean_categorical_column, clean_gender_column, drop_fully_empty_rows,
    fill_missing_with_median,
};
pub use columns::{drop_index_column, drop_named_column, lowercase_columns, rename_columns};
pub use missing::{missing_value_report, missing_value_report_with};

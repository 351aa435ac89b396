//! Core data model for tabular cleaning.
//!
//! This module defines the table abstraction every operation works on, a
//! polars frame with row labels, plus the cell view and the ties-to-even
//! rounding shared by the transformations.

pub mod numeric;
pub mod table;
pub mod value;

pub use table::Table;
pub use value::{ColumnType, Value};

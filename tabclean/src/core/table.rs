//! Table representation shared by every cleaning operation.
//!
//! A [`Table`] is a polars [`DataFrame`] plus a row index. The index carries
//! one label per row; fresh tables are labelled `0..n` and the labels follow
//! their rows through copies and row filters, so a filtered table may have
//! gaps. Missing values are polars nulls; `NaN` floats are turned into nulls
//! when a frame enters a table.

use polars::prelude::*;
use serde_json::{Map, Number, Value as JsonValue};
use std::collections::HashSet;
use std::fmt;

use super::value::{ColumnType, Value};
use crate::error::{CleaningError, CleaningResult};

/// Scratch column used to carry row positions through a polars filter.
const ROW_POSITION: &str = "__tabclean_row_position";

/// An ordered collection of equal-length named columns with row labels.
///
/// # Examples
///
/// ```
/// use polars::prelude::*;
/// use tabclean::{Table, Value};
///
/// let frame = df!(
///     "Name" => ["Alice", "Bob"],
///     "Age" => [Some(29.6), None],
/// )
/// .unwrap();
/// let table = Table::from_frame(frame).unwrap();
///
/// assert_eq!(table.height(), 2);
/// assert_eq!(table.column_names(), vec!["Name", "Age"]);
/// assert_eq!(table.index(), &[0, 1]);
/// assert_eq!(table.get(1, "Age"), Some(Value::Missing));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    index: Vec<usize>,
    frame: DataFrame,
}

impl Default for Table {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<DataFrame> for Table {
    type Error = CleaningError;

    fn try_from(frame: DataFrame) -> Result<Self, Self::Error> {
        Table::from_frame(frame)
    }
}

impl From<Table> for DataFrame {
    fn from(table: Table) -> Self {
        table.frame
    }
}

impl Table {
    /// Wraps a frame with a fresh `0..n` index.
    pub fn from_frame(frame: DataFrame) -> CleaningResult<Self> {
        let index = (0..frame.height()).collect();
        Self::with_index(index, frame)
    }

    /// Builds a table from polars columns, checking lengths and names.
    pub fn new(columns: Vec<Column>) -> CleaningResult<Self> {
        let height = columns.first().map_or(0, Column::len);
        check_columns(&columns, height)?;
        Self::from_frame(DataFrame::new(columns)?)
    }

    /// Wraps a frame with explicit row labels.
    ///
    /// A frame without columns may carry any number of labels.
    pub fn with_index(index: Vec<usize>, frame: DataFrame) -> CleaningResult<Self> {
        if frame.width() > 0 {
            check_columns(frame.get_columns(), index.len())?;
        }
        let mut table = Self { index, frame };
        table.normalize_nan()?;
        Ok(table)
    }

    /// A table with no columns and no rows.
    pub fn empty() -> Self {
        Self {
            index: Vec::new(),
            frame: DataFrame::empty(),
        }
    }

    /// Builds a table from row-major data.
    ///
    /// Every column must hold one kind of value (numbers or text, missing
    /// allowed). Integers and floats in one column give a float column.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabclean::{Table, Value};
    ///
    /// let table = Table::from_rows(
    ///     ["a", "b"],
    ///     vec![
    ///         vec![Value::from(1), Value::from("y")],
    ///         vec![Value::Missing, Value::from("x")],
    ///     ],
    /// )
    /// .unwrap();
    /// assert_eq!(table.height(), 2);
    /// assert_eq!(table.get(1, "b"), Some(Value::from("x")));
    /// ```
    pub fn from_rows<N, S>(names: N, rows: Vec<Vec<Value>>) -> CleaningResult<Self>
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let row_count = rows.len();
        let mut cells: Vec<Vec<Value>> = vec![Vec::with_capacity(row_count); names.len()];

        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != names.len() {
                return Err(CleaningError::LengthMismatch {
                    column: format!("<row {}>", row_idx),
                    expected: names.len(),
                    found: row.len(),
                });
            }
            for (column, value) in cells.iter_mut().zip(row) {
                column.push(value);
            }
        }

        let columns = names
            .iter()
            .zip(&cells)
            .map(|(name, values)| column_from_values(name, values))
            .collect::<CleaningResult<Vec<_>>>()?;
        check_columns(&columns, row_count)?;
        Self::with_index((0..row_count).collect(), DataFrame::new(columns)?)
    }

    /// Builds a table from JSON object records.
    ///
    /// Column order follows the first appearance of each key. Absent keys
    /// and `null` become missing, booleans become `0`/`1`, and nested
    /// arrays or objects are rejected.
    pub fn from_records(records: &[JsonValue]) -> CleaningResult<Self> {
        let mut names: Vec<String> = Vec::new();
        for (row, record) in records.iter().enumerate() {
            let object = record
                .as_object()
                .ok_or_else(|| CleaningError::TypeConversion {
                    column: "<record>".to_string(),
                    row,
                    value: record.to_string(),
                    target: "record object",
                })?;
            for key in object.keys() {
                if !names.iter().any(|n| n == key) {
                    names.push(key.clone());
                }
            }
        }

        let mut rows = Vec::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            let mut cells = Vec::with_capacity(names.len());
            for name in &names {
                let value = match record.get(name) {
                    None | Some(JsonValue::Null) => Value::Missing,
                    Some(JsonValue::Bool(b)) => Value::Int(i64::from(*b)),
                    Some(JsonValue::Number(n)) => match n.as_i64() {
                        Some(i) => Value::Int(i),
                        None => n.as_f64().map_or(Value::Missing, Value::from),
                    },
                    Some(JsonValue::String(s)) => Value::Text(s.clone()),
                    Some(other) => {
                        return Err(CleaningError::TypeConversion {
                            column: name.clone(),
                            row,
                            value: other.to_string(),
                            target: "cell value",
                        })
                    }
                };
                cells.push(value);
            }
            rows.push(cells);
        }

        Self::from_rows(names, rows)
    }

    /// Converts the table into JSON object records, one per row.
    ///
    /// Missing cells are written as `null`.
    pub fn to_records(&self) -> Vec<JsonValue> {
        (0..self.height())
            .map(|row| {
                let mut object = Map::with_capacity(self.width());
                for column in self.frame.get_columns() {
                    let value = column
                        .as_materialized_series()
                        .get(row)
                        .map_or(Value::Missing, Value::from);
                    let cell = match value {
                        Value::Int(v) => JsonValue::from(v),
                        Value::Float(v) => {
                            Number::from_f64(v).map_or(JsonValue::Null, JsonValue::Number)
                        }
                        Value::Text(s) => JsonValue::String(s),
                        Value::Missing => JsonValue::Null,
                    };
                    object.insert(column.name().to_string(), cell);
                }
                JsonValue::Object(object)
            })
            .collect()
    }

    /// The underlying polars frame.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.index.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.frame.width()
    }

    /// Row labels, one per row.
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.frame
            .get_columns()
            .iter()
            .map(|c| c.name().as_str())
            .collect()
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Looks up a column by exact name.
    pub fn column(&self, name: &str) -> CleaningResult<&Column> {
        self.position(name)
            .map(|pos| &self.frame.get_columns()[pos])
            .ok_or_else(|| CleaningError::MissingColumn(name.to_string()))
    }

    /// Type of the named column.
    pub fn dtype(&self, name: &str) -> CleaningResult<ColumnType> {
        Ok(ColumnType::of(self.column(name)?.dtype()))
    }

    /// Number of missing cells in the named column.
    pub fn null_count(&self, name: &str) -> CleaningResult<usize> {
        Ok(self.column(name)?.null_count())
    }

    /// Cells of the named column, in row order.
    pub fn values(&self, name: &str) -> CleaningResult<Vec<Value>> {
        let series = self.column(name)?.as_materialized_series();
        (0..series.len())
            .map(|row| Ok(Value::from(series.get(row)?)))
            .collect()
    }

    /// Cells of one row by position, in column order.
    pub fn row(&self, row: usize) -> Option<Vec<Value>> {
        if row >= self.height() {
            return None;
        }
        self.frame
            .get_columns()
            .iter()
            .map(|c| c.as_materialized_series().get(row).ok().map(Value::from))
            .collect()
    }

    /// A single cell by row position and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<Value> {
        let series = self.column(column).ok()?.as_materialized_series();
        series.get(row).ok().map(Value::from)
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.frame
            .get_columns()
            .iter()
            .position(|c| c.name().as_str() == name)
    }

    /// Resolves every name up front so no work starts on a partial match.
    pub(crate) fn require_columns<S: AsRef<str>>(&self, names: &[S]) -> CleaningResult<Vec<usize>> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.position(name)
                    .ok_or_else(|| CleaningError::MissingColumn(name.to_string()))
            })
            .collect()
    }

    /// Series of the column at `pos`.
    pub(crate) fn series_at(&self, pos: usize) -> &Series {
        self.frame.get_columns()[pos].as_materialized_series()
    }

    /// Replaces a column of the same name, keeping its position.
    pub(crate) fn replace_column(&mut self, series: Series) -> CleaningResult<()> {
        debug_assert_eq!(series.len(), self.height());
        self.frame.with_column(series)?;
        Ok(())
    }

    /// Renames every column at once. Names must stay unique.
    pub(crate) fn set_column_names(&mut self, names: Vec<String>) -> CleaningResult<()> {
        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(CleaningError::DuplicateColumn(name.clone()));
            }
        }
        self.frame.set_column_names(names)?;
        Ok(())
    }

    pub(crate) fn drop_column(&mut self, name: &str) -> CleaningResult<()> {
        self.frame = self.frame.drop(name)?;
        Ok(())
    }

    /// Keeps the rows selected by `mask`, together with their labels.
    pub(crate) fn retain_rows(&mut self, mask: &BooleanChunked) -> CleaningResult<()> {
        if self.frame.width() == 0 {
            let keep: Vec<bool> = mask.into_iter().map(|v| v.unwrap_or(false)).collect();
            let mut flags = keep.iter();
            self.index.retain(|_| *flags.next().unwrap_or(&false));
            return Ok(());
        }

        let mut filtered = self
            .frame
            .with_row_index(ROW_POSITION.into(), None)?
            .filter(mask)?;
        let positions = filtered.drop_in_place(ROW_POSITION)?;
        self.index = positions
            .as_materialized_series()
            .idx()?
            .into_no_null_iter()
            .map(|pos| self.index[pos as usize])
            .collect();
        self.frame = filtered;
        Ok(())
    }

    /// Turns `NaN` floats into nulls so missing means null everywhere.
    fn normalize_nan(&mut self) -> CleaningResult<()> {
        let floats: Vec<usize> = self
            .frame
            .get_columns()
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c.dtype(), DataType::Float32 | DataType::Float64))
            .map(|(pos, _)| pos)
            .collect();

        for pos in floats {
            let series = self.series_at(pos).cast(&DataType::Float64)?;
            let ca = series.f64()?;
            if ca.into_iter().flatten().any(f64::is_nan) {
                let cleaned: Float64Chunked = ca
                    .into_iter()
                    .map(|v| v.filter(|x| !x.is_nan()))
                    .collect();
                self.replace_column(cleaned.with_name(series.name().clone()).into_series())?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.frame)
    }
}

fn check_columns(columns: &[Column], height: usize) -> CleaningResult<()> {
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if column.len() != height {
            return Err(CleaningError::LengthMismatch {
                column: column.name().to_string(),
                expected: height,
                found: column.len(),
            });
        }
        if !seen.insert(column.name().as_str()) {
            return Err(CleaningError::DuplicateColumn(column.name().to_string()));
        }
    }
    Ok(())
}

/// Builds a typed polars column from cell values.
pub(crate) fn column_from_values(name: &str, values: &[Value]) -> CleaningResult<Column> {
    let series = match ColumnType::infer(values) {
        Some(ColumnType::Integer) => {
            let ints: Vec<Option<i64>> = values.iter().map(Value::as_i64).collect();
            Series::new(name.into(), ints)
        }
        Some(ColumnType::Float) => {
            let floats: Vec<Option<f64>> = values.iter().map(Value::as_f64).collect();
            Series::new(name.into(), floats)
        }
        Some(ColumnType::Text) => {
            let texts: Vec<Option<&str>> = values.iter().map(Value::as_str).collect();
            Series::new(name.into(), texts)
        }
        Some(_) => Series::full_null(name.into(), values.len(), &DataType::Null),
        None => {
            let row = values.iter().position(Value::is_numeric).unwrap_or(0);
            return Err(CleaningError::TypeConversion {
                column: name.to_string(),
                row,
                value: values[row].to_string(),
                target: "text column",
            });
        }
    };
    Ok(series.into_column())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Table {
        let frame = df!(
            "Name" => ["Alice", "Bob"],
            "Age" => [Some(29.6), None],
        )
        .unwrap();
        Table::from_frame(frame).unwrap()
    }

    #[test]
    fn test_new_rejects_ragged_columns() {
        let result = Table::new(vec![
            Series::new("a".into(), [1, 2]).into_column(),
            Series::new("b".into(), [1]).into_column(),
        ]);
        assert_eq!(
            result.unwrap_err(),
            CleaningError::LengthMismatch {
                column: "b".to_string(),
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn test_new_rejects_duplicate_names() {
        let result = Table::new(vec![
            Series::new("a".into(), [1]).into_column(),
            Series::new("a".into(), [2]).into_column(),
        ]);
        assert_eq!(
            result.unwrap_err(),
            CleaningError::DuplicateColumn("a".to_string())
        );
    }

    #[test]
    fn test_column_lookup_is_case_sensitive() {
        let table = sample();
        assert!(table.column("Age").is_ok());
        assert_eq!(
            table.column("age").unwrap_err(),
            CleaningError::MissingColumn("age".to_string())
        );
    }

    #[test]
    fn test_nan_becomes_null() {
        let frame = df!("x" => [1.0, f64::NAN]).unwrap();
        let table = Table::from_frame(frame).unwrap();
        assert_eq!(table.null_count("x").unwrap(), 1);
        assert_eq!(table.values("x").unwrap(), vec![Value::Float(1.0), Value::Missing]);
    }

    #[test]
    fn test_row_access() {
        let table = sample();
        let row = table.row(1).unwrap();
        assert_eq!(row, vec![Value::from("Bob"), Value::Missing]);
        assert!(table.row(2).is_none());
    }

    #[test]
    fn test_retain_rows_keeps_labels() {
        let mut table = sample();
        let mask = BooleanChunked::from_slice("keep".into(), &[false, true]);
        table.retain_rows(&mask).unwrap();
        assert_eq!(table.index(), &[1]);
        assert_eq!(table.get(0, "Name"), Some(Value::from("Bob")));
        assert!(!table.contains_column(ROW_POSITION));
    }

    #[test]
    fn test_from_rows_without_columns_keeps_row_count() {
        let table = Table::from_rows(Vec::<String>::new(), vec![vec![], vec![], vec![]]).unwrap();
        assert_eq!(table.width(), 0);
        assert_eq!(table.height(), 3);
        assert_eq!(table.index(), &[0, 1, 2]);
    }

    #[test]
    fn test_from_rows_rejects_mixed_column() {
        let result = Table::from_rows(
            ["a"],
            vec![vec![Value::from("x")], vec![Value::Int(1)]],
        );
        assert!(matches!(
            result,
            Err(CleaningError::TypeConversion { row: 1, .. })
        ));
    }

    #[test]
    fn test_records_roundtrip_shape() {
        let records = vec![
            json!({"name": "Alice", "age": 29.6, "member": true}),
            json!({"name": "Bob", "age": null}),
        ];
        let table = Table::from_records(&records).unwrap();
        assert_eq!(table.column_names(), vec!["name", "age", "member"]);
        assert_eq!(table.dtype("age").unwrap(), ColumnType::Float);
        assert_eq!(table.get(0, "member"), Some(Value::Int(1)));
        assert_eq!(table.get(1, "member"), Some(Value::Missing));

        let back = table.to_records();
        assert_eq!(back[1]["age"], JsonValue::Null);
        assert_eq!(back[0]["name"], json!("Alice"));
    }

    #[test]
    fn test_from_records_without_keys_keeps_row_count() {
        let records = vec![json!({}), json!({})];
        assert_eq!(Table::from_records(&records).unwrap().height(), 2);
    }

    #[test]
    fn test_from_records_rejects_nested() {
        let records = vec![json!({"tags": ["a", "b"]})];
        assert!(matches!(
            Table::from_records(&records),
            Err(CleaningError::TypeConversion { .. })
        ));
    }

    #[test]
    fn test_display_shows_columns() {
        let rendered = sample().to_string();
        assert!(rendered.contains("Name"));
        assert!(rendered.contains("Alice"));
    }
}

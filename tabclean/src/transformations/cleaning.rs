use log::{debug, warn};
use polars::prelude::*;

use super::casting::conversion_error;
use crate::config::{CategoricalSettings, CleaningConfig};
use crate::core::{ColumnType, Table, Value};
use crate::error::{CleaningError, CleaningResult};

/// Remove rows in which every column is missing.
///
/// Rows with at least one value survive in their original order and keep
/// their original index labels, so the result's index may have gaps. A
/// table without columns has no values at all and loses every row.
pub fn drop_fully_empty_rows(table: &Table) -> CleaningResult<Table> {
    let mut mask = BooleanChunked::full("keep".into(), false, table.height());
    for column in table.frame().get_columns() {
        mask = &mask | &column.is_not_null();
    }

    let mut out = table.clone();
    out.retain_rows(&mask)?;
    debug!(
        "Dropped {} fully empty row(s) of {}",
        table.height() - out.height(),
        table.height()
    );
    Ok(out)
}

/// Normalize the `gender` column to `M`, `F` or `U`.
///
/// Each value is reduced to its first character, uppercased; anything other
/// than `M` or `F` becomes `U`. Without a `gender` column the copy comes back
/// unchanged.
///
/// # Errors
///
/// * [`CleaningError::EmptyValue`] for an empty string
/// * [`CleaningError::TypeConversion`] for missing or numeric cells
///
/// # Examples
///
/// ```
/// use polars::prelude::*;
/// use tabclean::{Table, Value};
/// use tabclean::transformations::clean_gender_column;
///
/// let frame = df!("gender" => ["Male", "female", "X", "m"]).unwrap();
/// let cleaned = clean_gender_column(&Table::from_frame(frame).unwrap()).unwrap();
/// let codes: Vec<Value> = ["M", "F", "U", "M"].into_iter().map(Value::from).collect();
/// assert_eq!(cleaned.values("gender").unwrap(), codes);
/// ```
pub fn clean_gender_column(table: &Table) -> CleaningResult<Table> {
    clean_categorical_column(table, &CleaningConfig::defaults().categorical)
}

/// Reduce a text column to single-letter codes.
///
/// The column, the codes kept and the fallback come from `settings`.
pub fn clean_categorical_column(
    table: &Table,
    settings: &CategoricalSettings,
) -> CleaningResult<Table> {
    let Some(pos) = table.position(&settings.column) else {
        debug!("No '{}' column, nothing to clean", settings.column);
        return Ok(table.clone());
    };

    let name = settings.column.as_str();
    let series = table.series_at(pos);
    if !series.dtype().is_string() {
        return match series.len() {
            0 => Ok(table.clone()),
            _ => {
                let value = Value::from(series.get(0)?);
                Err(conversion_error(name, table.index()[0], &value, "text"))
            }
        };
    }

    let codes = series
        .str()?
        .into_iter()
        .zip(table.index())
        .map(|(text, &row)| {
            let Some(text) = text else {
                return Err(conversion_error(name, row, &Value::Missing, "text"));
            };
            let first = text.chars().next().ok_or_else(|| CleaningError::EmptyValue {
                column: name.to_string(),
                row,
            })?;
            let code: String = first.to_uppercase().collect();
            if settings.keep.contains(&code) {
                Ok(code)
            } else {
                Ok(settings.fallback.clone())
            }
        })
        .collect::<CleaningResult<Vec<_>>>()?;

    let mut out = table.clone();
    out.replace_column(Series::new(name.into(), codes))?;
    Ok(out)
}

/// Replace missing values in the named columns with the column median.
///
/// The median is taken over the non-missing values and the filled column
/// is `Float64`. A column with no values at all has no median and is left
/// as it was.
///
/// # Errors
///
/// * [`CleaningError::MissingColumn`] if a name is unknown
/// * [`CleaningError::TypeConversion`] if a named column holds text
pub fn fill_missing_with_median<S: AsRef<str>>(
    table: &Table,
    column_names: &[S],
) -> CleaningResult<Table> {
    let positions = table.require_columns(column_names)?;
    let mut out = table.clone();

    for pos in positions {
        let series = table.series_at(pos);
        let name = series.name().as_str();

        let numeric = matches!(
            ColumnType::of(series.dtype()),
            ColumnType::Integer | ColumnType::Float | ColumnType::Null
        );
        if !numeric {
            let present = series.is_not_null().into_iter().position(|v| v == Some(true));
            if let Some(row) = present {
                let value = Value::from(series.get(row)?);
                return Err(conversion_error(name, table.index()[row], &value, "number"));
            }
        }

        let floats = series.cast(&DataType::Float64)?;
        let Some(median) = floats.median() else {
            warn!("Column '{}' has no values, median is undefined", name);
            continue;
        };

        let filled = floats.f64()?.fill_null_with_values(median)?;
        out.replace_column(filled.with_name(series.name().clone()).into_series())?;
        debug!(
            "Filled {} missing value(s) in '{}' with {}",
            series.null_count(),
            name,
            median
        );
    }

    Ok(out)
}

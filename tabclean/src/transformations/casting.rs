//! Type conversions and rounding on named columns.
//!
//! All three operations work on a copy and resolve every requested column
//! before touching any data, so a missing name fails the whole call.

use log::debug;
use polars::prelude::*;

use crate::config::{check_decimals, CleaningConfig};
use crate::core::numeric::round_half_even;
use crate::core::{ColumnType, Table, Value};
use crate::error::{CleaningError, CleaningResult};

/// Round the named columns to whole numbers (ties to even) and store them
/// as `Int64`.
///
/// `2.5` becomes `2` and `3.5` becomes `4`. Missing, text, non-finite and
/// out-of-range cells have no integer form and fail the call with
/// [`CleaningError::TypeConversion`]; impute them first if needed.
///
/// # Examples
///
/// ```
/// use polars::prelude::*;
/// use tabclean::{Table, Value};
/// use tabclean::transformations::cast_to_integer;
///
/// let table = Table::from_frame(df!("x" => [2.5, 3.5, 29.6]).unwrap()).unwrap();
/// let cast = cast_to_integer(&table, &["x"]).unwrap();
/// assert_eq!(
///     cast.values("x").unwrap(),
///     vec![Value::Int(2), Value::Int(4), Value::Int(30)]
/// );
/// ```
pub fn cast_to_integer<S: AsRef<str>>(table: &Table, column_names: &[S]) -> CleaningResult<Table> {
    let positions = table.require_columns(column_names)?;
    let mut out = table.clone();

    for pos in positions {
        let ints = integer_series(table.series_at(pos), table.index())?;
        out.replace_column(ints)?;
    }

    debug!("Cast {} column(s) to integer", column_names.len());
    Ok(out)
}

fn integer_series(series: &Series, index: &[usize]) -> CleaningResult<Series> {
    if let Some(pos) = first_null(series) {
        return Err(cell_error(series, index, pos, "integer"));
    }
    if series.dtype().is_string() && !series.is_empty() {
        return Err(cell_error(series, index, 0, "integer"));
    }

    let source = if series.dtype().is_float() {
        round_series(series, 0)?
    } else {
        series.clone()
    };

    match source.strict_cast(&DataType::Int64) {
        Ok(ints) => Ok(ints),
        Err(e) => {
            let lossy = source.cast(&DataType::Int64)?;
            match first_lost(&source, &lossy) {
                Some(pos) => Err(cell_error(series, index, pos, "integer")),
                None => Err(e.into()),
            }
        }
    }
}

/// Convert the named columns to numbers, turning anything unparsable into
/// a missing value.
///
/// Text columns are trimmed, then parsed as `Int64` when every present cell
/// is an integer and as `Float64` otherwise. Numeric columns are left as
/// they are. This never fails on cell contents.
pub fn coerce_numeric<S: AsRef<str>>(table: &Table, column_names: &[S]) -> CleaningResult<Table> {
    let positions = table.require_columns(column_names)?;
    let mut out = table.clone();

    for pos in positions {
        let series = table.series_at(pos);
        let coerced = match ColumnType::of(series.dtype()) {
            ColumnType::Integer | ColumnType::Float => continue,
            ColumnType::Text => coerce_text(series)?,
            ColumnType::Null | ColumnType::Other => series.cast(&DataType::Float64)?,
        };
        out.replace_column(coerced)?;
    }

    debug!("Coerced {} column(s) to numeric", column_names.len());
    Ok(out)
}

fn coerce_text(series: &Series) -> CleaningResult<Series> {
    let trimmed: StringChunked = series
        .str()?
        .into_iter()
        .map(|v| v.map(str::trim))
        .collect();
    let trimmed = trimmed.with_name(series.name().clone()).into_series();

    if let Ok(ints) = trimmed.strict_cast(&DataType::Int64) {
        return Ok(ints);
    }
    let floats = trimmed.cast(&DataType::Float64)?;
    // "nan" parses to NaN, which is missing here
    let floats: Float64Chunked = floats
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    Ok(floats.with_name(series.name().clone()).into_series())
}

/// Round the named columns to 2 decimal places, ties to even.
pub fn round_columns<S: AsRef<str>>(table: &Table, column_names: &[S]) -> CleaningResult<Table> {
    round_columns_to(table, column_names, CleaningConfig::defaults().rounding.decimals)
}

/// Round the named columns to `decimals` places, ties to even.
///
/// Integers pass through and missing cells stay missing. Text cells fail
/// with [`CleaningError::TypeConversion`]. More than
/// [`MAX_DECIMALS`](crate::config::MAX_DECIMALS) places is rejected with
/// [`CleaningError::Configuration`].
pub fn round_columns_to<S: AsRef<str>>(
    table: &Table,
    column_names: &[S],
    decimals: u32,
) -> CleaningResult<Table> {
    check_decimals("decimals", decimals)?;
    let positions = table.require_columns(column_names)?;
    let mut out = table.clone();

    for pos in positions {
        let series = table.series_at(pos);
        match ColumnType::of(series.dtype()) {
            ColumnType::Float => out.replace_column(round_series(series, decimals)?)?,
            ColumnType::Integer | ColumnType::Null => {}
            ColumnType::Text | ColumnType::Other => {
                if let Some(pos) = first_present(series) {
                    return Err(cell_error(series, table.index(), pos, "float"));
                }
            }
        }
    }

    debug!(
        "Rounded {} column(s) to {} decimals",
        column_names.len(),
        decimals
    );
    Ok(out)
}

/// Float copy of `series` rounded to `decimals` places, ties to even.
pub(crate) fn round_series(series: &Series, decimals: u32) -> CleaningResult<Series> {
    let floats = series.cast(&DataType::Float64)?;
    let rounded: Float64Chunked = floats
        .f64()?
        .into_iter()
        .map(|v| v.map(|x| round_half_even(x, decimals)))
        .collect();
    Ok(rounded.with_name(series.name().clone()).into_series())
}

fn first_null(series: &Series) -> Option<usize> {
    if series.null_count() == 0 {
        return None;
    }
    series.is_null().into_iter().position(|v| v == Some(true))
}

fn first_present(series: &Series) -> Option<usize> {
    series.is_not_null().into_iter().position(|v| v == Some(true))
}

/// First row that held a value in `source` but is null after a cast.
fn first_lost(source: &Series, cast: &Series) -> Option<usize> {
    let lost = &cast.is_null() & &source.is_not_null();
    let pos = lost.into_iter().position(|v| v == Some(true));
    pos
}

fn cell_error(series: &Series, index: &[usize], pos: usize, target: &'static str) -> CleaningError {
    let value = series.get(pos).map_or(Value::Missing, Value::from);
    let row = index.get(pos).copied().unwrap_or(pos);
    conversion_error(series.name().as_str(), row, &value, target)
}

pub(crate) fn conversion_error(
    column: &str,
    row: usize,
    value: &Value,
    target: &'static str,
) -> CleaningError {
    let value = match value {
        Value::Text(s) => format!("'{}'", s),
        other => other.to_string(),
    };
    CleaningError::TypeConversion {
        column: column.to_string(),
        row,
        value,
        target,
    }
}

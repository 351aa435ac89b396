use log::{debug, warn};
use polars::prelude::*;

use crate::config::{check_decimals, CleaningConfig, EmptyTablePolicy, ReportSettings};
use crate::core::numeric::round_half_even;
use crate::core::Table;
use crate::error::{CleaningError, CleaningResult};

/// Name of the report column holding the input column names.
pub const COLUMN_NAME: &str = "column_name";
/// Name of the report column holding the missing-value percentages.
pub const PERCENTAGE_OF_MISSING_VALUES: &str = "percentage_of_missing_values";

/// Summarize how much of each column is missing.
///
/// Produces one row per input column, in input order, with the share of
/// missing cells as a percentage rounded to 4 decimals. A table without
/// rows reports `0.0` everywhere.
///
/// # Examples
///
/// ```
/// use polars::prelude::*;
/// use tabclean::{Table, Value};
/// use tabclean::transformations::missing_value_report;
///
/// let frame = df!(
///     "a" => [Some(1), None, None, Some(4)],
///     "b" => [Some(1), Some(2), Some(3), None],
/// )
/// .unwrap();
///
/// let report = missing_value_report(&Table::from_frame(frame).unwrap()).unwrap();
/// assert_eq!(report.get(0, "percentage_of_missing_values"), Some(Value::Float(50.0)));
/// assert_eq!(report.get(1, "percentage_of_missing_values"), Some(Value::Float(25.0)));
/// ```
pub fn missing_value_report(table: &Table) -> CleaningResult<Table> {
    missing_value_report_with(table, &CleaningConfig::defaults().report)
}

/// Missing-value report with explicit precision and empty-table policy.
///
/// A precision above [`MAX_DECIMALS`](crate::config::MAX_DECIMALS) is
/// rejected with [`CleaningError::Configuration`].
pub fn missing_value_report_with(
    table: &Table,
    settings: &ReportSettings,
) -> CleaningResult<Table> {
    check_decimals("report.precision", settings.precision)?;

    let rows = table.height();
    if rows == 0 {
        match settings.empty_table {
            EmptyTablePolicy::Error => return Err(CleaningError::EmptyTable),
            EmptyTablePolicy::Zero => {
                warn!("Missing-value report on a table with no rows, reporting 0%")
            }
        }
    }

    let columns = table.frame().get_columns();
    let names: Vec<&str> = columns.iter().map(|c| c.name().as_str()).collect();
    let percentages: Vec<f64> = columns
        .iter()
        .map(|c| {
            let share = if rows == 0 {
                0.0
            } else {
                c.null_count() as f64 / rows as f64 * 100.0
            };
            round_half_even(share, settings.precision)
        })
        .collect();

    debug!("Missing-value report over {} column(s)", table.width());
    Table::new(vec![
        Series::new(COLUMN_NAME.into(), names).into_column(),
        Series::new(PERCENTAGE_OF_MISSING_VALUES.into(), percentages).into_column(),
    ])
}

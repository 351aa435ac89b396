use log::debug;
use std::borrow::Cow;
use std::collections::HashMap;

use crate::config::CleaningConfig;
use crate::core::Table;
use crate::error::CleaningResult;

/// Lowercase every column name in place.
///
/// Order is preserved and the same table is handed back, so the call can be
/// chained. Applying it twice is the same as applying it once. Names that
/// collide once lowercased (`Age` and `AGE`) fail with
/// [`DuplicateColumn`](crate::CleaningError::DuplicateColumn) and leave the
/// table as it was.
///
/// # Examples
///
/// ```
/// use polars::prelude::*;
/// use tabclean::Table;
/// use tabclean::transformations::lowercase_columns;
///
/// let mut table = Table::from_frame(df!("Name" => ["Alice"]).unwrap()).unwrap();
/// lowercase_columns(&mut table).unwrap();
/// assert_eq!(table.column_names(), vec!["name"]);
/// ```
pub fn lowercase_columns(table: &mut Table) -> CleaningResult<&mut Table> {
    let lowered: Vec<String> = table
        .column_names()
        .iter()
        .map(|name| name.to_lowercase())
        .collect();
    table.set_column_names(lowered)?;
    debug!("Lowercased {} column names", table.width());
    Ok(table)
}

/// Rename columns through an `old -> new` mapping.
///
/// A `None` or empty mapping borrows the input back untouched. Otherwise a
/// renamed copy is returned; columns not in the mapping keep their names
/// and keys naming no column are ignored. All renames apply at once, so a
/// mapping can swap two names.
pub fn rename_columns<'a>(
    table: &'a Table,
    mapping: Option<&HashMap<String, String>>,
) -> CleaningResult<Cow<'a, Table>> {
    let mapping = match mapping {
        Some(m) if !m.is_empty() => m,
        _ => return Ok(Cow::Borrowed(table)),
    };

    for old in mapping.keys() {
        if !table.contains_column(old) {
            debug!("Rename skipped: no column named '{}'", old);
        }
    }

    let names: Vec<String> = table
        .column_names()
        .into_iter()
        .map(|name| mapping.get(name).map_or(name, String::as_str).to_string())
        .collect();

    let mut renamed = table.clone();
    renamed.set_column_names(names)?;
    Ok(Cow::Owned(renamed))
}

/// Drop the `Unnamed: 0` column left behind by a table that was exported
/// with its row index and read back as plain data.
///
/// Returns a copy; tables without that column come back unchanged.
pub fn drop_index_column(table: &Table) -> CleaningResult<Table> {
    drop_named_column(table, &CleaningConfig::defaults().index.column)
}

/// Copy of `table` without the column named exactly `name`.
pub fn drop_named_column(table: &Table, name: &str) -> CleaningResult<Table> {
    let mut out = table.clone();
    if out.contains_column(name) {
        out.drop_column(name)?;
        debug!("Dropped column '{}'", name);
    }
    Ok(out)
}

use contracts::shared::table::CellValue;

use super::ViewResult;
use crate::shared::table::Table;

/// Numeric reading of every cell in a column; `None` where the value is
/// missing or does not parse.
pub fn numeric_column(table: &Table, column: &str) -> ViewResult<Vec<Option<f64>>> {
    Ok(table.column_values(column)?.map(CellValue::as_f64).collect())
}

/// Indices of rows that have a numeric value in every listed column
pub fn complete_rows(table: &Table, columns: &[&str]) -> ViewResult<Vec<usize>> {
    let values = columns
        .iter()
        .map(|c| numeric_column(table, c))
        .collect::<ViewResult<Vec<_>>>()?;

    Ok((0..table.len())
        .filter(|&row| values.iter().all(|col| col[row].is_some()))
        .collect())
}

/// Projection for a single chart or aggregate: `numeric` columns are coerced
/// and rows missing any of them are dropped; `carry` columns are copied as is.
pub fn numeric_frame(table: &Table, numeric: &[&str], carry: &[&str]) -> ViewResult<Table> {
    let keep = complete_rows(table, numeric)?;
    let numeric_idx = numeric
        .iter()
        .map(|c| table.require(c))
        .collect::<ViewResult<Vec<_>>>()?;
    let carry_idx = carry
        .iter()
        .map(|c| table.require(c))
        .collect::<ViewResult<Vec<_>>>()?;

    let columns = numeric
        .iter()
        .chain(carry.iter())
        .map(|c| c.to_string())
        .collect();

    let rows = keep
        .into_iter()
        .map(|row| {
            let source = &table.rows()[row];
            numeric_idx
                .iter()
                .map(|&i| coerce_cell(&source[i]))
                .chain(carry_idx.iter().map(|&i| source[i].clone()))
                .collect()
        })
        .collect();

    Ok(Table::new(columns, rows))
}

/// Integers keep their type, integral text becomes an integer, everything
/// else that parses becomes a float
fn coerce_cell(value: &CellValue) -> CellValue {
    match value {
        CellValue::Integer(i) => CellValue::Integer(*i),
        CellValue::Text(raw) => match CellValue::from_raw(raw) {
            CellValue::Text(_) => CellValue::Null,
            typed => typed,
        },
        other => other
            .as_f64()
            .map(CellValue::Number)
            .unwrap_or(CellValue::Null),
    }
}

use chrono::{NaiveDate, NaiveDateTime};
use contracts::shared::table::CellValue;
use std::collections::{BTreeMap, HashSet};

use super::coerce::numeric_column;
use super::{ViewError, ViewResult};
use crate::shared::table::Table;

/// Smallest and largest numeric value, `None` when the column has none
pub fn column_range(table: &Table, column: &str) -> ViewResult<Option<(f64, f64)>> {
    Ok(numeric_column(table, column)?
        .into_iter()
        .flatten()
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        }))
}

/// Mean over the numeric values of a column, `None` when it has none
pub fn column_mean(table: &Table, column: &str) -> ViewResult<Option<f64>> {
    let values: Vec<f64> = numeric_column(table, column)?.into_iter().flatten().collect();
    if values.is_empty() {
        return Ok(None);
    }
    Ok(Some(values.iter().sum::<f64>() / values.len() as f64))
}

/// Number of distinct non-missing values
pub fn distinct_count(table: &Table, column: &str) -> ViewResult<usize> {
    Ok(table
        .column_values(column)?
        .filter(|v| !v.is_null())
        .map(|v| v.to_string())
        .collect::<HashSet<_>>()
        .len())
}

/// Missing cell count per column, as rows of (column, count)
pub fn missing_counts(table: &Table) -> Table {
    let rows = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let missing = table.rows().iter().filter(|r| r[i].is_null()).count();
            vec![CellValue::Text(name.clone()), CellValue::from(missing)]
        })
        .collect();

    Table::new(vec!["column".to_string(), "missing".to_string()], rows)
}

/// Storage kind inferred from the non-missing cells of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
    Empty,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Integer => "integer",
            ColumnKind::Float => "float",
            ColumnKind::Text => "text",
            ColumnKind::Empty => "empty",
        }
    }
}

pub fn column_kind(table: &Table, index: usize) -> ColumnKind {
    let mut kind = ColumnKind::Empty;
    for row in table.rows() {
        kind = match (&row[index], kind) {
            (CellValue::Null, k) => k,
            (CellValue::Text(_), _) | (_, ColumnKind::Text) => return ColumnKind::Text,
            (CellValue::Integer(_), ColumnKind::Empty) => ColumnKind::Integer,
            (CellValue::Integer(_), k) => k,
            (CellValue::Number(_), _) => ColumnKind::Float,
        };
    }
    kind
}

/// Number of columns of each kind, as rows of (kind, count)
pub fn kind_counts(table: &Table) -> Table {
    let mut counts: BTreeMap<ColumnKind, usize> = BTreeMap::new();
    for index in 0..table.columns().len() {
        *counts.entry(column_kind(table, index)).or_insert(0) += 1;
    }

    let rows = counts
        .into_iter()
        .map(|(kind, count)| vec![CellValue::from(kind.as_str()), CellValue::from(count)])
        .collect();

    Table::new(vec!["kind".to_string(), "count".to_string()], rows)
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M",
];

/// Calendar date of a timestamp cell; `None` when it does not parse
pub fn parse_date(value: &CellValue) -> Option<NaiveDate> {
    let CellValue::Text(raw) = value else {
        return None;
    };
    let raw = raw.trim();

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

/// Earliest and latest parsable date in a column
pub fn date_range(table: &Table, column: &str) -> ViewResult<Option<(NaiveDate, NaiveDate)>> {
    Ok(table
        .column_values(column)?
        .filter_map(parse_date)
        .fold(None, |acc, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        }))
}

/// Row count per calendar day, ascending. Rows whose date does not parse are
/// left out.
pub fn daily_counts(table: &Table, column: &str) -> ViewResult<Table> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for date in table.column_values(column)?.filter_map(parse_date) {
        *per_day.entry(date).or_insert(0) += 1;
    }

    if per_day.is_empty() {
        return Err(ViewError::NoValidRows(column.to_string()));
    }

    let rows = per_day
        .into_iter()
        .map(|(date, count)| {
            vec![
                CellValue::Text(date.format("%Y-%m-%d").to_string()),
                CellValue::from(count),
            ]
        })
        .collect();

    Ok(Table::new(vec!["date".to_string(), "transactions".to_string()], rows))
}

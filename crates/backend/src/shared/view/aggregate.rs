use contracts::shared::table::CellValue;
use std::cmp::Ordering;
use std::collections::HashMap;

use super::coerce::numeric_column;
use super::{ViewError, ViewResult};
use crate::shared::table::Table;

/// Round to two decimals, ties to even (`1.625` becomes `1.62`)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Running sum and count for one aggregated column
#[derive(Debug, Clone, Copy, Default)]
struct MeanAcc {
    sum: f64,
    count: usize,
}

impl MeanAcc {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> CellValue {
        if self.count == 0 {
            CellValue::Null
        } else {
            CellValue::Number(round2(self.sum / self.count as f64))
        }
    }
}

/// Grouping key, numeric when every key in the column parses as a number
#[derive(Debug, Clone)]
enum GroupKey {
    Number(f64),
    Text(String),
}

impl GroupKey {
    fn canonical(&self) -> String {
        match self {
            GroupKey::Number(n) => n.to_string(),
            GroupKey::Text(s) => s.clone(),
        }
    }

    fn compare(&self, other: &GroupKey) -> Ordering {
        match (self, other) {
            (GroupKey::Number(a), GroupKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            _ => self.canonical().cmp(&other.canonical()),
        }
    }

    fn into_cell(self) -> CellValue {
        match self {
            GroupKey::Number(n) => CellValue::Number(n),
            GroupKey::Text(s) => CellValue::Text(s),
        }
    }
}

/// Mean of each `values` column per distinct `group_by` value.
///
/// Rows with a missing key are skipped. Each mean uses only the rows where
/// that column is numeric; a group with none gets `Null`. Groups come out in
/// ascending key order, means are rounded to two decimals.
pub fn grouped_mean(table: &Table, group_by: &str, values: &[&str]) -> ViewResult<Table> {
    let key_index = table.require(group_by)?;
    let columns = values
        .iter()
        .map(|c| numeric_column(table, c))
        .collect::<ViewResult<Vec<_>>>()?;

    let raw_keys: Vec<&CellValue> = table.rows().iter().map(|r| &r[key_index]).collect();
    let numeric_keys = raw_keys
        .iter()
        .filter(|k| !k.is_null())
        .all(|k| k.as_f64().is_some());

    let mut order: Vec<GroupKey> = Vec::new();
    let mut groups: HashMap<String, Vec<MeanAcc>> = HashMap::new();

    for (row, raw) in raw_keys.into_iter().enumerate() {
        let key = match raw {
            CellValue::Null => continue,
            value if numeric_keys => match value.as_f64() {
                Some(n) => GroupKey::Number(n),
                None => continue,
            },
            value => GroupKey::Text(value.to_string()),
        };

        let accs = groups.entry(key.canonical()).or_insert_with(|| {
            order.push(key.clone());
            vec![MeanAcc::default(); values.len()]
        });

        for (acc, column) in accs.iter_mut().zip(&columns) {
            if let Some(v) = column[row] {
                acc.push(v);
            }
        }
    }

    if order.is_empty() && !table.is_empty() {
        return Err(ViewError::NoValidRows(group_by.to_string()));
    }

    order.sort_by(|a, b| a.compare(b));

    let rows = order
        .into_iter()
        .map(|key| {
            let means: Vec<CellValue> = groups
                .get(&key.canonical())
                .map(|accs| accs.iter().map(MeanAcc::mean).collect())
                .unwrap_or_default();
            std::iter::once(key.into_cell()).chain(means).collect()
        })
        .collect();

    let header = std::iter::once(group_by)
        .chain(values.iter().copied())
        .map(str::to_string)
        .collect();

    Ok(Table::new(header, rows))
}

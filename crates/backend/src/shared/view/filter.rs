use contracts::shared::table::CellValue;
use std::cmp::Ordering;

use super::coerce::numeric_column;
use super::ViewResult;
use crate::shared::table::Table;

/// Keep rows whose numeric value in `column` is at least `min`
#[derive(Debug, Clone, PartialEq)]
pub struct Threshold {
    pub column: String,
    pub min: f64,
}

/// Keep rows whose value in `column` is one of `selected`
#[derive(Debug, Clone, PartialEq)]
pub struct Membership {
    pub column: String,
    pub selected: Vec<CellValue>,
}

/// Conjunction of thresholds and an optional membership test
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowFilter {
    thresholds: Vec<Threshold>,
    membership: Option<Membership>,
}

impl RowFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_least(mut self, column: impl Into<String>, min: f64) -> Self {
        self.thresholds.push(Threshold {
            column: column.into(),
            min,
        });
        self
    }

    /// An empty selection leaves the filter inactive rather than matching nothing
    pub fn one_of(mut self, column: impl Into<String>, selected: Vec<CellValue>) -> Self {
        self.membership = Some(Membership {
            column: column.into(),
            selected,
        });
        self
    }

    pub fn thresholds(&self) -> &[Threshold] {
        &self.thresholds
    }

    /// Rows passing every active condition, in original order.
    /// Missing or unparsable values never pass a threshold.
    pub fn apply(&self, table: &Table) -> ViewResult<Table> {
        let bounds = self
            .thresholds
            .iter()
            .map(|t| Ok((numeric_column(table, &t.column)?, t.min)))
            .collect::<ViewResult<Vec<_>>>()?;

        let membership = match &self.membership {
            Some(m) if !m.selected.is_empty() => Some((table.require(&m.column)?, &m.selected)),
            _ => None,
        };

        let keep: Vec<usize> = (0..table.len())
            .filter(|&row| {
                bounds
                    .iter()
                    .all(|(values, min)| values[row].map_or(false, |v| v >= *min))
            })
            .filter(|&row| match membership {
                Some((col, selected)) => matches_selection(&table.rows()[row][col], selected),
                None => true,
            })
            .collect();

        Ok(table.take(&keep))
    }
}

/// Numeric values compare numerically, anything else by display text
pub fn matches_selection(value: &CellValue, selected: &[CellValue]) -> bool {
    if value.is_null() {
        return false;
    }
    selected.iter().any(|s| match (value.as_f64(), s.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => value.to_string() == s.to_string(),
    })
}

/// Distinct numeric values of a column, ascending. Missing and unparsable
/// values are left out rather than turning the options into text.
pub fn numeric_options(table: &Table, column: &str) -> ViewResult<Vec<CellValue>> {
    let mut numbers: Vec<f64> = numeric_column(table, column)?.into_iter().flatten().collect();
    numbers.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    numbers.dedup();
    Ok(numbers.into_iter().map(CellValue::Number).collect())
}

/// Initial multi-select state: the first three options, or all when fewer
pub fn default_selection(options: &[CellValue]) -> Vec<CellValue> {
    options.iter().take(3).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::view::profile::column_range;
    use crate::shared::view::ViewError;

    fn promo() -> Table {
        Table::from_csv(
            "anchor_description,discount_pct,total_revenue_impact,cross_sell_items\n\
             MUG,0.05,100,2\n\
             LANTERN,0.10,250,4\n\
             CANDLE,0.15,-30,1\n\
             TIN,0.20,80,3\n\
             BAG,0.05,n/a,5\n"
                .as_bytes(),
        )
        .unwrap()
    }

    fn names(table: &Table) -> Vec<String> {
        table.rows().iter().map(|r| r[0].to_string()).collect()
    }

    #[test]
    fn test_thresholds_are_anded() {
        let filtered = RowFilter::new()
            .at_least("total_revenue_impact", 80.0)
            .at_least("cross_sell_items", 3.0)
            .apply(&promo())
            .unwrap();
        assert_eq!(names(&filtered), vec!["LANTERN", "TIN"]);
    }

    #[test]
    fn test_filter_is_monotonic() {
        let table = promo();
        let bounds = [-100.0, -30.0, 0.0, 80.0, 100.0, 250.0, 300.0];
        for pair in bounds.windows(2) {
            let loose = RowFilter::new().at_least("total_revenue_impact", pair[0]).apply(&table).unwrap();
            let tight = RowFilter::new().at_least("total_revenue_impact", pair[1]).apply(&table).unwrap();
            assert!(tight.rows().iter().all(|row| loose.rows().contains(row)));
            assert!(tight.len() <= loose.len());
        }
    }

    #[test]
    fn test_default_minimum_keeps_every_row() {
        let table = promo();
        let (min, _) = column_range(&table, "cross_sell_items").unwrap().unwrap();
        let filtered = RowFilter::new().at_least("cross_sell_items", min).apply(&table).unwrap();
        assert_eq!(filtered, table);
    }

    #[test]
    fn test_empty_selection_only_applies_thresholds() {
        let table = promo();
        let thresholds = RowFilter::new().at_least("cross_sell_items", 2.0);

        let with_empty = thresholds
            .clone()
            .one_of("discount_pct", vec![])
            .apply(&table)
            .unwrap();
        let without = thresholds.apply(&table).unwrap();

        assert_eq!(with_empty, without);
        assert_eq!(with_empty.len(), 4);
    }

    #[test]
    fn test_membership_matches_numerically() {
        let filtered = RowFilter::new()
            .one_of("discount_pct", vec![CellValue::Number(0.05), CellValue::Number(0.2)])
            .apply(&promo())
            .unwrap();
        assert_eq!(names(&filtered), vec!["MUG", "TIN", "BAG"]);
    }

    #[test]
    fn test_missing_threshold_column_fails() {
        let result = RowFilter::new().at_least("lift", 1.0).apply(&promo());
        assert_eq!(result, Err(ViewError::MissingColumn("lift".to_string())));
    }

    #[test]
    fn test_numeric_options_and_default_selection() {
        let options = numeric_options(&promo(), "discount_pct").unwrap();
        assert_eq!(
            options,
            vec![
                CellValue::Number(0.05),
                CellValue::Number(0.1),
                CellValue::Number(0.15),
                CellValue::Number(0.2),
            ]
        );
        assert_eq!(default_selection(&options), options[..3].to_vec());
        assert_eq!(default_selection(&options[..2]), options[..2].to_vec());

        assert!(numeric_options(&promo(), "anchor_description").unwrap().is_empty());
    }

    #[test]
    fn test_numeric_options_skip_unparsable_levels() {
        let table = Table::from_csv("discount_pct\n20\n5\nunknown\n15\n10\n5\n".as_bytes()).unwrap();
        let options = numeric_options(&table, "discount_pct").unwrap();

        assert_eq!(
            options,
            vec![
                CellValue::Number(5.0),
                CellValue::Number(10.0),
                CellValue::Number(15.0),
                CellValue::Number(20.0),
            ]
        );
        assert_eq!(
            default_selection(&options),
            vec![CellValue::Number(5.0), CellValue::Number(10.0), CellValue::Number(15.0)]
        );
    }
}

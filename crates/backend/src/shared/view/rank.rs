use std::cmp::Ordering;

use super::coerce::numeric_column;
use super::ViewResult;
use crate::shared::table::Table;

/// The `n` rows with the largest numeric value in `column`, largest first.
///
/// Rows without a numeric value are not ranked. The sort is stable, so tied
/// rows keep their original order.
pub fn top_n(table: &Table, n: usize, column: &str) -> ViewResult<Table> {
    let values = numeric_column(table, column)?;

    let mut ranked: Vec<(usize, f64)> = values
        .into_iter()
        .enumerate()
        .filter_map(|(row, value)| value.map(|v| (row, v)))
        .collect();

    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.truncate(n);

    let indices: Vec<usize> = ranked.into_iter().map(|(row, _)| row).collect();
    Ok(table.take(&indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::table::CellValue;

    fn baseline() -> Table {
        Table::from_csv(
            "Description,revenue,avg_price\n\
             X,100,5\n\
             Y,50,2\n"
                .as_bytes(),
        )
        .unwrap()
    }

    fn rules() -> Table {
        Table::from_csv(
            "antecedent,consequent,lift\n\
             a,b,2.5\n\
             c,d,4.0\n\
             e,f,2.5\n\
             g,h,\n\
             i,j,1.1\n"
                .as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn test_top_one_by_revenue() {
        let top = top_n(&baseline(), 1, "revenue").unwrap();

        assert_eq!(top.len(), 1);
        assert_eq!(
            top.rows()[0],
            vec![
                CellValue::Text("X".to_string()),
                CellValue::Integer(100),
                CellValue::Integer(5),
            ]
        );
    }

    #[test]
    fn test_ties_keep_original_order() {
        let top = top_n(&rules(), 3, "lift").unwrap();
        let antecedents: Vec<String> = top.rows().iter().map(|r| r[0].to_string()).collect();
        assert_eq!(antecedents, vec!["c", "a", "e"]);
    }

    #[test]
    fn test_missing_values_are_not_ranked() {
        let top = top_n(&rules(), 10, "lift").unwrap();
        assert_eq!(top.len(), 4);
    }

    #[test]
    fn test_top_n_is_idempotent() {
        let table = rules();
        for n in 0..=table.len() {
            let once = top_n(&table, n, "lift").unwrap();
            let twice = top_n(&once, n, "lift").unwrap();
            assert_eq!(once, twice, "n = {}", n);
        }
    }

    #[test]
    fn test_missing_rank_column() {
        assert!(top_n(&baseline(), 5, "lift").is_err());
    }
}

use contracts::shared::table::{CellValue, TableData};
use std::io::Read;

use super::view::{ViewError, ViewResult};

#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    #[error(transparent)]
    Parse(#[from] csv::Error),
    #[error("line {line}: expected at most {expected} fields, found {found}")]
    TooManyFields {
        line: u64,
        expected: usize,
        found: usize,
    },
}

/// Immutable in-memory table loaded from an artifact
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table; short rows are padded with `Null`
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Parse CSV with a header row. Rows shorter than the header are padded
    /// with missing values; longer rows are rejected. Cells are typed per
    /// column: a column whose present fields all parse as numbers is numeric,
    /// any other column keeps its fields as text.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, CsvError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{FEFF}').to_string())
            .collect();

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.len() > columns.len() {
                return Err(CsvError::TooManyFields {
                    line: record.position().map(|p| p.line()).unwrap_or_default(),
                    expected: columns.len(),
                    found: record.len(),
                });
            }
            records.push(record);
        }

        let numeric: Vec<bool> = (0..columns.len())
            .map(|i| {
                records
                    .iter()
                    .filter_map(|record| record.get(i))
                    .filter(|raw| !CellValue::is_missing_field(raw))
                    .all(|raw| raw.trim().parse::<f64>().is_ok())
            })
            .collect();

        let rows = records
            .iter()
            .map(|record| {
                record
                    .iter()
                    .zip(&numeric)
                    .map(|(raw, &is_numeric)| {
                        if is_numeric {
                            CellValue::from_raw(raw)
                        } else {
                            CellValue::from_text(raw)
                        }
                    })
                    .collect()
            })
            .collect();

        Ok(Self::new(columns, rows))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Index of a column the caller cannot do without
    pub fn require(&self, column: &str) -> ViewResult<usize> {
        self.column_index(column)
            .ok_or_else(|| ViewError::MissingColumn(column.to_string()))
    }

    /// Values of one column, top to bottom
    pub fn column_values(&self, column: &str) -> ViewResult<impl Iterator<Item = &CellValue> + '_> {
        let index = self.require(column)?;
        Ok(self.rows.iter().map(move |row| &row[index]))
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> Table {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Rows at the given indices, in the given order
    pub fn take(&self, indices: &[usize]) -> Table {
        Self {
            columns: self.columns.clone(),
            rows: indices
                .iter()
                .filter_map(|&i| self.rows.get(i).cloned())
                .collect(),
        }
    }

    /// Projection onto the named columns, in the given order
    pub fn select(&self, columns: &[&str]) -> ViewResult<Table> {
        let indices = columns
            .iter()
            .map(|c| self.require(c))
            .collect::<ViewResult<Vec<_>>>()?;

        Ok(Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        })
    }

    pub fn into_data(self) -> TableData {
        TableData {
            columns: self.columns,
            rows: self.rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASELINE_CSV: &str = "StockCode,Description,revenue,avg_price\n\
        85123A,WHITE HANGING HEART,100,5.5\n\
        22423,REGENCY CAKESTAND,50,\n";

    #[test]
    fn test_from_csv_types_cells() {
        let table = Table::from_csv(BASELINE_CSV.as_bytes()).unwrap();

        assert_eq!(table.columns(), &["StockCode", "Description", "revenue", "avg_price"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0][0], CellValue::Text("85123A".to_string()));
        assert_eq!(table.rows()[0][2], CellValue::Integer(100));
        assert_eq!(table.rows()[0][3], CellValue::Number(5.5));
        assert_eq!(table.rows()[1][3], CellValue::Null);
    }

    #[test]
    fn test_from_csv_header_only_is_zero_rows() {
        let table = Table::from_csv("support,confidence,lift\n".as_bytes()).unwrap();
        assert_eq!(table.columns().len(), 3);
        assert!(table.is_empty());
    }

    #[test]
    fn test_from_csv_pads_short_rows() {
        let table = Table::from_csv("Description,revenue,avg_price\nX,100,5\nY,50\n".as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1][1], CellValue::Integer(50));
        assert_eq!(table.rows()[1][2], CellValue::Null);
    }

    #[test]
    fn test_from_csv_long_row_reports_line() {
        let err = Table::from_csv("a,b\n1,2\n3,4,5\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            CsvError::TooManyFields { line: 3, expected: 2, found: 3 }
        ));
    }

    #[test]
    fn test_from_csv_strips_bom_from_header() {
        let table = Table::from_csv("\u{FEFF}Invoice,StockCode\n1,A\n".as_bytes()).unwrap();
        assert_eq!(table.columns(), &["Invoice", "StockCode"]);
    }

    #[test]
    fn test_from_csv_types_by_column() {
        let csv = "StockCode,Quantity,discount_pct\n0123,6,0.1\n85123A,12,N/A\n00042,,0.05\n";
        let table = Table::from_csv(csv.as_bytes()).unwrap();

        assert_eq!(table.rows()[0][0], CellValue::Text("0123".to_string()));
        assert_eq!(table.rows()[2][0], CellValue::Text("00042".to_string()));
        assert_eq!(table.rows()[0][1], CellValue::Integer(6));
        assert_eq!(table.rows()[2][1], CellValue::Null);
        assert_eq!(table.rows()[1][2], CellValue::Null);
        assert_eq!(table.rows()[2][2], CellValue::Number(0.05));
    }

    #[test]
    fn test_select_and_take() {
        let table = Table::from_csv(BASELINE_CSV.as_bytes()).unwrap();

        let projected = table.select(&["revenue", "Description"]).unwrap();
        assert_eq!(projected.columns(), &["revenue", "Description"]);
        assert_eq!(projected.rows()[1][1], CellValue::Text("REGENCY CAKESTAND".to_string()));

        let taken = table.take(&[1, 0, 7]);
        assert_eq!(taken.len(), 2);
        assert_eq!(taken.rows()[0][2], CellValue::Integer(50));

        assert_eq!(
            table.select(&["lift"]),
            Err(ViewError::MissingColumn("lift".to_string()))
        );
    }
}

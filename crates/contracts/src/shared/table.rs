use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of a single table cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Integer value
    Integer(i64),
    /// Numeric value
    Number(f64),
    /// Text value
    Text(String),
    /// Missing value
    Null,
}

/// Field spellings read as missing, besides the empty field
const MISSING_MARKERS: &[&str] = &[
    "NaN", "nan", "-NaN", "-nan", "NA", "N/A", "n/a", "#N/A", "<NA>", "NULL", "null", "None",
];

impl CellValue {
    /// Empty fields and the usual missing-value spellings (`NaN`, `N/A`, `null`, ...)
    pub fn is_missing_field(raw: &str) -> bool {
        let trimmed = raw.trim();
        trimmed.is_empty() || MISSING_MARKERS.contains(&trimmed)
    }

    /// Type a raw field of a numeric column: missing markers become `Null`,
    /// integers and floats are recognized, anything else stays text.
    pub fn from_raw(raw: &str) -> Self {
        if Self::is_missing_field(raw) {
            return CellValue::Null;
        }
        let trimmed = raw.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Integer(i);
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_nan() => CellValue::Null,
            Ok(n) => CellValue::Number(n),
            Err(_) => CellValue::Text(raw.to_string()),
        }
    }

    /// Raw field of a text column, kept verbatim (`"0123"` stays `"0123"`)
    pub fn from_text(raw: &str) -> Self {
        if Self::is_missing_field(raw) {
            CellValue::Null
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    /// Best-effort numeric reading of the cell. Text that does not parse and
    /// `NaN` read as missing.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            CellValue::Integer(i) => *i as f64,
            CellValue::Number(n) => *n,
            CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Null => return None,
        };
        if value.is_nan() {
            None
        } else {
            Some(value)
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Null => Ok(()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        CellValue::Integer(value as i64)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

/// Row-major table payload sent to the client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    /// Column names in display order
    pub columns: Vec<String>,
    /// Rows, each with one value per column
    pub rows: Vec<Vec<CellValue>>,
}

impl TableData {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value at `row` in the named column
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).and_then(|r| r.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_types_fields() {
        assert_eq!(CellValue::from_raw("42"), CellValue::Integer(42));
        assert_eq!(CellValue::from_raw(" 0.05 "), CellValue::Number(0.05));
        assert_eq!(CellValue::from_raw(""), CellValue::Null);
        assert_eq!(CellValue::from_raw("NaN"), CellValue::Null);
        assert_eq!(CellValue::from_raw(" N/A "), CellValue::Null);
        assert_eq!(
            CellValue::from_raw("WHITE HANGING HEART"),
            CellValue::Text("WHITE HANGING HEART".to_string())
        );
    }

    #[test]
    fn test_from_text_keeps_leading_zeros() {
        assert_eq!(CellValue::from_text("0123"), CellValue::Text("0123".to_string()));
        assert_eq!(CellValue::from_text("null"), CellValue::Null);
        assert_eq!(CellValue::from_text(""), CellValue::Null);
    }

    #[test]
    fn test_as_f64_coerces_text() {
        assert_eq!(CellValue::Text("12.5".to_string()).as_f64(), Some(12.5));
        assert_eq!(CellValue::Text("n/a".to_string()).as_f64(), None);
        assert_eq!(CellValue::Integer(3).as_f64(), Some(3.0));
        assert_eq!(CellValue::Null.as_f64(), None);
    }

    #[test]
    fn test_untagged_json_shape() {
        let json = serde_json::to_string(&vec![
            CellValue::Integer(1),
            CellValue::Number(0.5),
            CellValue::Text("x".to_string()),
            CellValue::Null,
        ])
        .unwrap();
        assert_eq!(json, r#"[1,0.5,"x",null]"#);

        let back: Vec<CellValue> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[0], CellValue::Integer(1));
        assert_eq!(back[1], CellValue::Number(0.5));
        assert_eq!(back[3], CellValue::Null);
    }

    #[test]
    fn test_table_data_value_lookup() {
        let data = TableData {
            columns: vec!["Description".to_string(), "revenue".to_string()],
            rows: vec![vec!["X".into(), CellValue::Integer(100)]],
        };
        assert_eq!(data.value(0, "revenue"), Some(&CellValue::Integer(100)));
        assert_eq!(data.value(0, "lift"), None);
        assert_eq!(data.value(1, "revenue"), None);
    }
}

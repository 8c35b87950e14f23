#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;

use crate::ColumnNames;

/// A single scalar cell.
///
/// Serializes to the natural JSON scalar (`"text"`, `1.5`, `true`, `null`) so a
/// row set round-trips through any generic JSON store.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// True for the null sentinel and for empty text.
    ///
    /// Whitespace-only text is a value, not an empty cell.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Short tag used by the canonical row encoding.
    fn kind_tag(&self) -> char {
        match self {
            Self::Bool(_) => 'b',
            Self::Number(_) => 'n',
            Self::Text(_) => 's',
            Self::Empty => 'z',
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Renders a number the way a browser stringifies it: integral values have
/// no fractional part and non-finite values are spelled out.
///
/// Magnitudes of at least `1e21` or below `1e-6` switch to exponent form
/// with an explicit sign on the exponent (`1e+21`, `1.5e-7`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value == 0.0 {
        // covers -0.0
        "0".to_string()
    } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
        let rendered = format!("{value:e}");
        match rendered.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => rendered,
        }
    } else {
        value.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => f.write_str(&format_number(*value)),
            Self::Text(text) => f.write_str(text),
            Self::Empty => Ok(()),
        }
    }
}

/// One record: column name to cell value.
///
/// Cells are keyed, so two rows holding the same column/value pairs are equal
/// regardless of the order the cells were inserted in.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<CellValue>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// Returns the cell for `column`, treating a missing key as empty.
    pub fn value(&self, column: &str) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.cells.get(column).unwrap_or(&EMPTY)
    }

    /// Replaces one cell, returning the previous value.
    pub fn set(&mut self, column: impl Into<String>, value: CellValue) -> Option<CellValue> {
        self.cells.insert(column.into(), value)
    }

    pub fn remove(&mut self, column: &str) -> Option<CellValue> {
        self.cells.remove(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Drops every cell whose key is not accepted by `keep`.
    ///
    /// Returns the number of cells removed.
    pub fn retain_columns(&mut self, mut keep: impl FnMut(&str) -> bool) -> usize {
        let before = self.cells.len();
        self.cells.retain(|key, _| keep(key));
        before - self.cells.len()
    }

    /// Canonical, order-independent encoding of the row's column/value pairs.
    ///
    /// Two rows have the same canonical form exactly when they hold the same
    /// keys with the same typed values.
    pub fn canonical_form(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.cells {
            let rendered = value.to_string();
            out.push_str(&key.len().to_string());
            out.push(':');
            out.push_str(key);
            out.push(value.kind_tag());
            out.push_str(&rendered.len().to_string());
            out.push(':');
            out.push_str(&rendered);
        }
        out
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

/// An ordered row sequence together with its column list.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Table {
    pub columns: ColumnNames,
    pub rows: Vec<Row>,
}

impl Table {
    /// Builds a table, normalising it so that every row key is a known column.
    ///
    /// When `columns` is empty the key set of the first row is used instead,
    /// in sorted key order. A blank key is renamed to its generated column
    /// name in every row so its cells survive. Keys outside the column list
    /// are dropped.
    pub fn new(columns: ColumnNames, mut rows: Vec<Row>) -> Self {
        let columns = if columns.is_empty() {
            match rows.first() {
                Some(first) => {
                    let keys: Vec<String> = first.keys().map(str::to_string).collect();
                    let derived = ColumnNames::from_headers(&keys);
                    let renames: Vec<(String, String)> = keys
                        .into_iter()
                        .zip(derived.iter())
                        .filter(|(raw, name)| raw.as_str() != *name)
                        .map(|(raw, name)| (raw, name.to_string()))
                        .collect();
                    for row in &mut rows {
                        for (raw, name) in &renames {
                            if let Some(value) = row.remove(raw) {
                                row.set(name.clone(), value);
                            }
                        }
                    }
                    derived
                }
                None => columns,
            }
        } else {
            columns
        };
        if columns.is_empty() {
            return Self::default();
        }
        for row in &mut rows {
            row.retain_columns(|key| columns.contains(key));
        }
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_display_matches_browser_stringification() {
        assert_eq!(CellValue::Number(2.0).to_string(), "2");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Number(-0.0).to_string(), "0");
        assert_eq!(CellValue::Number(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(CellValue::Number(f64::NAN).to_string(), "NaN");
        assert_eq!(CellValue::Bool(true).to_string(), "true");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn extreme_magnitudes_use_exponent_form() {
        assert_eq!(CellValue::Number(1e21).to_string(), "1e+21");
        assert_eq!(CellValue::Number(-2.5e22).to_string(), "-2.5e+22");
        assert_eq!(CellValue::Number(1.5e-7).to_string(), "1.5e-7");
        assert_eq!(CellValue::Number(-1e-7).to_string(), "-1e-7");
        assert_eq!(CellValue::Number(1e20).to_string(), "100000000000000000000");
        assert_eq!(CellValue::Number(0.000001).to_string(), "0.000001");
    }

    #[test]
    fn empty_detection() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::text("").is_empty());
        assert!(!CellValue::text(" ").is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
        assert!(!CellValue::Bool(false).is_empty());
    }

    #[test]
    fn row_equality_ignores_insertion_order() {
        let a = Row::from_pairs([("a", 1.0), ("b", 2.0)]);
        let b = Row::from_pairs([("b", 2.0), ("a", 1.0)]);
        assert_eq!(a, b);
        assert_eq!(a.canonical_form(), b.canonical_form());
    }

    #[test]
    fn canonical_form_distinguishes_types() {
        let text = Row::from_pairs([("a", CellValue::text("1"))]);
        let number = Row::from_pairs([("a", CellValue::Number(1.0))]);
        assert_ne!(text.canonical_form(), number.canonical_form());
    }

    #[test]
    fn canonical_form_is_not_fooled_by_separators() {
        let a = Row::from_pairs([("a", "x1:b"), ("b", "")]);
        let b = Row::from_pairs([("a", "x"), ("1:b", "")]);
        assert_ne!(a.canonical_form(), b.canonical_form());
    }

    #[test]
    fn missing_cell_reads_as_empty() {
        let row = Row::from_pairs([("a", "x")]);
        assert_eq!(row.value("b"), &CellValue::Empty);
        assert_eq!(row.get("b"), None);
    }

    #[test]
    fn table_falls_back_to_first_row_keys() {
        let rows = vec![Row::from_pairs([("x", "1"), ("y", "2")])];
        let table = Table::new(ColumnNames::default(), rows);
        assert_eq!(table.columns.as_slice(), ["x", "y"]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn first_row_fallback_uses_sorted_keys() {
        let rows = vec![Row::from_pairs([("zeta", "1"), ("alpha", "2")])];
        let table = Table::new(ColumnNames::default(), rows);
        assert_eq!(table.columns.as_slice(), ["alpha", "zeta"]);
    }

    #[test]
    fn first_row_fallback_keeps_blank_key_cells() {
        let rows = vec![
            Row::from_pairs([("", "x"), ("b", "1")]),
            Row::from_pairs([("", "y"), ("b", "2")]),
        ];
        let table = Table::new(ColumnNames::default(), rows);
        assert_eq!(table.columns.as_slice(), ["column_1", "b"]);
        assert_eq!(table.rows[0].value("column_1"), &CellValue::text("x"));
        assert_eq!(table.rows[1].value("column_1"), &CellValue::text("y"));
        assert!(!table.rows[0].contains(""));
    }

    #[test]
    fn table_drops_unknown_keys() {
        let columns = ColumnNames::from_headers(["a"]);
        let rows = vec![Row::from_pairs([("a", "1"), ("stray", "2")])];
        let table = Table::new(columns, rows);
        assert!(!table.rows[0].contains("stray"));
    }

    #[test]
    fn table_without_columns_or_rows_is_empty() {
        let table = Table::new(ColumnNames::default(), Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.width(), 0);
    }
}

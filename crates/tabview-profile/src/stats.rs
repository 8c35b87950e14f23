//! Column statistics types.

use serde::Serialize;

/// Maximum number of entries in [`ColumnStats::top_values`].
pub const TOP_VALUES_LIMIT: usize = 10;

/// Display values longer than this many characters are truncated.
pub const TOP_VALUE_MAX_CHARS: usize = 15;

/// Aggregates over a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub avg: f64,
}

/// Semantic type inferred for a column.
///
/// Only numeric columns carry aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColumnType {
    Number(NumericStats),
    Date,
    Boolean,
    String,
    /// No defined values to classify.
    Mixed,
}

impl ColumnType {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Mixed => "mixed",
        }
    }

    pub const fn numeric(&self) -> Option<&NumericStats> {
        match self {
            Self::Number(stats) => Some(stats),
            _ => None,
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A frequent display value and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Descriptive summary of one column, computed on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    #[serde(flatten)]
    pub kind: ColumnType,
    pub unique_count: usize,
    pub empty_count: usize,
    pub total_count: usize,
    pub top_values: Vec<ValueCount>,
}

impl ColumnStats {
    /// Number of non-empty values.
    pub fn defined_count(&self) -> usize {
        self.total_count - self.empty_count
    }
}

/// Truncates a display value for the top-values list.
pub(crate) fn truncate_display(value: &str) -> String {
    match value.char_indices().nth(TOP_VALUE_MAX_CHARS) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}

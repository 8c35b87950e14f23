//! Column analysis.

use std::collections::HashMap;

use tabview_model::{CellValue, Row, Table};

use crate::coerce::{is_boolean, is_date, to_number};
use crate::stats::{
    ColumnStats, ColumnType, NumericStats, TOP_VALUES_LIMIT, ValueCount, truncate_display,
};

/// Computes descriptive statistics for one column of `rows`.
///
/// A missing key, the empty sentinel and empty text all count as empty.
/// Classification looks at every defined value and picks the first of
/// number, date, boolean that all of them satisfy, falling back to string.
/// A column without defined values is `mixed`.
pub fn analyze(rows: &[Row], column: &str) -> ColumnStats {
    let mut defined: Vec<&CellValue> = Vec::with_capacity(rows.len());
    let mut empty_count = 0usize;

    for row in rows {
        let value = row.value(column);
        if value.is_empty() {
            empty_count += 1;
        } else {
            defined.push(value);
        }
    }

    let frequencies = frequency_table(&defined);
    let unique_count = frequencies.len();
    let kind = classify(&defined);

    tracing::debug!(
        column,
        kind = kind.name(),
        unique_count,
        empty_count,
        "analyzed column"
    );

    ColumnStats {
        kind,
        unique_count,
        empty_count,
        total_count: rows.len(),
        top_values: top_values(frequencies),
    }
}

/// Analyzes every column of a table, in column order.
pub fn analyze_table(table: &Table) -> Vec<(String, ColumnStats)> {
    table
        .columns
        .iter()
        .map(|column| (column.to_string(), analyze(&table.rows, column)))
        .collect()
}

/// Counts display strings in first-encounter order.
fn frequency_table(values: &[&CellValue]) -> Vec<ValueCount> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<ValueCount> = Vec::new();

    for value in values {
        let display = value.to_string();
        match index.get(&display) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(display.clone(), counts.len());
                counts.push(ValueCount {
                    value: display,
                    count: 1,
                });
            }
        }
    }

    counts
}

fn classify(values: &[&CellValue]) -> ColumnType {
    if values.is_empty() {
        return ColumnType::Mixed;
    }

    let numbers: Option<Vec<f64>> = values.iter().copied().map(to_number).collect();
    if let Some(numbers) = numbers {
        return ColumnType::Number(numeric_stats(&numbers));
    }

    if values.iter().copied().all(is_date) {
        ColumnType::Date
    } else if values.iter().copied().all(is_boolean) {
        ColumnType::Boolean
    } else {
        ColumnType::String
    }
}

fn numeric_stats(numbers: &[f64]) -> NumericStats {
    let sum: f64 = numbers.iter().sum();
    let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
    let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    NumericStats {
        min,
        max,
        sum,
        avg: sum / numbers.len() as f64,
    }
}

/// Most frequent values first; equal counts keep first-encounter order.
fn top_values(mut counts: Vec<ValueCount>) -> Vec<ValueCount> {
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_VALUES_LIMIT);
    for entry in &mut counts {
        entry.value = truncate_display(&entry.value);
    }
    counts
}

//! Terminal tables for rows, column statistics and the table overview.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tabview_model::{CellValue, ColumnNames, format_number};
use tabview_profile::{ColumnStats, ColumnType};
use tabview_store::{IndexedRow, QueryResult};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

/// One page of rows with a leading row-number column.
///
/// Row numbers are table positions counted from 1, the numbering `edit`,
/// `delete` and `export --rows` accept.
pub fn rows_table(columns: &ColumnNames, rows: &[IndexedRow<'_>]) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("#")];
    header.extend(columns.iter().map(header_cell));
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);

    for entry in rows {
        let mut cells = vec![dim_cell(entry.index + 1)];
        cells.extend(columns.iter().map(|column| value_cell(entry.row.value(column))));
        table.add_row(cells);
    }
    table
}

/// The line printed under a page of rows.
pub fn page_footer(result: &QueryResult<'_>) -> String {
    if result.matched == 0 {
        return format!("No matching rows ({} in table)", result.total);
    }
    let page = result.page.index + 1;
    if result.rows.is_empty() {
        return format!(
            "Page {page} is past the end ({} {})",
            result.page_count,
            plural(result.page_count, "page")
        );
    }

    let first = result.page.index * result.page.size() + 1;
    let last = first + result.rows.len() - 1;
    let mut footer = format!("Rows {first}-{last} of {}", result.matched);
    if result.matched != result.total {
        footer.push_str(&format!(" (filtered from {})", result.total));
    }
    footer.push_str(&format!(", page {page} of {}", result.page_count));
    footer
}

/// Statistics for a single column.
pub fn stats_table(column: &str, stats: &ColumnStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(column), header_cell("")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    table.add_row(vec![Cell::new("Type"), type_cell(&stats.kind)]);
    table.add_row(vec![Cell::new("Total"), Cell::new(stats.total_count)]);
    table.add_row(vec![Cell::new("Unique"), Cell::new(stats.unique_count)]);
    table.add_row(vec![Cell::new("Empty"), Cell::new(stats.empty_count)]);
    if let Some(numeric) = stats.kind.numeric() {
        table.add_row(vec![Cell::new("Min"), Cell::new(format_number(numeric.min))]);
        table.add_row(vec![Cell::new("Max"), Cell::new(format_number(numeric.max))]);
        table.add_row(vec![Cell::new("Sum"), Cell::new(format_number(numeric.sum))]);
        table.add_row(vec![Cell::new("Average"), Cell::new(format_average(numeric.avg))]);
    }
    for (rank, top) in stats.top_values.iter().enumerate() {
        let label = if rank == 0 { "Top values" } else { "" };
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format!("{} ({})", display_value(&top.value), top.count)),
        ]);
    }
    table
}

/// One line per column: type, counts and the most frequent value.
pub fn overview_table(columns: &[(String, ColumnStats)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Unique"),
        header_cell("Empty"),
        header_cell("Most common"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    for (name, stats) in columns {
        let most_common = match stats.top_values.first() {
            Some(top) => Cell::new(format!("{} ({})", display_value(&top.value), top.count)),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            type_cell(&stats.kind),
            Cell::new(stats.unique_count),
            count_cell(stats.empty_count),
            most_common,
        ]);
    }
    table
}

pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

fn value_cell(value: &CellValue) -> Cell {
    match value {
        CellValue::Number(_) => Cell::new(value).set_alignment(CellAlignment::Right),
        CellValue::Bool(_) => Cell::new(value).fg(Color::Magenta),
        CellValue::Text(_) | CellValue::Empty => Cell::new(value),
    }
}

fn type_cell(kind: &ColumnType) -> Cell {
    let color = match kind {
        ColumnType::Number(_) => Color::Green,
        ColumnType::Date => Color::Blue,
        ColumnType::Boolean => Color::Magenta,
        ColumnType::String => Color::Reset,
        ColumnType::Mixed => Color::DarkGrey,
    };
    Cell::new(kind.name()).fg(color)
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(Color::Yellow)
    }
}

fn display_value(value: &str) -> &str {
    if value.is_empty() { "(empty)" } else { value }
}

fn format_average(avg: f64) -> String {
    format_number((avg * 100.0).round() / 100.0)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

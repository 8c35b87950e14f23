//! First-sheet xlsx reading.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use tabview_model::{CellValue, ColumnNames, DataFormat, Row, Table};

use crate::error::{IngestError, Result};

/// Parses an xlsx workbook into a table built from its first worksheet.
///
/// The first sheet row is the header. Each later non-blank sheet row becomes
/// a row holding every column, with missing cells filled by empty text.
pub fn read_xlsx(bytes: &[u8]) -> Result<Table> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

    let sheet_name = workbook.sheet_names().first().cloned();
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::parse(DataFormat::Xlsx, "workbook contains no worksheets"))??;

    let mut sheet_rows = range.rows();
    let Some(header) = sheet_rows.next() else {
        tracing::debug!(sheet = ?sheet_name, "first worksheet is empty");
        return Ok(Table::empty());
    };

    let columns = ColumnNames::from_headers(header.iter().map(header_text));
    let mut rows = Vec::new();

    for cells in sheet_rows {
        if cells.iter().all(is_blank_cell) {
            continue;
        }
        let row: Row = columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let value = cells.get(idx).map_or_else(|| CellValue::text(""), cell_value);
                (column, value)
            })
            .collect();
        rows.push(row);
    }

    tracing::debug!(
        sheet = ?sheet_name,
        rows = rows.len(),
        columns = columns.len(),
        "parsed xlsx source"
    );

    Ok(Table::new(columns, rows))
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        other => cell_value(other).to_string(),
    }
}

fn is_blank_cell(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(text) => text.is_empty(),
        _ => false,
    }
}

/// Maps a typed sheet cell onto a cell value. Missing cells become empty
/// text rather than the empty sentinel.
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::text(""),
        Data::String(text) => CellValue::text(text.as_str()),
        Data::Float(value) => CellValue::Number(*value),
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Bool(value) => CellValue::Bool(*value),
        // Excel serial day number.
        Data::DateTime(value) => CellValue::Number(value.as_f64()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::text(text.as_str()),
        Data::Error(err) => CellValue::text(err.to_string()),
    }
}

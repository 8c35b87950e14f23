//! Single-worksheet xlsx output.

use rust_xlsxwriter::{Workbook, Worksheet};
use tabview_model::{CellValue, ColumnNames, Row, format_number};

use crate::ExportOptions;
use crate::error::{ExportError, Result};

/// Rows on one worksheet, header included.
pub const MAX_SHEET_ROWS: usize = 1_048_576;

/// Columns on one worksheet.
pub const MAX_SHEET_COLUMNS: usize = 16_384;

/// Writes a workbook with one worksheet: a header row, then one sheet row
/// per table row with columns pinned to `columns`.
///
/// Numbers, booleans and text keep their cell types; empty cells are left
/// blank. Non-finite numbers are written as their text form.
pub fn write_xlsx<'a>(
    rows: impl IntoIterator<Item = &'a Row>,
    columns: &ColumnNames,
    options: &ExportOptions,
) -> Result<Vec<u8>> {
    if columns.len() > MAX_SHEET_COLUMNS {
        return Err(too_large(0, columns.len()));
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(&options.sheet_name)?;

    for (col, name) in columns.iter().enumerate() {
        sheet.write_string(0, col as u16, name)?;
    }

    let mut count = 0usize;
    for row in rows {
        count += 1;
        if count >= MAX_SHEET_ROWS {
            return Err(too_large(count, columns.len()));
        }
        write_row(sheet, count as u32, row, columns)?;
    }

    let bytes = workbook.save_to_buffer()?;
    tracing::debug!(
        rows = count,
        sheet = %options.sheet_name,
        bytes = bytes.len(),
        "wrote xlsx workbook"
    );
    Ok(bytes)
}

fn write_row(
    sheet: &mut Worksheet,
    sheet_row: u32,
    row: &Row,
    columns: &ColumnNames,
) -> Result<()> {
    for (col, name) in columns.iter().enumerate() {
        let col = col as u16;
        match row.value(name) {
            CellValue::Empty => {}
            CellValue::Text(text) if text.is_empty() => {}
            CellValue::Text(text) => {
                sheet.write_string(sheet_row, col, text)?;
            }
            CellValue::Number(n) if n.is_finite() => {
                sheet.write_number(sheet_row, col, *n)?;
            }
            CellValue::Number(n) => {
                sheet.write_string(sheet_row, col, format_number(*n))?;
            }
            CellValue::Bool(b) => {
                sheet.write_boolean(sheet_row, col, *b)?;
            }
        }
    }
    Ok(())
}

fn too_large(rows: usize, columns: usize) -> ExportError {
    ExportError::TooLarge {
        rows,
        columns,
        max_rows: MAX_SHEET_ROWS - 1,
        max_columns: MAX_SHEET_COLUMNS,
    }
}

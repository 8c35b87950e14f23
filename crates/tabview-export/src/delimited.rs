//! Delimited text output.

use tabview_model::{ColumnNames, Row};

use crate::ExportOptions;
use crate::error::{ExportError, Result};

/// Writes a header record and one record per row, in column order.
///
/// Missing cells become empty fields. Fields are quoted only when needed
/// and records end with CRLF.
pub fn write_delimited<'a>(
    rows: impl IntoIterator<Item = &'a Row>,
    columns: &ColumnNames,
    options: &ExportOptions,
) -> Result<Vec<u8>> {
    if columns.is_empty() {
        return Ok(Vec::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .terminator(csv::Terminator::CRLF)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(columns.iter())?;

    let mut count = 0usize;
    for row in rows {
        writer.write_record(columns.iter().map(|column| row.value(column).to_string()))?;
        count += 1;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.error().to_string()))?;

    tracing::debug!(rows = count, bytes = bytes.len(), "wrote delimited text");
    Ok(bytes)
}

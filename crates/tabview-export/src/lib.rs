//! Table export.
//!
//! Serializes a row subset in a fixed column order to delimited text or an
//! xlsx workbook. Bytes are returned to the caller; nothing is written to
//! disk here.

mod delimited;
mod error;
mod naming;
mod options;
mod xlsx;

pub use delimited::write_delimited;
pub use error::{ExportError, Result};
pub use naming::suggested_file_name;
pub use options::{ExportOptions, ExportScope};
pub use xlsx::{MAX_SHEET_COLUMNS, MAX_SHEET_ROWS, write_xlsx};

use tabview_model::{ColumnNames, DataFormat, Row};

/// Serializes `rows` in `columns` order into the requested format.
///
/// `rows` can be the whole table or any subset of it.
pub fn export<'a>(
    rows: impl IntoIterator<Item = &'a Row>,
    columns: &ColumnNames,
    format: DataFormat,
    options: &ExportOptions,
) -> Result<Vec<u8>> {
    let bytes = match format {
        DataFormat::Csv => write_delimited(rows, columns, options)?,
        DataFormat::Xlsx => write_xlsx(rows, columns, options)?,
    };
    tracing::info!(%format, columns = columns.len(), bytes = bytes.len(), "exported table");
    Ok(bytes)
}

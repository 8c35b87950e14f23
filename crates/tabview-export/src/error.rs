//! Error types for table export.

use thiserror::Error;

/// Errors that can occur while serializing a table.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Delimited text writer failed.
    #[error("failed to write delimited text: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook writer failed.
    #[error("failed to write xlsx workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Table does not fit on one worksheet.
    #[error("table has {rows} rows and {columns} columns; a worksheet holds at most {max_rows} rows and {max_columns} columns")]
    TooLarge {
        rows: usize,
        columns: usize,
        max_rows: usize,
        max_columns: usize,
    },

    /// Flushing the in-memory buffer failed.
    #[error("failed to finish export buffer: {0}")]
    Buffer(String),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

//! Table ingestion.
//!
//! Turns delimited text and xlsx workbooks into a [`tabview_model::Table`].
//!
//! # Features
//!
//! - **Delimited text**: BOM and UTF-16 aware decoding with a Windows-1252
//!   fallback, delimiter auto-detection, first record as header
//! - **Spreadsheets**: first worksheet of an xlsx workbook, typed cells
//! - **Size checks**: [`check_source_size`] for callers that cap input size
//! - **Background parsing**: [`ingest_async`] on Tokio's blocking pool
//!
//! # Example
//!
//! ```ignore
//! use tabview_ingest::{IngestOptions, ingest};
//! use tabview_model::DataFormat;
//!
//! let table = ingest(b"name,age\nAda,36\n", DataFormat::Csv, &IngestOptions::default())?;
//! assert_eq!(table.columns.as_slice(), ["name", "age"]);
//! ```

mod delimited;
mod error;
mod options;
mod source;
mod xlsx;

// === Error Types ===
pub use error::{IngestError, Result};

// === Configuration ===
pub use options::IngestOptions;

// === Parsing ===
pub use delimited::{DELIMITER_CANDIDATES, decode_text, detect_delimiter, read_delimited};
pub use xlsx::read_xlsx;

// === Sources ===
pub use source::{
    DEFAULT_MAX_SOURCE_BYTES, check_source_size, format_for_path, ingest, ingest_async,
    ingest_path, read_source,
};

//! Shared data model for the tabview crates.
//!
//! A [`Table`] is an ordered sequence of [`Row`]s plus the [`ColumnNames`]
//! established when the table was ingested. Rows map column names to
//! [`CellValue`]s and may omit trailing columns.

pub mod columns;
pub mod format;
pub mod ids;
pub mod table;

pub use columns::ColumnNames;
pub use format::DataFormat;
pub use ids::RowId;
pub use table::{CellValue, Row, Table, format_number};

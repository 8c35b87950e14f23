//! Column type inference and descriptive statistics.
//!
//! [`analyze`] classifies one column of a row set as number, date, boolean,
//! string or mixed and summarises it. Results are never cached; every call
//! reflects the rows it is given.

mod analyze;
pub mod coerce;
mod stats;

pub use analyze::{analyze, analyze_table};
pub use stats::{
    ColumnStats, ColumnType, NumericStats, TOP_VALUE_MAX_CHARS, TOP_VALUES_LIMIT, ValueCount,
};

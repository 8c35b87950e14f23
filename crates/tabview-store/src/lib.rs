//! The authoritative in-memory table.
//!
//! [`TableStore`] owns the current rows and column list, applies edits,
//! deletions and deduplication, answers filtered/sorted/paginated queries
//! and mirrors loaded tables through a [`SessionStore`] backend.
//!
//! Mutations take `&mut self` and queries `&self`; a query result borrows
//! the store, so it always reflects one consistent snapshot.

mod error;
mod query;
mod selection;
mod session;
mod store;

pub use error::{PersistError, Result};
pub use query::{
    DEFAULT_PAGE_SIZE, IndexedRow, PAGE_SIZE_OPTIONS, PageRequest, Query, QueryResult,
    SortDirection, SortSpec, natural_cmp,
};
pub use selection::Selection;
pub use session::{NullSessionStore, SessionStore, StoredSession};
pub use store::{LoadReport, PersistStatus, TableStore};

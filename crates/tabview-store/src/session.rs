//! Persistence port for the current table.

use tabview_model::Table;

use crate::error::Result;

/// A table restored from a session backend together with its source name.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub table: Table,
    pub source_name: String,
}

/// Backend that keeps the last loaded table between runs.
///
/// Implementations must be all-or-nothing: a failed `save` leaves the
/// previously saved session intact.
pub trait SessionStore {
    /// Replaces the saved session.
    fn save(&mut self, table: &Table, source_name: &str) -> Result<()>;

    /// Returns the saved session, or `None` when nothing complete is saved.
    fn load(&self) -> Result<Option<StoredSession>>;

    /// Removes the saved session.
    fn clear(&mut self) -> Result<()>;
}

impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    fn save(&mut self, table: &Table, source_name: &str) -> Result<()> {
        (**self).save(table, source_name)
    }

    fn load(&self) -> Result<Option<StoredSession>> {
        (**self).load()
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
}

/// Backend that keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSessionStore;

impl SessionStore for NullSessionStore {
    fn save(&mut self, _table: &Table, _source_name: &str) -> Result<()> {
        Ok(())
    }

    fn load(&self) -> Result<Option<StoredSession>> {
        Ok(None)
    }

    fn clear(&mut self) -> Result<()> {
        Ok(())
    }
}

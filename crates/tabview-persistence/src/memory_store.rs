//! In-process session store.

use tabview_model::Table;
use tabview_store::{Result, SessionStore, StoredSession};

use crate::payload::SessionPayload;
use crate::{PersistenceConfig, Preferences};

/// Holds the encoded session in memory, under the same quota rules as
/// [`FileSessionStore`](crate::FileSessionStore).
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    config: PersistenceConfig,
    saved: Option<SessionPayload>,
    preferences: Preferences,
}

impl MemorySessionStore {
    pub fn new(config: PersistenceConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Encoded size of the saved session, if any.
    pub fn saved_size(&self) -> Option<u64> {
        self.saved.as_ref().map(SessionPayload::size)
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn set_preferences(&mut self, preferences: Preferences) {
        self.preferences = preferences;
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&mut self, table: &Table, source_name: &str) -> Result<()> {
        let payload = SessionPayload::encode(table, source_name)?;
        payload.check_quota(&self.config)?;
        self.saved = Some(payload);
        Ok(())
    }

    fn load(&self) -> Result<Option<StoredSession>> {
        self.saved.as_ref().map(SessionPayload::decode).transpose()
    }

    fn clear(&mut self) -> Result<()> {
        self.saved = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabview_model::{ColumnNames, Row};

    fn table(text: &str) -> Table {
        Table::new(
            ColumnNames::from_headers(["a"]),
            vec![Row::from_pairs([("a", text)])],
        )
    }

    #[test]
    fn test_round_trip() {
        let mut store = MemorySessionStore::default();
        assert!(store.load().unwrap().is_none());

        store.save(&table("x"), "a.csv").unwrap();
        let session = store.load().unwrap().unwrap();
        assert_eq!(session.table, table("x"));
        assert_eq!(session.source_name, "a.csv");
    }

    #[test]
    fn test_quota_failure_keeps_previous() {
        let mut store = MemorySessionStore::new(PersistenceConfig::default().with_quota(64));
        store.save(&table("x"), "a.csv").unwrap();
        let before = store.saved_size();

        let err = store.save(&table(&"y".repeat(100)), "b.csv").unwrap_err();
        assert!(err.is_quota_exceeded());
        assert_eq!(store.saved_size(), before);
        assert_eq!(store.load().unwrap().unwrap().source_name, "a.csv");
    }

    #[test]
    fn test_clear_keeps_preferences() {
        let mut store = MemorySessionStore::default();
        store.set_preferences(Preferences { show_stats: false });
        store.save(&table("x"), "a.csv").unwrap();

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        assert!(!store.preferences().show_stats);
    }
}

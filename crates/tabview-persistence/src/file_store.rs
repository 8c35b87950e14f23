//! Directory-backed session store.

use std::fs;
use std::path::{Path, PathBuf};

use tabview_model::Table;
use tabview_store::{PersistError, Result, SessionStore, StoredSession};

use crate::io::{
    commit_staged, discard_staged, read_key, remove_key, stage, write_atomic,
};
use crate::manifest::{CURRENT_SESSION_VERSION, SessionManifest};
use crate::payload::SessionPayload;
use crate::{PersistenceConfig, Preferences};

pub const DATA_KEY: &str = "data.json";
pub const COLUMNS_KEY: &str = "columns.json";
pub const FILENAME_KEY: &str = "filename";
pub const MANIFEST_KEY: &str = "manifest.json";
pub const PREFERENCES_KEY: &str = "preferences.json";

/// Keeps one session as a set of files in a directory.
///
/// ```text
/// <dir>/data.json         rows
/// <dir>/columns.json      column names, in order
/// <dir>/filename          source file name
/// <dir>/manifest.json     version, checksum, save time
/// <dir>/preferences.json  display preferences
/// ```
///
/// The manifest is removed before the session keys are replaced and written
/// again once they are all in place, so a partial save reads back as "no
/// session" rather than a mix of two tables.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
    config: PersistenceConfig,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>, config: PersistenceConfig) -> Self {
        Self {
            dir: dir.into(),
            config,
        }
    }

    /// A store with the default quota.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, PersistenceConfig::default())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config(&self) -> &PersistenceConfig {
        &self.config
    }

    /// The manifest of the saved session, if there is one.
    pub fn manifest(&self) -> Result<Option<SessionManifest>> {
        let Some(bytes) = read_key(&self.key(MANIFEST_KEY))? else {
            return Ok(None);
        };
        let manifest: SessionManifest =
            serde_json::from_slice(&bytes).map_err(|e| PersistError::Corrupt {
                reason: format!("unreadable manifest: {e}"),
            })?;
        if manifest.version > CURRENT_SESSION_VERSION {
            return Err(PersistError::UnsupportedVersion {
                found: manifest.version,
                max_supported: CURRENT_SESSION_VERSION,
            });
        }
        Ok(Some(manifest))
    }

    /// Saved preferences, or the defaults when none are saved.
    pub fn load_preferences(&self) -> Result<Preferences> {
        let Some(bytes) = read_key(&self.key(PREFERENCES_KEY))? else {
            return Ok(Preferences::default());
        };
        serde_json::from_slice(&bytes).map_err(|e| PersistError::Deserialization {
            source: Box::new(e),
        })
    }

    pub fn save_preferences(&self, preferences: &Preferences) -> Result<()> {
        self.ensure_dir()?;
        let bytes = serde_json::to_vec_pretty(preferences).map_err(|e| {
            PersistError::Serialization {
                source: Box::new(e),
            }
        })?;
        write_atomic(&self.key(PREFERENCES_KEY), &bytes)?;
        tracing::debug!(show_stats = preferences.show_stats, "saved preferences");
        Ok(())
    }

    fn key(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| PersistError::Io {
            operation: "create directory",
            path: self.dir.clone(),
            source: e,
        })
    }
}

impl SessionStore for FileSessionStore {
    fn save(&mut self, table: &Table, source_name: &str) -> Result<()> {
        let payload = SessionPayload::encode(table, source_name)?;
        payload.check_quota(&self.config)?;

        let manifest = SessionManifest::for_payload(&payload, table.len(), table.width());
        let manifest_bytes =
            serde_json::to_vec_pretty(&manifest).map_err(|e| PersistError::Serialization {
                source: Box::new(e),
            })?;

        self.ensure_dir()?;

        let mut staged = Vec::with_capacity(3);
        for (name, bytes) in [
            (DATA_KEY, &payload.data),
            (COLUMNS_KEY, &payload.columns),
            (FILENAME_KEY, &payload.filename),
        ] {
            match stage(&self.key(name), bytes) {
                Ok(item) => staged.push(item),
                Err(e) => {
                    discard_staged(staged);
                    return Err(e);
                }
            }
        }

        if let Err(e) = remove_key(&self.key(MANIFEST_KEY)) {
            discard_staged(staged);
            return Err(e);
        }
        commit_staged(&staged)?;
        write_atomic(&self.key(MANIFEST_KEY), &manifest_bytes)?;

        tracing::info!(
            dir = %self.dir.display(),
            rows = manifest.rows,
            columns = manifest.columns,
            bytes = payload.size(),
            "saved session"
        );
        Ok(())
    }

    fn load(&self) -> Result<Option<StoredSession>> {
        let Some(manifest) = self.manifest()? else {
            tracing::debug!(dir = %self.dir.display(), "no saved session");
            return Ok(None);
        };

        let (Some(data), Some(columns), Some(filename)) = (
            read_key(&self.key(DATA_KEY))?,
            read_key(&self.key(COLUMNS_KEY))?,
            read_key(&self.key(FILENAME_KEY))?,
        ) else {
            tracing::debug!(dir = %self.dir.display(), "saved session is incomplete");
            return Ok(None);
        };

        let payload = SessionPayload {
            data,
            columns,
            filename,
        };
        if !manifest.matches(&payload) {
            return Err(PersistError::Corrupt {
                reason: "checksum does not match manifest".to_string(),
            });
        }

        let session = payload.decode()?;
        tracing::info!(
            dir = %self.dir.display(),
            rows = session.table.len(),
            saved_at = %manifest.saved_at,
            "restored session"
        );
        Ok(Some(session))
    }

    fn clear(&mut self) -> Result<()> {
        for name in [MANIFEST_KEY, DATA_KEY, COLUMNS_KEY, FILENAME_KEY] {
            remove_key(&self.key(name))?;
        }
        tracing::info!(dir = %self.dir.display(), "cleared session");
        Ok(())
    }
}

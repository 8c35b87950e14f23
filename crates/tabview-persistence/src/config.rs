//! Session storage configuration.

use serde::{Deserialize, Serialize};

/// Default storage budget for one saved session.
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// Configuration for a session backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Largest session payload, in bytes, that a save may write.
    ///
    /// The payload is the encoded rows, columns and source name together.
    pub quota_bytes: u64,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            quota_bytes: DEFAULT_QUOTA_BYTES,
        }
    }
}

impl PersistenceConfig {
    /// A config without a storage budget.
    pub fn unlimited() -> Self {
        Self {
            quota_bytes: u64::MAX,
        }
    }

    #[must_use]
    pub fn with_quota(mut self, quota_bytes: u64) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    /// Check if a payload of `size` bytes fits the budget.
    pub fn fits(&self, size: u64) -> bool {
        size <= self.quota_bytes
    }
}

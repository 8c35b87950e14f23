//! Session manifest: layout version, checksum and save time.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::io::{sha256_hex, verify_sha256};
use crate::payload::SessionPayload;

/// Current session layout version.
pub const CURRENT_SESSION_VERSION: u32 = 1;

/// Written last on save; a session without one is treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionManifest {
    pub version: u32,
    /// SHA-256 over the data, columns and filename keys, in that order.
    pub checksum: String,
    /// RFC 3339 save time.
    pub saved_at: String,
    pub rows: usize,
    pub columns: usize,
}

impl SessionManifest {
    pub(crate) fn for_payload(payload: &SessionPayload, rows: usize, columns: usize) -> Self {
        Self {
            version: CURRENT_SESSION_VERSION,
            checksum: sha256_hex(&checksum_input(payload)),
            saved_at: Utc::now().to_rfc3339(),
            rows,
            columns,
        }
    }

    /// True when `payload` is what this manifest was written for.
    pub(crate) fn matches(&self, payload: &SessionPayload) -> bool {
        verify_sha256(&checksum_input(payload), &self.checksum)
    }
}

fn checksum_input(payload: &SessionPayload) -> Vec<u8> {
    let mut bytes =
        Vec::with_capacity(payload.data.len() + payload.columns.len() + payload.filename.len() + 2);
    bytes.extend_from_slice(&payload.data);
    bytes.push(0);
    bytes.extend_from_slice(&payload.columns);
    bytes.push(0);
    bytes.extend_from_slice(&payload.filename);
    bytes
}

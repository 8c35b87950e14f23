//! Session persistence error types.
//!
//! Every session backend reports failures through [`PersistError`], which
//! carries a user-facing message and an optional remediation hint.

use std::path::PathBuf;
use thiserror::Error;

/// Session persistence error.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The payload does not fit in the storage budget.
    #[error("Session data needs {required} bytes but the storage quota is {quota} bytes")]
    QuotaExceeded { required: u64, quota: u64 },

    /// File I/O error.
    #[error("Failed to {operation} session file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Saved session does not match its manifest.
    #[error("Saved session is corrupt: {reason}")]
    Corrupt { reason: String },

    /// Unsupported session layout version.
    #[error("Session version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion { found: u32, max_supported: u32 },

    /// Serialization error.
    #[error("Failed to serialize session data")]
    Serialization {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Deserialization error.
    #[error("Failed to deserialize session data")]
    Deserialization {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistError {
    /// True when the failure is the storage budget rather than a fault.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::QuotaExceeded { required, quota } => {
                format!(
                    "The table is too large to keep between sessions ({} KiB needed, {} KiB available). \
                    It stays loaded for now.",
                    required.div_ceil(1024),
                    quota / 1024
                )
            }
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the session file at {}", operation, path.display())
            }
            Self::Corrupt { reason } => {
                format!("The saved session could not be restored: {reason}")
            }
            Self::UnsupportedVersion {
                found,
                max_supported,
                ..
            } => {
                format!(
                    "The saved session was written by a newer version \
                    (session version {found}, this version supports up to {max_supported})."
                )
            }
            Self::Serialization { .. } => "An error occurred while saving the session.".to_string(),
            Self::Deserialization { .. } => {
                "An error occurred while reading the saved session. It may be corrupted."
                    .to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the session to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::QuotaExceeded { .. } => Some(
                "Export the table to keep your changes, or raise the session quota.".into(),
            ),
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the session directory exists and is readable.".into())
                } else {
                    Some("Check that you have permission to write to the session directory.".into())
                }
            }
            Self::Corrupt { .. } | Self::Deserialization { .. } => {
                Some("Reset the session and load the source file again.".into())
            }
            Self::UnsupportedVersion { .. } => Some("Update to the latest version.".into()),
            Self::Serialization { .. } => None,
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or choose a different session directory.".into())
            }
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistError>;

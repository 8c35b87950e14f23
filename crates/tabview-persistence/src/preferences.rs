//! Display preferences kept apart from the session.

use serde::{Deserialize, Serialize};

/// User display preferences. Survive a session reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Show the column statistics panel.
    pub show_stats: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self { show_stats: true }
    }
}

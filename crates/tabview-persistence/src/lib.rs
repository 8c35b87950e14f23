//! Session storage for tabview.
//!
//! A session is the last loaded table, its column order and the name of the
//! file it came from. It is kept across runs so a restart comes back to the
//! same data. Display preferences are stored alongside but outlive a session
//! reset.
//!
//! # Backends
//!
//! - [`FileSessionStore`] keeps the session as JSON files in a directory,
//!   written atomically and guarded by a checksummed manifest.
//! - [`MemorySessionStore`] keeps it in process, for tests and embedding.
//!
//! Both enforce a storage quota ([`PersistenceConfig`]). A save over the
//! quota fails with `PersistError::QuotaExceeded` and leaves the previously
//! saved session untouched.
//!
//! # Example
//!
//! ```ignore
//! use tabview_persistence::FileSessionStore;
//! use tabview_store::TableStore;
//!
//! let mut store = TableStore::new(FileSessionStore::open(".tabview"));
//! store.restore()?;
//! ```

mod config;
mod file_store;
mod io;
mod manifest;
mod memory_store;
mod payload;
mod preferences;

pub use config::{DEFAULT_QUOTA_BYTES, PersistenceConfig};
pub use file_store::{
    COLUMNS_KEY, DATA_KEY, FILENAME_KEY, FileSessionStore, MANIFEST_KEY, PREFERENCES_KEY,
};
pub use io::{sha256_hex, verify_sha256};
pub use manifest::{CURRENT_SESSION_VERSION, SessionManifest};
pub use memory_store::MemorySessionStore;
pub use preferences::Preferences;
pub use tabview_store::{PersistError, Result};

//! Atomic writes into the session directory.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tabview_store::{PersistError, Result};

/// A payload written next to its target but not yet renamed into place.
#[derive(Debug)]
pub(crate) struct Staged {
    temp_path: PathBuf,
    target_path: PathBuf,
}

/// Writes `bytes` to `<path>.tmp` and syncs it.
pub(crate) fn stage(path: &Path, bytes: &[u8]) -> Result<Staged> {
    let temp_path = path.with_extension(temp_extension(path));

    let mut file = File::create(&temp_path).map_err(|e| PersistError::Io {
        operation: "create temp",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(bytes).map_err(|e| PersistError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| PersistError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    Ok(Staged {
        temp_path,
        target_path: path.to_path_buf(),
    })
}

/// Renames every staged file into place.
///
/// Temp files that were never renamed are removed when an earlier rename
/// fails.
pub(crate) fn commit_staged(staged: &[Staged]) -> Result<()> {
    for (position, item) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(&item.temp_path, &item.target_path) {
            for rest in &staged[position..] {
                let _ = fs::remove_file(&rest.temp_path);
            }
            return Err(PersistError::AtomicWriteFailed {
                temp_path: item.temp_path.clone(),
                target_path: item.target_path.clone(),
                source: e,
            });
        }
    }
    Ok(())
}

/// Removes staged temp files without committing them.
pub(crate) fn discard_staged(staged: Vec<Staged>) {
    for item in staged {
        let _ = fs::remove_file(&item.temp_path);
    }
}

/// Writes one file atomically (temp file, sync, rename).
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let staged = stage(path, bytes)?;
    commit_staged(&[staged])
}

/// Removes one session key. A missing file is not an error.
pub(crate) fn remove_key(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(PersistError::Io {
            operation: "remove",
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

fn temp_extension(path: &Path) -> String {
    match path.extension() {
        Some(ext) => format!("{}.tmp", ext.to_string_lossy()),
        None => "tmp".to_string(),
    }
}

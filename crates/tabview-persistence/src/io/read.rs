use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tabview_store::{PersistError, Result};

/// Reads one session key. A missing file is `None`, not an error.
pub(crate) fn read_key(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(PersistError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempdir().unwrap();
        assert!(read_key(&dir.path().join("absent")).unwrap().is_none());
    }

    #[test]
    fn test_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let err = read_key(dir.path()).unwrap_err();
        assert!(matches!(err, PersistError::Io { operation: "read", .. }));
    }
}

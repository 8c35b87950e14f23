//! Format dispatch, file access and background ingest.

use std::path::Path;

use tabview_model::{DataFormat, Table};

use crate::delimited::read_delimited;
use crate::error::{IngestError, Result};
use crate::xlsx::read_xlsx;
use crate::IngestOptions;

/// Default size limit callers apply before reading a source (10 MiB).
pub const DEFAULT_MAX_SOURCE_BYTES: u64 = 10 * 1024 * 1024;

/// Parses source bytes of a known format into a table.
///
/// Either the whole table is produced or an error is returned; a malformed
/// source yields [`IngestError::Parse`], never a partial table.
pub fn ingest(bytes: &[u8], format: DataFormat, options: &IngestOptions) -> Result<Table> {
    let table = match format {
        DataFormat::Csv => read_delimited(bytes, options)?,
        DataFormat::Xlsx => read_xlsx(bytes)?,
    };
    tracing::info!(
        %format,
        rows = table.len(),
        columns = table.width(),
        "ingested table"
    );
    Ok(table)
}

/// Parses source bytes on the blocking thread pool.
///
/// The finished table (or the error) is delivered as a single value.
pub async fn ingest_async(
    bytes: Vec<u8>,
    format: DataFormat,
    options: IngestOptions,
) -> Result<Table> {
    tokio::task::spawn_blocking(move || ingest(&bytes, format, &options))
        .await
        .map_err(|e| IngestError::Task {
            message: e.to_string(),
        })?
}

/// Resolves the format of a source path from its extension.
pub fn format_for_path(path: &Path) -> Result<DataFormat> {
    DataFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })
}

/// Checks a source file's size against a limit before it is read.
pub fn check_source_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::from_io(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reads a source file into memory.
pub fn read_source(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| IngestError::from_io(path, e))
}

/// Reads and parses a file. The format comes from `format` or, when absent,
/// from the file extension.
pub fn ingest_path(
    path: &Path,
    format: Option<DataFormat>,
    options: &IngestOptions,
) -> Result<Table> {
    let format = match format {
        Some(format) => format,
        None => format_for_path(path)?,
    };
    let bytes = read_source(path)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read source file");
    ingest(&bytes, format, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_file(suffix: &str, content: &[u8]) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_check_source_size_within_limit() {
        let file = create_temp_file(".csv", b"a,b\n1,2\n");
        assert!(check_source_size(file.path(), 100).is_ok());
    }

    #[test]
    fn test_check_source_size_over_limit() {
        let file = create_temp_file(".csv", b"a,b\n1,2\n");
        let result = check_source_size(file.path(), 4);
        assert!(matches!(
            result,
            Err(IngestError::FileTooLarge { size: 8, max_size: 4, .. })
        ));
    }

    #[test]
    fn test_check_source_size_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = check_source_size(&dir.path().join("missing.csv"), 10);
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_ingest_path_uses_extension() {
        let file = create_temp_file(".CSV", b"x;y\n1;2\n");
        let table = ingest_path(file.path(), None, &IngestOptions::default()).unwrap();
        assert_eq!(table.columns.as_slice(), ["x", "y"]);
    }

    #[test]
    fn test_ingest_path_rejects_unknown_extension() {
        let file = create_temp_file(".pdf", b"%PDF");
        let result = ingest_path(file.path(), None, &IngestOptions::default());
        assert!(matches!(result, Err(IngestError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_explicit_format_overrides_extension() {
        let file = create_temp_file(".dat", b"a\n1\n");
        let table =
            ingest_path(file.path(), Some(DataFormat::Csv), &IngestOptions::default()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[tokio::test]
    async fn test_ingest_async_delivers_table() {
        let table = ingest_async(
            b"a,b\n1,2\n3,4\n".to_vec(),
            DataFormat::Csv,
            IngestOptions::default(),
        )
        .await
        .unwrap();
        assert_eq!(table.len(), 2);
    }

    #[tokio::test]
    async fn test_ingest_async_reports_parse_error() {
        let result = ingest_async(b"nope".to_vec(), DataFormat::Xlsx, IngestOptions::default()).await;
        assert!(matches!(result, Err(IngestError::Parse { .. })));
    }
}

//! Encoded form of a saved session.

use tabview_model::{ColumnNames, Row, Table};
use tabview_store::{PersistError, Result, StoredSession};

use crate::PersistenceConfig;

/// The three session keys, encoded and ready to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SessionPayload {
    pub data: Vec<u8>,
    pub columns: Vec<u8>,
    pub filename: Vec<u8>,
}

impl SessionPayload {
    pub fn encode(table: &Table, source_name: &str) -> Result<Self> {
        Ok(Self {
            data: serde_json::to_vec(&table.rows).map_err(serialization)?,
            columns: serde_json::to_vec(&table.columns).map_err(serialization)?,
            filename: source_name.as_bytes().to_vec(),
        })
    }

    pub fn size(&self) -> u64 {
        (self.data.len() + self.columns.len() + self.filename.len()) as u64
    }

    /// Fails with `QuotaExceeded` when the payload is over budget.
    pub fn check_quota(&self, config: &PersistenceConfig) -> Result<()> {
        let required = self.size();
        if config.fits(required) {
            Ok(())
        } else {
            Err(PersistError::QuotaExceeded {
                required,
                quota: config.quota_bytes,
            })
        }
    }

    pub fn decode(&self) -> Result<StoredSession> {
        let rows: Vec<Row> = serde_json::from_slice(&self.data).map_err(deserialization)?;
        let columns: ColumnNames =
            serde_json::from_slice(&self.columns).map_err(deserialization)?;
        let source_name =
            String::from_utf8(self.filename.clone()).map_err(|_| PersistError::Corrupt {
                reason: "source name is not valid UTF-8".to_string(),
            })?;

        Ok(StoredSession {
            table: Table::new(columns, rows),
            source_name,
        })
    }
}

fn serialization(e: serde_json::Error) -> PersistError {
    PersistError::Serialization {
        source: Box::new(e),
    }
}

fn deserialization(e: serde_json::Error) -> PersistError {
    PersistError::Deserialization {
        source: Box::new(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabview_model::CellValue;

    fn table() -> Table {
        Table::new(
            ColumnNames::from_headers(["id", "name"]),
            vec![Row::from_pairs([
                ("id", CellValue::Number(1.0)),
                ("name", CellValue::text("Ada")),
            ])],
        )
    }

    #[test]
    fn test_encode_decode() {
        let payload = SessionPayload::encode(&table(), "people.csv").unwrap();
        let session = payload.decode().unwrap();
        assert_eq!(session.table, table());
        assert_eq!(session.source_name, "people.csv");
    }

    #[test]
    fn test_size_counts_every_key() {
        let payload = SessionPayload::encode(&table(), "p.csv").unwrap();
        assert_eq!(
            payload.size(),
            (payload.data.len() + payload.columns.len() + 5) as u64
        );
    }

    #[test]
    fn test_quota_exceeded() {
        let payload = SessionPayload::encode(&table(), "p.csv").unwrap();
        let config = PersistenceConfig::default().with_quota(payload.size() - 1);
        let err = payload.check_quota(&config).unwrap_err();
        assert!(err.is_quota_exceeded());
    }

    #[test]
    fn test_garbage_data_fails_to_decode() {
        let payload = SessionPayload {
            data: b"not json".to_vec(),
            columns: b"[]".to_vec(),
            filename: Vec::new(),
        };
        assert!(matches!(
            payload.decode(),
            Err(PersistError::Deserialization { .. })
        ));
    }
}

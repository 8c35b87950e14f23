//! Ingest configuration.

/// Options controlling how a source is parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IngestOptions {
    /// Field delimiter for delimited text. `None` auto-detects it.
    pub delimiter: Option<u8>,
}

impl IngestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces a specific delimiter instead of detecting one.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Returns to delimiter auto-detection.
    #[must_use]
    pub fn with_detected_delimiter(mut self) -> Self {
        self.delimiter = None;
        self
    }
}

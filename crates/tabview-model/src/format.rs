use std::fmt;
use std::path::Path;

/// External representation of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    /// Delimited text with a header row.
    Csv,
    /// Office Open XML workbook; only the first sheet is used.
    Xlsx,
}

impl DataFormat {
    /// Picks a format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "tsv" | "txt" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(
            DataFormat::from_path(Path::new("people.CSV")),
            Some(DataFormat::Csv)
        );
        assert_eq!(
            DataFormat::from_path(Path::new("book.xlsx")),
            Some(DataFormat::Xlsx)
        );
        assert_eq!(DataFormat::from_path(Path::new("notes.pdf")), None);
        assert_eq!(DataFormat::from_path(Path::new("no_extension")), None);
    }
}

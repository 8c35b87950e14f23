//! Export configuration.

/// Which rows an export covers. Drives the sheet and file naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportScope {
    /// The whole table.
    #[default]
    All,
    /// A user selection.
    Selected,
}

impl ExportScope {
    pub const fn sheet_name(self) -> &'static str {
        match self {
            Self::All => "Sheet1",
            Self::Selected => "Selected",
        }
    }

    pub const fn file_prefix(self) -> &'static str {
        match self {
            Self::All => "exported",
            Self::Selected => "selected",
        }
    }
}

/// Options controlling export output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Field delimiter for delimited text.
    pub delimiter: u8,
    /// Worksheet name for xlsx output.
    pub sheet_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::for_scope(ExportScope::All)
    }
}

impl ExportOptions {
    /// Defaults for an export of the given scope.
    pub fn for_scope(scope: ExportScope) -> Self {
        Self {
            delimiter: b',',
            sheet_name: scope.sheet_name().to_string(),
        }
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }
}

//! Download file names.

use tabview_model::DataFormat;

use crate::ExportScope;

/// File name offered for an export, e.g. `exported_people.csv` or
/// `selected_people.xlsx`.
///
/// The source name's own extension is dropped; an empty or missing source
/// name becomes `data`.
pub fn suggested_file_name(
    source_name: Option<&str>,
    format: DataFormat,
    scope: ExportScope,
) -> String {
    let stem = source_name.map(strip_extension).unwrap_or_default();
    let stem = if stem.is_empty() { "data" } else { stem };
    format!("{}_{}.{}", scope.file_prefix(), stem, format.extension())
}

fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot > 0 && !name[dot..].contains('/') => &name[..dot],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_export_name() {
        assert_eq!(
            suggested_file_name(Some("people.csv"), DataFormat::Csv, ExportScope::All),
            "exported_people.csv"
        );
        assert_eq!(
            suggested_file_name(Some("people.csv"), DataFormat::Xlsx, ExportScope::All),
            "exported_people.xlsx"
        );
    }

    #[test]
    fn test_selected_export_name() {
        assert_eq!(
            suggested_file_name(Some("q1.report.xlsx"), DataFormat::Csv, ExportScope::Selected),
            "selected_q1.report.csv"
        );
    }

    #[test]
    fn test_missing_name_falls_back_to_data() {
        assert_eq!(
            suggested_file_name(None, DataFormat::Csv, ExportScope::All),
            "exported_data.csv"
        );
        assert_eq!(
            suggested_file_name(Some(""), DataFormat::Xlsx, ExportScope::Selected),
            "selected_data.xlsx"
        );
    }

    #[test]
    fn test_dotfile_keeps_its_name() {
        assert_eq!(
            suggested_file_name(Some(".hidden"), DataFormat::Csv, ExportScope::All),
            "exported_.hidden.csv"
        );
    }
}

//! Delimited text into a table, first record as header.

use tabview_model::{CellValue, ColumnNames, Row, Table};

use crate::IngestOptions;
use crate::error::Result;

use super::{decode_text, detect_delimiter};

/// Parses delimited text bytes into a table.
///
/// The first non-empty record supplies the column names. Every later record
/// becomes a row keyed by those names; every present field is kept as text,
/// fields missing at the end of a short record are omitted, and fields beyond
/// the header are dropped. Empty lines are skipped.
pub fn read_delimited(bytes: &[u8], options: &IngestOptions) -> Result<Table> {
    let text = decode_text(bytes);
    let delimiter = options
        .delimiter
        .unwrap_or_else(|| detect_delimiter(&text));

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut records = reader.records();

    let header = loop {
        match records.next() {
            None => return Ok(Table::empty()),
            Some(record) => {
                let record = record?;
                if !is_blank(&record) {
                    break record;
                }
            }
        }
    };

    let columns = ColumnNames::from_headers(header.iter());
    let mut rows = Vec::new();
    let mut dropped_fields = 0usize;

    for record in records {
        let record = record?;
        if is_blank(&record) {
            continue;
        }
        dropped_fields += record.len().saturating_sub(columns.len());
        let row: Row = columns
            .iter()
            .zip(record.iter())
            .map(|(column, field)| (column, CellValue::text(field)))
            .collect();
        rows.push(row);
    }

    if dropped_fields > 0 {
        tracing::debug!(
            dropped_fields,
            "dropped fields beyond the header width"
        );
    }
    tracing::debug!(
        rows = rows.len(),
        columns = columns.len(),
        delimiter = %char::from(delimiter).escape_default(),
        "parsed delimited source"
    );

    Ok(Table::new(columns, rows))
}

/// A record produced by an empty line.
fn is_blank(record: &csv::StringRecord) -> bool {
    record.is_empty() || (record.len() == 1 && record[0].is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Table {
        read_delimited(text.as_bytes(), &IngestOptions::default()).unwrap()
    }

    #[test]
    fn test_header_row_names_columns() {
        let table = parse("name,age\nAda,36\nBob,41\n");
        assert_eq!(table.columns.as_slice(), ["name", "age"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].value("age"), &CellValue::text("41"));
    }

    #[test]
    fn test_fields_stay_text() {
        let table = parse("n,flag\n1.5,true\n");
        assert_eq!(table.rows[0].value("n"), &CellValue::text("1.5"));
        assert_eq!(table.rows[0].value("flag"), &CellValue::text("true"));
    }

    #[test]
    fn test_short_record_omits_trailing_fields() {
        let table = parse("a,b,c\n1\n");
        assert_eq!(table.rows[0].len(), 1);
        assert!(!table.rows[0].contains("b"));
    }

    #[test]
    fn test_present_empty_field_is_kept() {
        let table = parse("a,b\n,2\n");
        assert_eq!(table.rows[0].get("a"), Some(&CellValue::text("")));
    }

    #[test]
    fn test_extra_fields_are_dropped() {
        let table = parse("a,b\n1,2,3,4\n");
        assert_eq!(table.rows[0].len(), 2);
    }

    #[test]
    fn test_empty_lines_are_skipped() {
        let table = parse("\n\na,b\n1,2\n\n3,4\n\n");
        assert_eq!(table.columns.as_slice(), ["a", "b"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_duplicate_and_blank_headers() {
        let table = parse("id,,id\n1,2,3\n");
        assert_eq!(table.columns.as_slice(), ["id", "column_2", "id_1"]);
        assert_eq!(table.rows[0].value("id_1"), &CellValue::text("3"));
    }

    #[test]
    fn test_quoted_fields() {
        let table = parse("name,quote\n\"Smith, J\",\"said \"\"hi\"\"\"\n");
        assert_eq!(table.rows[0].value("name"), &CellValue::text("Smith, J"));
        assert_eq!(table.rows[0].value("quote"), &CellValue::text("said \"hi\""));
    }

    #[test]
    fn test_crlf_line_endings() {
        let table = parse("a,b\r\n1,2\r\n");
        assert_eq!(table.rows[0].value("b"), &CellValue::text("2"));
    }

    #[test]
    fn test_detected_semicolon() {
        let table = parse("a;b\n1;2\n");
        assert_eq!(table.columns.as_slice(), ["a", "b"]);
    }

    #[test]
    fn test_explicit_delimiter_wins() {
        let options = IngestOptions::new().with_delimiter(b'|');
        let table = read_delimited(b"a,b|c\n1,2|3\n", &options).unwrap();
        assert_eq!(table.columns.as_slice(), ["a,b", "c"]);
    }

    #[test]
    fn test_empty_source_is_empty_table() {
        assert!(parse("").is_empty());
        assert_eq!(parse("\n\n").width(), 0);
    }

    #[test]
    fn test_header_only() {
        let table = parse("a,b\n");
        assert_eq!(table.width(), 2);
        assert!(table.is_empty());
    }
}

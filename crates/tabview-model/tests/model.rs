//! Tests for tabview-model types.

use tabview_model::{CellValue, ColumnNames, DataFormat, Row, RowId, Table};

#[test]
fn short_rows_stay_short() {
    let table = Table::new(
        ColumnNames::from_headers(["a", "b", "c"]),
        vec![
            Row::from_pairs([("a", "1"), ("b", "2"), ("c", "3")]),
            Row::from_pairs([("a", "4")]),
        ],
    );
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[1].len(), 1);
    assert!(table.rows[1].value("c").is_empty());
}

#[test]
fn session_payload_round_trips_through_json() {
    let columns = ColumnNames::from_headers(["id", "score", "note"]);
    let rows = vec![
        Row::from_pairs([
            ("id", CellValue::text("a-1")),
            ("score", CellValue::Number(9.5)),
            ("note", CellValue::Empty),
        ]),
        Row::from_pairs([("id", CellValue::text("a-2")), ("score", CellValue::Bool(false))]),
    ];

    let data = serde_json::to_string(&rows).expect("serialize rows");
    let cols = serde_json::to_string(&columns).expect("serialize columns");

    let rows_back: Vec<Row> = serde_json::from_str(&data).expect("deserialize rows");
    let cols_back: ColumnNames = serde_json::from_str(&cols).expect("deserialize columns");

    assert_eq!(rows_back, rows);
    assert_eq!(cols_back, columns);
}

#[test]
fn row_ids_are_ordered() {
    let first = RowId::new(0);
    let second = first.next();
    assert!(first < second);
    assert_eq!(second.get(), 1);
    assert_eq!(second.to_string(), "r1");
}

#[test]
fn format_names_its_extension() {
    assert_eq!(DataFormat::Csv.extension(), "csv");
    assert_eq!(DataFormat::Xlsx.to_string(), "xlsx");
}

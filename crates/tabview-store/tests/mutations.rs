//! Edit, delete and deduplication behaviour of the table store.

use proptest::prelude::*;
use tabview_model::{CellValue, ColumnNames, Row, Table};
use tabview_store::{NullSessionStore, TableStore};

fn store_with(columns: &[&str], rows: Vec<Row>) -> TableStore<NullSessionStore> {
    let mut store = TableStore::new(NullSessionStore);
    store.load(Table::new(ColumnNames::from_headers(columns), rows), "t.csv");
    store
}

#[test]
fn dedup_removes_exact_repeat() {
    let mut store = store_with(
        &["a", "b"],
        vec![
            Row::from_pairs([("a", "1"), ("b", "x")]),
            Row::from_pairs([("a", "2"), ("b", "y")]),
            Row::from_pairs([("a", "1"), ("b", "x")]),
        ],
    );
    assert_eq!(store.deduplicate(), 1);
    let kept: Vec<String> = store.rows().iter().map(|r| r.value("a").to_string()).collect();
    assert_eq!(kept, ["1", "2"]);
}

#[test]
fn dedup_treats_text_and_number_as_different() {
    let mut store = store_with(
        &["a"],
        vec![
            Row::from_pairs([("a", CellValue::text("1"))]),
            Row::from_pairs([("a", CellValue::Number(1.0))]),
        ],
    );
    assert_eq!(store.deduplicate(), 0);
}

#[test]
fn edit_then_dedup() {
    let mut store = store_with(
        &["a"],
        vec![Row::from_pairs([("a", "1")]), Row::from_pairs([("a", "2")])],
    );
    assert!(store.update_cell(1, "a", CellValue::text("1")));
    assert_eq!(store.deduplicate(), 1);
    assert_eq!(store.len(), 1);
}

#[test]
fn delete_everything() {
    let mut store = store_with(
        &["a"],
        vec![Row::from_pairs([("a", "1")]), Row::from_pairs([("a", "2")])],
    );
    assert_eq!(store.delete_rows([1, 0]), 2);
    assert!(store.is_empty());
    assert_eq!(store.columns().len(), 1);
}

fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    let cell = prop_oneof![
        Just(None),
        "[ab]{0,1}".prop_map(|s| Some(CellValue::Text(s))),
        (0u8..3).prop_map(|n| Some(CellValue::Number(f64::from(n)))),
    ];
    prop::collection::vec((cell.clone(), cell), 0..40).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(x, y)| {
                let mut row = Row::new();
                if let Some(x) = x {
                    row.set("x", x);
                }
                if let Some(y) = y {
                    row.set("y", y);
                }
                row
            })
            .collect()
    })
}

proptest! {
    /// Property: deduplication is idempotent
    #[test]
    fn prop_dedup_idempotent(rows in rows_strategy()) {
        let mut store = store_with(&["x", "y"], rows);
        store.deduplicate();
        let once = store.rows().to_vec();
        prop_assert_eq!(store.deduplicate(), 0);
        prop_assert_eq!(store.rows(), once.as_slice());
    }

    /// Property: deduplication keeps exactly the first occurrences, in order
    #[test]
    fn prop_dedup_keeps_first_occurrences(rows in rows_strategy()) {
        let mut expected: Vec<Row> = Vec::new();
        for row in &rows {
            if !expected.contains(row) {
                expected.push(row.clone());
            }
        }
        let mut store = store_with(&["x", "y"], rows.clone());
        let removed = store.deduplicate();
        prop_assert_eq!(removed, rows.len() - expected.len());
        prop_assert_eq!(store.rows(), expected.as_slice());
    }

    /// Property: deleting a set of positions removes exactly those rows
    #[test]
    fn prop_delete_removes_exactly_given_rows(
        rows in rows_strategy(),
        picks in prop::collection::btree_set(0usize..50, 0..10),
    ) {
        let mut store = store_with(&["x", "y"], rows.clone());
        let expected: Vec<Row> = rows
            .iter()
            .enumerate()
            .filter(|(i, _)| !picks.contains(i))
            .map(|(_, row)| row.clone())
            .collect();
        let removed = store.delete_rows(picks.iter().copied());
        prop_assert_eq!(removed, rows.len() - expected.len());
        prop_assert_eq!(store.rows(), expected.as_slice());
    }
}

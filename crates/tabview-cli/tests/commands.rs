//! Subcommands run against a temporary session directory.

use std::fs;
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tabview_cli::cli::Cli;
use tabview_cli::commands::run;
use tempfile::{TempDir, tempdir};

const PEOPLE: &str = "name,age,city\nAda Smith,36,Oslo\nBob,41,Bergen\nCara Smith,29,Oslo\n";

fn tabview(session: &Path, args: &[&str]) -> Result<String> {
    let session = session.to_string_lossy().into_owned();
    let mut argv = vec!["tabview", "--session-dir", session.as_str()];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv)?;
    let mut out = Vec::new();
    run(&cli.command, &cli.session_dir, &mut out)?;
    Ok(String::from_utf8(out)?)
}

/// A session directory with `contents` loaded from `name`.
fn loaded(name: &str, contents: &str) -> (TempDir, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let source = dir.path().join(name);
    fs::write(&source, contents).unwrap();
    let session = dir.path().join("session");
    tabview(&session, &["load", source.to_str().unwrap()]).unwrap();
    (dir, session)
}

#[test]
fn load_reports_shape() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("people.csv");
    fs::write(&source, PEOPLE).unwrap();

    let out = tabview(&dir.path().join("s"), &["load", source.to_str().unwrap()]).unwrap();
    assert_eq!(out, "Loaded 3 rows and 3 columns from people.csv\n");
}

#[test]
fn show_filters_case_insensitively() {
    let (_dir, session) = loaded("people.csv", PEOPLE);

    let out = tabview(&session, &["show", "--filter", "smith"]).unwrap();
    assert!(out.contains("Ada Smith"));
    assert!(out.contains("Cara Smith"));
    assert!(!out.contains("Bob"));
    assert!(out.ends_with("Rows 1-2 of 2 (filtered from 3), page 1 of 1\n"));
}

#[test]
fn show_sorts_descending() {
    let (_dir, session) = loaded("people.csv", PEOPLE);

    let out = tabview(&session, &["show", "--sort", "age", "--desc"]).unwrap();
    let bob = out.find("Bob").unwrap();
    let ada = out.find("Ada").unwrap();
    let cara = out.find("Cara").unwrap();
    assert!(bob < ada && ada < cara);
}

#[test]
fn commands_need_a_loaded_table() {
    let dir = tempdir().unwrap();
    let err = tabview(dir.path(), &["show"]).unwrap_err();
    assert!(err.to_string().contains("no table loaded"));
}

#[test]
fn stats_as_json() {
    let (_dir, session) = loaded("values.csv", "v\n2\n4\n4\n6\n");

    let out = tabview(&session, &["stats", "v", "--json"]).unwrap();
    insta::assert_snapshot!(out.trim_end(), @r#"
    {
      "type": "number",
      "min": 2.0,
      "max": 6.0,
      "sum": 16.0,
      "avg": 4.0,
      "unique_count": 3,
      "empty_count": 0,
      "total_count": 4,
      "top_values": [
        {
          "value": "4",
          "count": 2
        },
        {
          "value": "2",
          "count": 1
        },
        {
          "value": "6",
          "count": 1
        }
      ]
    }
    "#);
}

#[test]
fn stats_rejects_unknown_column() {
    let (_dir, session) = loaded("people.csv", PEOPLE);
    let err = tabview(&session, &["stats", "salary"]).unwrap_err();
    assert!(err.to_string().contains("unknown column `salary`"));
}

#[test]
fn mutations_are_saved_between_runs() {
    let (_dir, session) = loaded(
        "dupes.csv",
        "name,n\nA,1\nB,2\nA,1\nC,3\n",
    );

    let out = tabview(&session, &["dedup"]).unwrap();
    assert_eq!(out, "Removed 1 duplicate row, 3 rows left\n");

    let out = tabview(&session, &["delete", "1"]).unwrap();
    assert_eq!(out, "Deleted 1 row\n");

    tabview(&session, &["edit", "1", "name", "Zed"]).unwrap();

    let out = tabview(&session, &["show"]).unwrap();
    assert!(out.contains("Zed"));
    assert!(out.contains('C'));
    assert!(!out.contains(" A "));
    assert!(out.ends_with("Rows 1-2 of 2, page 1 of 1\n"));
}

#[test]
fn edit_out_of_range_fails_without_change() {
    let (_dir, session) = loaded("people.csv", PEOPLE);

    let err = tabview(&session, &["edit", "9", "name", "X"]).unwrap_err();
    assert!(err.to_string().contains("row 9 is out of range"));

    let out = tabview(&session, &["delete", "9"]).unwrap();
    assert!(out.starts_with("Deleted 0 rows\n"));
}

#[test]
fn export_selected_rows_round_trips_through_xlsx() {
    let (dir, session) = loaded("people.csv", PEOPLE);
    let target = dir.path().join("bob.xlsx");

    let out = tabview(&session, &["export", target.to_str().unwrap(), "--rows", "2"]).unwrap();
    assert!(out.starts_with("Exported 1 row to "));

    let other = dir.path().join("other-session");
    let out = tabview(&other, &["load", target.to_str().unwrap()]).unwrap();
    assert_eq!(out, "Loaded 1 row and 3 columns from bob.xlsx\n");
    let out = tabview(&other, &["show"]).unwrap();
    assert!(out.contains("Bob"));
    assert!(out.contains("Bergen"));
}

#[test]
fn export_into_directory_uses_suggested_name() {
    let (dir, session) = loaded("people.csv", PEOPLE);
    let out_dir = dir.path().join("out");
    fs::create_dir(&out_dir).unwrap();

    tabview(&session, &["export", out_dir.to_str().unwrap(), "--format", "csv"]).unwrap();

    let written = fs::read_to_string(out_dir.join("exported_people.csv")).unwrap();
    assert_eq!(
        written,
        PEOPLE.replace('\n', "\r\n")
    );
}

#[test]
fn export_needs_a_known_format() {
    let (dir, session) = loaded("people.csv", PEOPLE);
    let target = dir.path().join("people.txt");
    let err = tabview(&session, &["export", target.to_str().unwrap()]).unwrap_err();
    assert!(err.to_string().contains("--format"));
}

#[test]
fn info_overview_follows_preference() {
    let (_dir, session) = loaded("people.csv", PEOPLE);

    let out = tabview(&session, &["info"]).unwrap();
    assert!(out.starts_with("File:    people.csv\nRows:    3\nColumns: 3\n"));
    assert!(out.contains("Most common"));

    let out = tabview(&session, &["prefs", "--show-stats", "false"]).unwrap();
    assert_eq!(out, "show_stats = false\n");

    let out = tabview(&session, &["info"]).unwrap();
    assert!(!out.contains("Most common"));
}

#[test]
fn reset_forgets_table_but_keeps_preferences() {
    let (_dir, session) = loaded("people.csv", PEOPLE);
    tabview(&session, &["prefs", "--show-stats", "false"]).unwrap();

    assert_eq!(tabview(&session, &["reset"]).unwrap(), "Session cleared\n");
    assert!(tabview(&session, &["info"]).is_err());
    assert_eq!(tabview(&session, &["prefs"]).unwrap(), "show_stats = false\n");
}

#[test]
fn failed_load_keeps_previous_table() {
    let (dir, session) = loaded("people.csv", PEOPLE);
    let broken = dir.path().join("broken.xlsx");
    fs::write(&broken, PEOPLE).unwrap();

    assert!(tabview(&session, &["load", broken.to_str().unwrap()]).is_err());

    let out = tabview(&session, &["info"]).unwrap();
    assert!(out.starts_with("File:    people.csv\n"));
}

#[test]
fn oversized_source_is_rejected() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("people.csv");
    fs::write(&source, PEOPLE).unwrap();

    let result = tabview(
        &dir.path().join("s"),
        &["load", source.to_str().unwrap(), "--max-size", "10"],
    );
    assert!(result.is_err());
}

#[test]
fn explicit_delimiter_is_used() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("pipes.csv");
    fs::write(&source, "a|b\n1|2\n").unwrap();

    let out = tabview(
        &dir.path().join("s"),
        &["load", source.to_str().unwrap(), "--delimiter", "|"],
    )
    .unwrap();
    assert_eq!(out, "Loaded 1 row and 2 columns from pipes.csv\n");
}

//! Subcommand implementations.
//!
//! Every command opens the session directory, restores the saved table when
//! it needs one, and writes its report to `out`. Mutating commands save the
//! session again afterwards.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info_span, warn};

use tabview_export::{ExportOptions, ExportScope, export, suggested_file_name};
use tabview_ingest::{IngestOptions, check_source_size, format_for_path, ingest_async, read_source};
use tabview_model::{CellValue, DataFormat, Row, Table};
use tabview_persistence::{FileSessionStore, PersistError};
use tabview_profile::{analyze, analyze_table};
use tabview_store::{PageRequest, PersistStatus, Query, SortSpec, TableStore};

use crate::cli::{
    Command, DeleteArgs, EditArgs, ExportArgs, LoadArgs, PrefsArgs, ShowArgs, StatsArgs,
};
use crate::render::{overview_table, page_footer, plural, rows_table, stats_table};

type Store = TableStore<FileSessionStore>;

pub fn run(command: &Command, session_dir: &Path, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Load(args) => run_load(args, session_dir, out),
        Command::Show(args) => run_show(args, session_dir, out),
        Command::Stats(args) => run_stats(args, session_dir, out),
        Command::Info => run_info(session_dir, out),
        Command::Edit(args) => run_edit(args, session_dir, out),
        Command::Delete(args) => run_delete(args, session_dir, out),
        Command::Dedup => run_dedup(session_dir, out),
        Command::Export(args) => run_export(args, session_dir, out),
        Command::Reset => run_reset(session_dir, out),
        Command::Prefs(args) => run_prefs(args, session_dir, out),
    }
}

pub fn run_load(args: &LoadArgs, session_dir: &Path, out: &mut impl Write) -> Result<()> {
    let path = &args.file;
    let span = info_span!("load", path = %path.display());
    let _guard = span.enter();

    check_source_size(path, args.max_size)?;
    let format = match args.format {
        Some(format) => format.into(),
        None => format_for_path(path)?,
    };
    let bytes = read_source(path)?;

    let mut options = IngestOptions::new();
    if let Some(delimiter) = args.delimiter {
        options = options.with_delimiter(delimiter);
    }

    let spinner = spinner(format!("Parsing {}", path.display()));
    let parsed = parse_in_background(bytes, format, options);
    spinner.finish_and_clear();
    let table = parsed.with_context(|| format!("failed to load {}", path.display()))?;

    let source_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());

    let mut store = Store::new(FileSessionStore::open(session_dir));
    let report = store.load(table, source_name.as_str());
    writeln!(
        out,
        "Loaded {} {} and {} {} from {source_name}",
        report.rows,
        plural(report.rows, "row"),
        report.columns,
        plural(report.columns, "column")
    )?;
    if let PersistStatus::Failed(error) = &report.persist {
        writeln!(out, "warning: {}", error.user_message())?;
    }
    Ok(())
}

pub fn run_show(args: &ShowArgs, session_dir: &Path, out: &mut impl Write) -> Result<()> {
    let store = open_store(session_dir)?;
    require_loaded(&store)?;

    let mut query = Query::new().with_page(PageRequest::new(args.page - 1, args.page_size));
    if let Some(filter) = &args.filter {
        query = query.with_filter(filter.as_str());
    }
    if let Some(column) = &args.sort {
        require_column(&store, column)?;
        query = query.with_sort(if args.desc {
            SortSpec::descending(column.as_str())
        } else {
            SortSpec::ascending(column.as_str())
        });
    }

    let result = store.query(&query);
    if !result.rows.is_empty() {
        writeln!(out, "{}", rows_table(store.columns(), &result.rows))?;
    }
    writeln!(out, "{}", page_footer(&result))?;
    Ok(())
}

pub fn run_stats(args: &StatsArgs, session_dir: &Path, out: &mut impl Write) -> Result<()> {
    let store = open_store(session_dir)?;
    require_loaded(&store)?;
    require_column(&store, &args.column)?;

    let stats = analyze(store.rows(), &args.column);
    if args.json {
        let json = serde_json::to_string_pretty(&stats).context("serialize statistics")?;
        writeln!(out, "{json}")?;
    } else {
        writeln!(out, "{}", stats_table(&args.column, &stats))?;
    }
    Ok(())
}

pub fn run_info(session_dir: &Path, out: &mut impl Write) -> Result<()> {
    let store = open_store(session_dir)?;
    require_loaded(&store)?;
    let preferences = store
        .session()
        .load_preferences()
        .map_err(session_error)?;

    writeln!(out, "File:    {}", store.source_name().unwrap_or_default())?;
    writeln!(out, "Rows:    {}", store.len())?;
    writeln!(out, "Columns: {}", store.columns().len())?;
    if preferences.show_stats && !store.columns().is_empty() {
        writeln!(out, "{}", overview_table(&analyze_table(store.table())))?;
    }
    Ok(())
}

pub fn run_edit(args: &EditArgs, session_dir: &Path, out: &mut impl Write) -> Result<()> {
    let mut store = open_store(session_dir)?;
    require_loaded(&store)?;
    require_column(&store, &args.column)?;
    require_row(&store, args.row)?;

    let value = CellValue::text(args.value.as_str());
    if !store.update_cell(args.row - 1, &args.column, value) {
        bail!("row {} was not changed", args.row);
    }
    persist_or_warn(&mut store, out)?;
    writeln!(out, "Updated row {}, column {}", args.row, args.column)?;
    Ok(())
}

pub fn run_delete(args: &DeleteArgs, session_dir: &Path, out: &mut impl Write) -> Result<()> {
    let mut store = open_store(session_dir)?;
    require_loaded(&store)?;

    let removed = store.delete_rows(args.rows.iter().map(|row| row - 1));
    let skipped = args.rows.len().saturating_sub(removed);
    if removed > 0 {
        persist_or_warn(&mut store, out)?;
    }
    writeln!(out, "Deleted {removed} {}", plural(removed, "row"))?;
    if skipped > 0 {
        writeln!(out, "Skipped {skipped} out-of-range or repeated row numbers")?;
    }
    Ok(())
}

pub fn run_dedup(session_dir: &Path, out: &mut impl Write) -> Result<()> {
    let mut store = open_store(session_dir)?;
    require_loaded(&store)?;

    let removed = store.deduplicate();
    if removed > 0 {
        persist_or_warn(&mut store, out)?;
    }
    writeln!(
        out,
        "Removed {removed} duplicate {}, {} {} left",
        plural(removed, "row"),
        store.len(),
        plural(store.len(), "row")
    )?;
    Ok(())
}

pub fn run_export(args: &ExportArgs, session_dir: &Path, out: &mut impl Write) -> Result<()> {
    let store = open_store(session_dir)?;
    require_loaded(&store)?;

    let scope = if args.rows.is_empty() {
        ExportScope::All
    } else {
        ExportScope::Selected
    };
    let (path, format) = export_target(args, store.source_name(), scope)?;

    let rows: Vec<&Row> = match scope {
        ExportScope::All => store.rows().iter().collect(),
        ExportScope::Selected => {
            let mut selection = store.selection();
            for &row in &args.rows {
                if !selection.select(&store, row - 1) {
                    bail!("row {row} is out of range (the table has {} rows)", store.len());
                }
            }
            store.selected_rows(&selection)
        }
    };

    let mut options = ExportOptions::for_scope(scope);
    if let Some(delimiter) = args.delimiter {
        options = options.with_delimiter(delimiter);
    }

    let count = rows.len();
    let bytes = export(rows, store.columns(), format, &options)
        .with_context(|| format!("failed to export {format}"))?;
    fs::write(&path, &bytes).with_context(|| format!("failed to write {}", path.display()))?;

    writeln!(
        out,
        "Exported {count} {} to {}",
        plural(count, "row"),
        path.display()
    )?;
    Ok(())
}

pub fn run_reset(session_dir: &Path, out: &mut impl Write) -> Result<()> {
    let mut store = Store::new(FileSessionStore::open(session_dir));
    store.clear().map_err(session_error)?;
    writeln!(out, "Session cleared")?;
    Ok(())
}

pub fn run_prefs(args: &PrefsArgs, session_dir: &Path, out: &mut impl Write) -> Result<()> {
    let session = FileSessionStore::open(session_dir);
    let mut preferences = session.load_preferences().map_err(session_error)?;
    if let Some(show_stats) = args.show_stats {
        preferences.show_stats = show_stats;
        session
            .save_preferences(&preferences)
            .map_err(session_error)?;
    }
    writeln!(out, "show_stats = {}", preferences.show_stats)?;
    Ok(())
}

fn open_store(session_dir: &Path) -> Result<Store> {
    let mut store = Store::new(FileSessionStore::open(session_dir));
    store.restore().map_err(session_error)?;
    Ok(store)
}

fn require_loaded(store: &Store) -> Result<()> {
    if store.source_name().is_none() {
        bail!("no table loaded; run `tabview load <FILE>` first");
    }
    Ok(())
}

fn require_column(store: &Store, column: &str) -> Result<()> {
    if !store.columns().contains(column) {
        bail!(
            "unknown column `{column}` (columns: {})",
            store.columns().as_slice().join(", ")
        );
    }
    Ok(())
}

fn require_row(store: &Store, row: usize) -> Result<()> {
    if row > store.len() {
        bail!("row {row} is out of range (the table has {} rows)", store.len());
    }
    Ok(())
}

/// Saves the session after an edit. Running out of quota is a warning; the
/// edit still succeeded for this run.
fn persist_or_warn(store: &mut Store, out: &mut impl Write) -> Result<()> {
    match store.persist() {
        Ok(()) => Ok(()),
        Err(error) if error.is_quota_exceeded() => {
            warn!(error = %error, "session not saved");
            writeln!(out, "warning: {}", error.user_message())?;
            Ok(())
        }
        Err(error) => Err(session_error(error)),
    }
}

fn export_target(
    args: &ExportArgs,
    source_name: Option<&str>,
    scope: ExportScope,
) -> Result<(PathBuf, DataFormat)> {
    let requested = args.format.map(DataFormat::from);
    if args.out.is_dir() {
        let format = requested.unwrap_or(DataFormat::Csv);
        let name = suggested_file_name(source_name, format, scope);
        return Ok((args.out.join(name), format));
    }
    let format = requested
        .or_else(|| DataFormat::from_path(&args.out))
        .ok_or_else(|| {
            anyhow!(
                "cannot tell the export format of {}; pass --format csv or --format xlsx",
                args.out.display()
            )
        })?;
    Ok((args.out.clone(), format))
}

fn parse_in_background(
    bytes: Vec<u8>,
    format: DataFormat,
    options: IngestOptions,
) -> Result<Table> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the parser runtime")?;
    Ok(runtime.block_on(ingest_async(bytes, format, options))?)
}

fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn session_error(error: PersistError) -> anyhow::Error {
    let message = match error.suggestion() {
        Some(hint) => format!("{} {hint}", error.user_message()),
        None => error.user_message(),
    };
    anyhow::Error::new(error).context(message)
}

//! CLI argument definitions for tabview.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tabview_ingest::DEFAULT_MAX_SOURCE_BYTES;
use tabview_model::DataFormat;
use tabview_store::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};

#[derive(Parser)]
#[command(
    name = "tabview",
    version,
    about = "Load, inspect, clean and export tabular data",
    long_about = "Load a CSV or XLSX file, then browse, profile, edit, deduplicate \
                  and export it.\n\n\
                  The loaded table is kept in a session directory between runs, \
                  so every command works on the last loaded file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Directory holding the saved session.
    #[arg(
        long = "session-dir",
        value_name = "DIR",
        env = "TABVIEW_SESSION_DIR",
        default_value = ".tabview",
        global = true
    )]
    pub session_dir: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load a CSV or XLSX file, replacing the current table.
    Load(LoadArgs),

    /// Print one page of the table.
    Show(ShowArgs),

    /// Infer a column's type and summarise its values.
    Stats(StatsArgs),

    /// Summarise the loaded table.
    Info,

    /// Replace one cell.
    Edit(EditArgs),

    /// Delete rows by number.
    Delete(DeleteArgs),

    /// Remove rows identical to an earlier row.
    Dedup,

    /// Write the table, or some of its rows, to a file.
    Export(ExportArgs),

    /// Forget the loaded table.
    Reset,

    /// Show or change display preferences.
    Prefs(PrefsArgs),
}

#[derive(Parser)]
pub struct LoadArgs {
    /// CSV or XLSX file to load.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Source format (default: from the file extension).
    #[arg(long = "format", value_enum)]
    pub format: Option<FormatArg>,

    /// Field delimiter for CSV input (default: detected).
    #[arg(long = "delimiter", value_name = "CHAR", value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// Largest file accepted, in bytes.
    #[arg(long = "max-size", value_name = "BYTES", default_value_t = DEFAULT_MAX_SOURCE_BYTES)]
    pub max_size: u64,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Keep rows where any cell contains this text (case-insensitive).
    #[arg(long = "filter", value_name = "TEXT")]
    pub filter: Option<String>,

    /// Sort by this column.
    #[arg(long = "sort", value_name = "COLUMN")]
    pub sort: Option<String>,

    /// Sort in descending order.
    #[arg(long = "desc", requires = "sort")]
    pub desc: bool,

    /// Page number, starting at 1.
    #[arg(long = "page", value_name = "N", default_value_t = 1, value_parser = parse_positive)]
    pub page: usize,

    /// Rows per page (15, 20, 25, 30, 50 or 100).
    #[arg(
        long = "page-size",
        value_name = "N",
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = parse_page_size
    )]
    pub page_size: usize,
}

#[derive(Parser)]
pub struct StatsArgs {
    /// Column to analyse.
    #[arg(value_name = "COLUMN")]
    pub column: String,

    /// Print the statistics as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct EditArgs {
    /// Row number as shown by `show`.
    #[arg(value_name = "ROW", value_parser = parse_positive)]
    pub row: usize,

    /// Column to change.
    #[arg(value_name = "COLUMN")]
    pub column: String,

    /// New cell text.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,
}

#[derive(Parser)]
pub struct DeleteArgs {
    /// Row numbers as shown by `show`.
    #[arg(value_name = "ROW", required = true, num_args = 1.., value_parser = parse_positive)]
    pub rows: Vec<usize>,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Output file, or a directory to write a suggested file name into.
    #[arg(value_name = "OUT")]
    pub out: PathBuf,

    /// Output format (default: from the file extension).
    #[arg(long = "format", value_enum)]
    pub format: Option<FormatArg>,

    /// Export only these rows.
    #[arg(long = "rows", value_name = "ROW", num_args = 1.., value_parser = parse_positive)]
    pub rows: Vec<usize>,

    /// Field delimiter for CSV output.
    #[arg(long = "delimiter", value_name = "CHAR", value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
}

#[derive(Parser)]
pub struct PrefsArgs {
    /// Show the per-column overview in `info`.
    #[arg(long = "show-stats", value_name = "BOOL")]
    pub show_stats: Option<bool>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Xlsx,
}

impl From<FormatArg> for DataFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => DataFormat::Csv,
            FormatArg::Xlsx => DataFormat::Xlsx,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_positive(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_page_size(value: &str) -> Result<usize, String> {
    let size = value.parse::<usize>().map_err(|e| e.to_string())?;
    if PAGE_SIZE_OPTIONS.contains(&size) {
        Ok(size)
    } else {
        let choices: Vec<String> = PAGE_SIZE_OPTIONS.iter().map(usize::to_string).collect();
        Err(format!("expected one of {}", choices.join(", ")))
    }
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "\\t" | "tab" => Ok(b'\t'),
        _ => match value.as_bytes() {
            [byte] if byte.is_ascii() && !byte.is_ascii_alphanumeric() && *byte != b'"' => {
                Ok(*byte)
            }
            _ => Err("expected a single ASCII punctuation character or `tab`".to_string()),
        },
    }
}

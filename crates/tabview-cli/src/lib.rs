//! Library side of the `tabview` command-line tool.
//!
//! `main.rs` parses [`cli::Cli`], sets up logging and hands the subcommand
//! to [`commands::run`]. Keeping the commands here lets integration tests
//! drive them against a temporary session directory.

pub mod cli;
pub mod commands;
pub mod logging;
mod render;

//! Command-line argument definitions for the statement extractor
//!
//! This module defines the CLI interface using the clap derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the statutory statement extractor
///
/// Extracts premium exhibit and Schedule P loss development tables from
/// annual statement exports saved as XML spreadsheets.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "statement-extractor",
    version,
    about = "Extract premium exhibit and Schedule P data from statutory statement XML spreadsheets",
    long_about = "Reads a directory of XML Spreadsheet 2003 exports of statutory annual statements, \
                  classifies every worksheet, extracts state premium exhibit records and commercial \
                  auto Schedule P loss development records, and writes the combined tables to a \
                  single .xlsx workbook."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Extract all statements into one workbook (main command)
    Extract(ExtractArgs),
    /// Report how each worksheet classifies without extracting
    Classify(ClassifyArgs),
}

/// Arguments for the extract command
#[derive(Debug, Clone, Parser)]
pub struct ExtractArgs {
    /// Directory holding the statement XML files
    ///
    /// If not specified, defaults to ./Inputs
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Directory holding the statement XML files"
    )]
    pub input_path: Option<PathBuf>,

    /// Directory receiving the output workbook
    ///
    /// Created if it doesn't exist. The workbook is named
    /// Combined_Output_<YYYYmmdd_HHMMSS>.xlsx unless --output-file is given.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Directory receiving the output workbook"
    )]
    pub output_path: Option<PathBuf>,

    /// Explicit output workbook path, overriding the timestamped name
    #[arg(
        long = "output-file",
        value_name = "FILE",
        help = "Write the workbook to this exact path"
    )]
    pub output_file: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// <config dir>/statement-extractor/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Number of files processed concurrently
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of parallel workers (defaults to the CPU count)"
    )]
    pub workers: Option<usize>,

    /// Input file extension
    #[arg(
        long = "extension",
        value_name = "EXT",
        help = "Extension of input files (default: xml)"
    )]
    pub extension: Option<String>,

    /// Search subdirectories of the input directory
    #[arg(long = "recursive", help = "Search subdirectories of the input directory")]
    pub recursive: bool,

    /// Extract everything but do not write the workbook
    #[arg(
        long = "dry-run",
        help = "Classify and extract without writing the workbook"
    )]
    pub dry_run: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the classify command
#[derive(Debug, Clone, Parser)]
pub struct ClassifyArgs {
    /// Directory holding the statement XML files
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Directory holding the statement XML files"
    )]
    pub input_path: Option<PathBuf>,

    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    #[arg(
        long = "extension",
        value_name = "EXT",
        help = "Extension of input files (default: xml)"
    )]
    pub extension: Option<String>,

    #[arg(long = "recursive", help = "Search subdirectories of the input directory")]
    pub recursive: bool,

    /// Output format for the report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the classification report"
    )]
    pub output_format: OutputFormat,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress log output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Output format options for the classification report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

/// Map verbosity flags to a level name; `None` leaves the choice to the config
fn log_level_for(verbose: u8, quiet: bool) -> Option<&'static str> {
    if quiet {
        return Some("error");
    }
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

impl ExtractArgs {
    /// Log level requested on the command line, if any
    pub fn get_log_level(&self) -> Option<&'static str> {
        log_level_for(self.verbose, self.quiet)
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ClassifyArgs {
    /// Log level requested on the command line, if any
    pub fn get_log_level(&self) -> Option<&'static str> {
        log_level_for(self.verbose, self.quiet)
    }
}

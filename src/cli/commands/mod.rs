//! Command implementations for the statement extractor CLI
//!
//! Each command lives in its own module; helpers used by more than one of
//! them are in [`shared`].

pub mod classify;
pub mod extract;
pub mod shared;

use crate::Result;
use crate::cli::args::Commands;

/// Dispatch to the handler for a subcommand
///
/// - `extract`: run the extraction pipeline and write the workbook
/// - `classify`: report worksheet classification without extracting
pub async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Extract(extract_args) => extract::run_extract(extract_args).await.map(|_| ()),
        Commands::Classify(classify_args) => {
            classify::run_classify(classify_args).await.map(|_| ())
        }
    }
}

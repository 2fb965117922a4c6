//! Extract command implementation
//!
//! Loads configuration, installs logging, runs the extraction pipeline with a
//! progress bar and prints the run summary.

use super::shared::{
    create_progress_bar, is_critical_error, load_configuration, print_summary, resolve_log_level,
    setup_logging,
};
use crate::app::pipeline::{ExtractionSummary, run_extraction};
use crate::Result;
use crate::cli::args::ExtractArgs;
use tracing::{debug, error, info};

/// Extract command runner
///
/// 1. Load layered configuration and apply command line overrides
/// 2. Set up logging
/// 3. Run the pipeline with progress reporting
/// 4. Print the summary
pub async fn run_extract(args: ExtractArgs) -> Result<ExtractionSummary> {
    let config = load_configuration(&args)?;

    let level = resolve_log_level(args.get_log_level(), &config);
    setup_logging(&level, config.logging.quiet)?;

    info!("Starting statement extraction");
    debug!("Command line arguments: {:?}", args);
    debug!("Loaded configuration: {:?}", config);

    let show_progress = args.show_progress() && !config.logging.quiet;
    let progress = show_progress.then(|| create_progress_bar(0, "Extracting statements"));

    let result = run_extraction(&config, progress.as_ref()).await;
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }
    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            if is_critical_error(&e) {
                error!("Extraction aborted: {}", e);
            }
            return Err(e);
        }
    };

    if !config.logging.quiet {
        print_summary(&summary);
    }

    Ok(summary)
}

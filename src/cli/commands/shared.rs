//! Shared components for CLI commands
//!
//! Logging setup, configuration loading, progress bars and summary output
//! used by more than one command.

use crate::app::pipeline::ExtractionSummary;
use crate::cli::args::{ClassifyArgs, ExtractArgs};
use crate::config::Config;
use crate::constants::{premium_table, schedule_table};
use crate::{Error, Result};
use colored::*;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::{debug, info};

/// Level used when neither the command line nor the config file sets one
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Pick the effective log level: command line, then config file, then the default
///
/// Quiet mode from the config file shows errors only.
pub fn resolve_log_level(cli_level: Option<&str>, config: &Config) -> String {
    if config.logging.quiet {
        return "error".to_string();
    }
    cli_level
        .map(str::to_string)
        .or_else(|| config.logging.level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Filter directive for a level: the crate at `level`, dependencies at warn
pub fn log_filter_directive(level: &str) -> String {
    format!("warn,statement_extractor={}", level)
}

/// Install the global tracing subscriber, writing to stderr
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn setup_logging(level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter_directive(level)));

    if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .map_err(|e| Error::configuration(format!("Failed to install logger: {}", e)))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| Error::configuration(format!("Failed to install logger: {}", e)))?;
    }

    debug!("Logging initialized at level: {}", level);
    Ok(())
}

/// Load configuration layers and apply extract command overrides
pub fn load_configuration(args: &ExtractArgs) -> Result<Config> {
    let mut config = Config::load(args.config_file.as_deref())?;
    apply_cli_overrides(&mut config, args);
    config.validate()?;
    Ok(config)
}

/// Load configuration layers and apply classify command overrides
pub fn load_classify_configuration(args: &ClassifyArgs) -> Result<Config> {
    let mut config = Config::load(args.config_file.as_deref())?;
    apply_input_overrides(
        &mut config,
        args.input_path.as_deref(),
        args.extension.as_deref(),
        args.recursive,
    );
    config.logging.quiet |= args.quiet;
    config.validate()?;
    Ok(config)
}

/// Apply extract command flags on top of the loaded configuration
pub fn apply_cli_overrides(config: &mut Config, args: &ExtractArgs) {
    apply_input_overrides(
        config,
        args.input_path.as_deref(),
        args.extension.as_deref(),
        args.recursive,
    );

    if let Some(output_path) = &args.output_path {
        config.processing.output_path = output_path.clone();
    }
    if let Some(output_file) = &args.output_file {
        config.processing.output_file = Some(output_file.clone());
    }
    if let Some(workers) = args.workers {
        config.performance.workers = workers;
    }
    config.processing.dry_run |= args.dry_run;
    config.logging.quiet |= args.quiet;
}

fn apply_input_overrides(
    config: &mut Config,
    input_path: Option<&Path>,
    extension: Option<&str>,
    recursive: bool,
) {
    if let Some(input_path) = input_path {
        config.processing.input_path = input_path.to_path_buf();
    }
    if let Some(extension) = extension {
        config.processing.file_extension = extension.trim_start_matches('.').to_string();
    }
    config.processing.recursive |= recursive;
}

/// Check if an error is critical enough to stop the whole run
pub fn is_critical_error(error: &Error) -> bool {
    matches!(
        error,
        Error::Configuration { .. }
            | Error::ProcessingInterrupted { .. }
            | Error::WorkbookWriting { .. }
    )
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    match ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} [{per_sec}] ETA: {eta}",
    ) {
        Ok(style) => pb.set_style(style.progress_chars("#>-")),
        Err(e) => debug!("Using default progress style: {}", e),
    }
    pb.set_message(message.to_string());
    pb
}

/// Human-readable run summary, one line per entry
pub fn format_summary(summary: &ExtractionSummary) -> Vec<String> {
    let mut lines = vec![format!("{}", "Extraction Summary".bright_green().bold())];

    let mut push = |label: &str, value: String| {
        lines.push(format!("  {} {}", label.bright_cyan(), value.bright_white()));
    };
    push("Files processed:", summary.files_processed.to_string());
    push(
        "Worksheets read:",
        format!("{} ({} skipped)", summary.worksheets, summary.worksheets_skipped),
    );
    push(
        &format!("{}:", premium_table::SHEET_NAME),
        summary.premium_records.to_string(),
    );
    push(
        &format!("{}:", schedule_table::SHEET_NAME),
        summary.schedule_records.to_string(),
    );
    if summary.duplicates_removed > 0 {
        push("Duplicates removed:", summary.duplicates_removed.to_string());
    }
    push("Time elapsed:", HumanDuration(summary.elapsed).to_string());

    if summary.files_failed > 0 {
        lines.push(format!(
            "  {} {}",
            "Files failed:".bright_red(),
            summary.files_failed.to_string().bright_red().bold()
        ));
    }
    if summary.total_records() == 0 {
        lines.push(format!("  {}", "No records were extracted".yellow().bold()));
    }

    match (&summary.output_file, summary.dry_run) {
        (Some(path), false) => lines.push(format!(
            "  {} {}",
            "Output:".bright_cyan(),
            path.display().to_string().bright_white().bold()
        )),
        (Some(path), true) => lines.push(format!(
            "  {} {}",
            "Dry run, would write:".yellow(),
            path.display()
        )),
        (None, _) => lines.push(format!("  {}", "No workbook written".yellow())),
    }

    lines
}

/// Print the run summary to stdout
pub fn print_summary(summary: &ExtractionSummary) {
    info!("Generating final report");
    println!();
    for line in format_summary(summary) {
        println!("{}", line);
    }
    println!();
}

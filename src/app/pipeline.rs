//! Batch extraction pipeline
//!
//! Discovers input files, extracts each one on the blocking thread pool with
//! bounded concurrency, merges the results in sorted file order, aggregates
//! them and writes the output workbook.
//!
//! A file is the unit of fault containment: when reading or parsing fails the
//! error is logged, the file is counted as failed and none of its records are
//! merged. The run itself carries on with the remaining files.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Local;
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::app::models::{PremiumRecord, ScheduleRecord};
use crate::app::services::aggregator::aggregate;
use crate::app::services::record_extractor::{DocumentExtraction, extract_document};
use crate::app::services::spreadsheet_xml::read_document;
use crate::app::services::workbook_writer::{timestamped_output_path, write_workbook};
use crate::config::{Config, ProcessingConfig};
use crate::{Error, Result};

/// Outcome of one extraction run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionSummary {
    pub files_found: usize,
    pub files_processed: usize,
    pub files_failed: usize,
    pub worksheets: usize,
    pub worksheets_skipped: usize,
    pub premium_records: usize,
    pub schedule_records: usize,
    pub duplicates_removed: usize,
    /// Workbook path; set in dry runs too, although nothing is written
    pub output_file: Option<PathBuf>,
    pub dry_run: bool,
    pub elapsed: Duration,
}

impl ExtractionSummary {
    pub fn total_records(&self) -> usize {
        self.premium_records + self.schedule_records
    }

    /// Whether the workbook was actually written
    pub fn wrote_output(&self) -> bool {
        self.output_file.is_some() && !self.dry_run
    }
}

/// Records gathered from successfully processed files, in merge order
#[derive(Debug, Default)]
struct Accumulator {
    premium_records: Vec<PremiumRecord>,
    schedule_records: Vec<ScheduleRecord>,
    files_processed: usize,
    files_failed: usize,
    worksheets: usize,
    worksheets_skipped: usize,
}

impl Accumulator {
    fn merge(&mut self, path: &Path, result: Result<DocumentExtraction>) {
        match result {
            Ok(extraction) => {
                debug!(
                    file = %path.display(),
                    premium = extraction.premium_records.len(),
                    schedule = extraction.schedule_records.len(),
                    "Merged file results"
                );
                self.files_processed += 1;
                self.worksheets += extraction.worksheets;
                self.worksheets_skipped += extraction.worksheets_skipped;
                self.premium_records.extend(extraction.premium_records);
                self.schedule_records.extend(extraction.schedule_records);
            }
            Err(e) => {
                error!(file = %path.display(), "Failed to process file: {:#}", e);
                self.files_failed += 1;
            }
        }
    }
}

/// Run a complete extraction over the configured input directory
///
/// The progress bar, when given, advances once per file.
pub async fn run_extraction(
    config: &Config,
    progress: Option<&ProgressBar>,
) -> Result<ExtractionSummary> {
    let start = Instant::now();
    let processing = &config.processing;

    let files = discover_input_files(processing)?;
    let mut summary = ExtractionSummary {
        files_found: files.len(),
        dry_run: processing.dry_run,
        ..ExtractionSummary::default()
    };

    if files.is_empty() {
        error!(
            input = %processing.input_path.display(),
            extension = %processing.file_extension,
            "No input files found"
        );
        summary.elapsed = start.elapsed();
        return Ok(summary);
    }

    let workers = config.performance.workers.max(1);
    info!(files = files.len(), workers, "Found input files to process");
    if let Some(pb) = progress {
        pb.set_length(files.len() as u64);
    }

    // `buffered` yields in input order, so merge order is the sorted file order
    let accumulator = stream::iter(files)
        .map(|path| async move {
            let task_path = path.clone();
            let result = match tokio::task::spawn_blocking(move || process_file(&task_path)).await {
                Ok(result) => result,
                Err(e) => Err(Error::file_processing(
                    path.display().to_string(),
                    format!("Extraction task failed: {}", e),
                )),
            };
            (path, result)
        })
        .buffered(workers)
        .fold(Accumulator::default(), |mut acc, (path, result)| async move {
            if let Some(pb) = progress {
                if let Some(name) = path.file_name() {
                    pb.set_message(name.to_string_lossy().to_string());
                }
                pb.inc(1);
            }
            acc.merge(&path, result);
            acc
        })
        .await;

    summary.files_processed = accumulator.files_processed;
    summary.files_failed = accumulator.files_failed;
    summary.worksheets = accumulator.worksheets;
    summary.worksheets_skipped = accumulator.worksheets_skipped;

    let tables = aggregate(accumulator.premium_records, accumulator.schedule_records)?;
    summary.premium_records = tables.premium.height();
    summary.schedule_records = tables.schedule.height();
    summary.duplicates_removed = tables.duplicates_removed;

    if tables.premium.height() == 0 {
        warn!("No premium exhibit records were extracted");
    }
    if tables.schedule.height() == 0 {
        warn!("No Schedule P records were extracted");
    }

    let output_file = resolve_output_file(processing);
    if processing.dry_run {
        info!(path = %output_file.display(), "Dry run, workbook not written");
    } else {
        let target = output_file.clone();
        tokio::task::spawn_blocking(move || write_workbook(&target, &tables.named_frames()))
            .await
            .map_err(|e| {
                Error::file_processing(
                    output_file.display().to_string(),
                    format!("Workbook task failed: {}", e),
                )
            })??;
    }
    summary.output_file = Some(output_file);
    summary.elapsed = start.elapsed();

    info!(
        files_processed = summary.files_processed,
        files_failed = summary.files_failed,
        records = summary.total_records(),
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "Extraction complete"
    );

    Ok(summary)
}

/// Read one input file and extract all of its worksheets
pub fn process_file(path: &Path) -> Result<DocumentExtraction> {
    let file = path.display().to_string();
    info!(file = %file, "Processing file");

    let document = read_document(path)?;
    Ok(extract_document(&document, &file))
}

/// Input files matching the configured extension, sorted by path
pub fn discover_input_files(processing: &ProcessingConfig) -> Result<Vec<PathBuf>> {
    let pattern = discovery_pattern(processing);
    debug!(pattern = %pattern, "Discovering input files");

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!(
                path = %e.path().display(),
                "Skipping unreadable path: {}",
                e.error()
            ),
        }
    }

    files.sort();
    Ok(files)
}

fn discovery_pattern(processing: &ProcessingConfig) -> String {
    let dir = glob::Pattern::escape(&processing.input_path.to_string_lossy());
    let extension = processing.file_extension.trim_start_matches('.');

    if processing.recursive {
        format!("{}/**/*.{}", dir, extension)
    } else {
        format!("{}/*.{}", dir, extension)
    }
}

/// Explicit output file, or a timestamped name in the output directory
pub fn resolve_output_file(processing: &ProcessingConfig) -> PathBuf {
    processing
        .output_file
        .clone()
        .unwrap_or_else(|| timestamped_output_path(&processing.output_path, Local::now()))
}

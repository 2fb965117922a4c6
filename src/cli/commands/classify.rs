//! Classify command implementation
//!
//! Reports, for every input file and worksheet, how the worksheet classifies
//! and whether it would be extracted. Nothing is extracted or written.

use super::shared::{load_classify_configuration, resolve_log_level, setup_logging};
use crate::app::pipeline::discover_input_files;
use crate::app::services::spreadsheet_xml::read_document;
use crate::app::services::worksheet_classifier::{WorksheetReport, describe_worksheet};
use crate::cli::args::{ClassifyArgs, OutputFormat};
use crate::{Error, Result};
use anyhow::Context;
use colored::*;
use serde::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Classification of every worksheet in one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    pub worksheets: Vec<WorksheetReport>,
    /// Why the file could not be read, if it could not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub fn extracted_count(&self) -> usize {
        self.worksheets.iter().filter(|w| w.extracted).count()
    }
}

/// Classify command runner
pub async fn run_classify(args: ClassifyArgs) -> Result<Vec<FileReport>> {
    let config = load_classify_configuration(&args)?;
    let level = resolve_log_level(args.get_log_level(), &config);
    setup_logging(&level, config.logging.quiet)?;

    let files = discover_input_files(&config.processing)?;
    if files.is_empty() {
        warn!(
            input = %config.processing.input_path.display(),
            "No input files found"
        );
    }
    info!(files = files.len(), "Classifying input files");

    let reports = tokio::task::spawn_blocking(move || classify_files(&files))
        .await
        .map_err(|e| Error::file_processing("classification", format!("Task failed: {}", e)))?;

    let rendered = match args.output_format {
        OutputFormat::Human => render_human(&reports),
        OutputFormat::Json => render_json(&reports)
            .map_err(|e| Error::file_processing("classification report", format!("{:#}", e)))?,
    };
    print!("{}", rendered);

    Ok(reports)
}

/// Classify all files in order; a file that cannot be read is reported, not fatal
pub fn classify_files(paths: &[PathBuf]) -> Vec<FileReport> {
    paths.iter().map(|path| classify_file(path)).collect()
}

/// Classify every worksheet of one file
pub fn classify_file(path: &Path) -> FileReport {
    let file = path.display().to_string();
    let document = read_document(path).with_context(|| format!("Failed to read {}", file));

    match document {
        Ok(document) => FileReport {
            file,
            worksheets: document.worksheets.iter().map(describe_worksheet).collect(),
            error: None,
        },
        Err(e) => {
            warn!(file = %file, "Could not classify file: {:#}", e);
            FileReport {
                file,
                worksheets: Vec::new(),
                error: Some(format!("{:#}", e)),
            }
        }
    }
}

/// Plain text report, one block per file
pub fn render_human(reports: &[FileReport]) -> String {
    let mut out = String::new();

    for report in reports {
        let _ = writeln!(out, "{}", report.file.bright_white().bold());

        if let Some(error) = &report.error {
            let _ = writeln!(out, "  {} {}", "error:".bright_red().bold(), error);
            continue;
        }

        for sheet in &report.worksheets {
            let kind = match sheet.schedule_lob {
                Some(lob) => format!("{} / {}", sheet.report_kind, lob),
                None => sheet.report_kind.to_string(),
            };
            let status = if sheet.extracted {
                "extract".bright_green()
            } else {
                "skip".yellow()
            };
            let _ = write!(out, "  {:<24} {:<28} {}", sheet.sheet, kind, status);
            if let Some(title) = sheet.title.as_deref().filter(|t| !t.trim().is_empty()) {
                let _ = write!(out, "  [{}]", title.trim());
            }
            out.push('\n');
        }

        let _ = writeln!(
            out,
            "  {} of {} worksheets would be extracted",
            report.extracted_count(),
            report.worksheets.len()
        );
    }

    out
}

/// Pretty JSON report
pub fn render_json(reports: &[FileReport]) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(reports)
        .context("Failed to serialize classification report")?;
    json.push('\n');
    Ok(json)
}

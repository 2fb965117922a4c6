//! Record extraction from classified worksheets
//!
//! Each worksheet is classified, its figure columns are located and zero or
//! more typed records are assembled. A worksheet that cannot be extracted is
//! not an error: the extractor returns a [`WorksheetSkip`] describing why,
//! which callers log and count before moving on.
//!
//! ## Architecture
//!
//! - [`company_header`] - year, company and NAIC code from the page header
//! - [`premium_exhibit`] - state page records, one per line of business code
//! - [`loss_schedule`] - Schedule P Part 1 records, one per accident year

pub mod company_header;
pub mod loss_schedule;
pub mod premium_exhibit;

#[cfg(test)]
mod tests;

use tracing::{debug, info};

use crate::app::models::{PremiumRecord, ReportKind, ScheduleLob, ScheduleRecord};
use crate::app::services::spreadsheet_xml::{Document, Worksheet};
use crate::app::services::worksheet_classifier::{classify_report_type, classify_schedule_lob};

pub use loss_schedule::extract_loss_schedule;
pub use premium_exhibit::extract_premium_exhibit;

/// Why a worksheet produced no records
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorksheetSkip {
    #[error("no known report marker")]
    UnknownLayout,

    #[error("Schedule P line '{0}' is not extracted")]
    UnsupportedScheduleLine(ScheduleLob),

    #[error("page header does not name a year and company")]
    MissingCompanyHeader,

    #[error("header columns could not be resolved")]
    UnresolvedHeaders,

    #[error("found {found} 'Prior' rows, 3 required")]
    MissingPriorAnchors { found: usize },
}

/// Records produced by one worksheet
#[derive(Debug, Clone, PartialEq)]
pub enum WorksheetRecords {
    Premium(Vec<PremiumRecord>),
    Schedule(Vec<ScheduleRecord>),
}

impl WorksheetRecords {
    pub fn len(&self) -> usize {
        match self {
            WorksheetRecords::Premium(records) => records.len(),
            WorksheetRecords::Schedule(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify a worksheet and extract its records
pub fn extract_worksheet(sheet: &Worksheet) -> Result<WorksheetRecords, WorksheetSkip> {
    match classify_report_type(&sheet.rows) {
        ReportKind::PremiumExhibit => extract_premium_exhibit(sheet).map(WorksheetRecords::Premium),
        ReportKind::LossSchedule => {
            let lob = classify_schedule_lob(sheet);
            let line = lob
                .liability_type()
                .ok_or(WorksheetSkip::UnsupportedScheduleLine(lob))?;
            extract_loss_schedule(sheet, line).map(WorksheetRecords::Schedule)
        }
        ReportKind::Unknown => Err(WorksheetSkip::UnknownLayout),
    }
}

/// Records and skip counts for one document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentExtraction {
    pub premium_records: Vec<PremiumRecord>,
    pub schedule_records: Vec<ScheduleRecord>,
    pub worksheets: usize,
    pub worksheets_skipped: usize,
}

/// Extract every worksheet of a document, in document order
pub fn extract_document(document: &Document, file: &str) -> DocumentExtraction {
    let mut extraction = DocumentExtraction {
        worksheets: document.worksheets.len(),
        ..DocumentExtraction::default()
    };

    for sheet in &document.worksheets {
        match extract_worksheet(sheet) {
            Ok(WorksheetRecords::Premium(records)) => {
                debug!(file, sheet = %sheet.name, records = records.len(), "Extracted premium exhibit");
                extraction.premium_records.extend(records);
            }
            Ok(WorksheetRecords::Schedule(records)) => {
                debug!(file, sheet = %sheet.name, records = records.len(), "Extracted Schedule P page");
                extraction.schedule_records.extend(records);
            }
            Err(WorksheetSkip::UnknownLayout) => {
                debug!(file, sheet = %sheet.name, "Skipping worksheet with unknown layout");
                extraction.worksheets_skipped += 1;
            }
            Err(skip) => {
                info!(file, sheet = %sheet.name, reason = %skip, "Skipping worksheet");
                extraction.worksheets_skipped += 1;
            }
        }
    }

    extraction
}

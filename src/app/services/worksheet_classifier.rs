//! Worksheet classification
//!
//! Both classifiers are ordered rule lists evaluated top to bottom; the first
//! rule whose phrase matches decides the outcome. Rule order is the tie-break,
//! so the lists below must not be reordered.

use serde::Serialize;

use crate::app::models::{ReportKind, ScheduleLob};
use crate::app::services::spreadsheet_xml::{Row, Worksheet};
use crate::constants::{
    CLASSIFY_SCAN_COLUMNS, CLASSIFY_SCAN_ROWS, LOSS_SCHEDULE_MARKER, PREMIUM_EXHIBIT_MARKER,
    schedule_lob,
};

/// A phrase and the outcome it selects when found in the uppercased subject
#[derive(Debug, Clone, Copy)]
pub struct Rule<T> {
    pub phrase: &'static str,
    pub outcome: T,
}

/// Report markers, tested in this order within each cell
pub const REPORT_RULES: &[Rule<ReportKind>] = &[
    Rule {
        phrase: PREMIUM_EXHIBIT_MARKER,
        outcome: ReportKind::PremiumExhibit,
    },
    Rule {
        phrase: LOSS_SCHEDULE_MARKER,
        outcome: ReportKind::LossSchedule,
    },
];

/// Schedule title rules, applied to the title cell
pub const SCHEDULE_TITLE_RULES: &[Rule<ScheduleLob>] = &[
    Rule {
        phrase: schedule_lob::TITLE_AUTO_LIABILITY,
        outcome: ScheduleLob::AutoLiability,
    },
    Rule {
        phrase: schedule_lob::TITLE_AUTO_PHYSICAL_DAMAGE,
        outcome: ScheduleLob::AutoPhysicalDamage,
    },
    Rule {
        phrase: schedule_lob::TITLE_SUMMARY,
        outcome: ScheduleLob::Summary,
    },
];

/// Worksheet name rules, used only when the title decided nothing
pub const SCHEDULE_NAME_RULES: &[Rule<ScheduleLob>] = &[
    Rule {
        phrase: schedule_lob::SHEET_AUTO_LIABILITY,
        outcome: ScheduleLob::AutoLiability,
    },
    Rule {
        phrase: schedule_lob::SHEET_AUTO_PHYSICAL_DAMAGE,
        outcome: ScheduleLob::AutoPhysicalDamage,
    },
    Rule {
        phrase: schedule_lob::SHEET_SUMMARY_PAGE,
        outcome: ScheduleLob::Summary,
    },
];

/// First outcome whose phrase occurs in `text`, compared case-insensitively
pub fn first_match<T: Copy>(rules: &[Rule<T>], text: &str) -> Option<T> {
    let upper = text.to_uppercase();
    rules
        .iter()
        .find(|rule| upper.contains(rule.phrase))
        .map(|rule| rule.outcome)
}

/// Determine the report family from the leading rows of a worksheet
///
/// Cells are scanned row-major over the first rows and the leftmost columns.
pub fn classify_report_type(rows: &[Row]) -> ReportKind {
    rows.iter()
        .take(CLASSIFY_SCAN_ROWS)
        .flat_map(|row| CLASSIFY_SCAN_COLUMNS.filter_map(move |column| row.get(column)))
        .find_map(|text| first_match(REPORT_RULES, text))
        .unwrap_or(ReportKind::Unknown)
}

/// Title text that decides the schedule line of business, if present
pub fn schedule_title(sheet: &Worksheet) -> Option<&str> {
    sheet.cell(schedule_lob::TITLE_ROW - 1, schedule_lob::TITLE_COLUMN)
}

/// Determine the line of business of a Schedule P worksheet
///
/// The title row is authoritative; the worksheet name is only consulted
/// when the title matches no rule.
pub fn classify_schedule_lob(sheet: &Worksheet) -> ScheduleLob {
    schedule_title(sheet)
        .and_then(|title| first_match(SCHEDULE_TITLE_RULES, title))
        .or_else(|| first_match(SCHEDULE_NAME_RULES, &sheet.name))
        .unwrap_or(ScheduleLob::Unknown)
}

/// How a worksheet classifies and whether it would be extracted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorksheetReport {
    pub sheet: String,
    pub report_kind: ReportKind,
    /// Line of business, for Schedule P worksheets only
    pub schedule_lob: Option<ScheduleLob>,
    /// Title text consulted for the line of business
    pub title: Option<String>,
    pub extracted: bool,
}

/// Classify a worksheet without extracting it
pub fn describe_worksheet(sheet: &Worksheet) -> WorksheetReport {
    let report_kind = classify_report_type(&sheet.rows);
    let schedule_lob = match report_kind {
        ReportKind::LossSchedule => Some(classify_schedule_lob(sheet)),
        ReportKind::PremiumExhibit | ReportKind::Unknown => None,
    };
    let extracted = match report_kind {
        ReportKind::PremiumExhibit => true,
        ReportKind::LossSchedule => schedule_lob.is_some_and(|lob| lob.is_extracted()),
        ReportKind::Unknown => false,
    };

    WorksheetReport {
        sheet: sheet.name.clone(),
        report_kind,
        schedule_lob,
        title: schedule_title(sheet).map(str::to_string),
        extracted,
    }
}

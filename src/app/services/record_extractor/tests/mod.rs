//! Tests for record extraction
//!
//! Worksheets are built through the spreadsheet XML test builders so that
//! extraction always runs against carry-forward resolved rows.

use crate::app::services::spreadsheet_xml::tests::{SheetXml, TestCell, at, c};


/// Schedule P page with custom rows below the standard header rows
///
/// Header rows: company header, Part 1 marker, title, and the column number
/// row placing earned premium in column 4, claims in 10 and losses in 12.
pub fn schedule_page(title: &str, header: &str) -> SheetXml {
    SheetXml::new("PG35")
        .row(vec![at(2, header)])
        .row(vec![c("SCHEDULE P - PART 1 - SUMMARY OF LOSS DEVELOPMENT")])
        .row(vec![c(title)])
        .row(vec![at(4, "1"), at(10, "25"), at(12, "26")])
}

/// Year label row with a single figure; an empty label leaves column 3 out
pub fn year_row(label: &str, column: u32, amount: &str) -> Vec<TestCell> {
    if label.is_empty() {
        vec![at(column, amount)]
    } else {
        vec![at(3, label), at(column, amount)]
    }
}

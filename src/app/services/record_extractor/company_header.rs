//! Company identity from the page header text

use std::sync::LazyLock;

use regex::Regex;

use crate::app::models::CompanyHeader;
use crate::app::services::spreadsheet_xml::Worksheet;
use crate::constants::{COMPANY_HEADER_COLUMN, NAIC_NOT_AVAILABLE};

// "<year> OF THE <company> (NAIC #<code>)", the NAIC suffix being optional
static COMPANY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{4}) OF THE (.*?) ?(?:\(NAIC #(\S+)\))?$").expect("valid company header regex")
});

/// Parse the header text of a statement page
pub fn parse_company_header(text: &str) -> Option<CompanyHeader> {
    let captures = COMPANY_HEADER.captures(text)?;

    let year = captures.get(1)?.as_str().parse().ok()?;
    let company = captures.get(2)?.as_str().trim().to_string();
    let naic = captures
        .get(3)
        .map(|m| m.as_str().trim_matches(')').to_string())
        .unwrap_or_else(|| NAIC_NOT_AVAILABLE.to_string());

    Some(CompanyHeader {
        year,
        company,
        naic,
    })
}

/// Company header of a worksheet, read from the first row
pub fn worksheet_company_header(sheet: &Worksheet) -> Option<CompanyHeader> {
    sheet
        .cell(0, COMPANY_HEADER_COLUMN)
        .and_then(parse_company_header)
}

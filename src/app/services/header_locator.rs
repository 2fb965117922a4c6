//! Header column resolution
//!
//! Statement pages print a row of column numbers above the figures. The
//! physical position of those numbers varies between filings, so each
//! worksheet's numbered row is found by scanning content and the column
//! numbers are translated to resolved (carry-forward) column indices.

use std::collections::HashMap;

use crate::app::services::spreadsheet_xml::Row;
use crate::constants::{premium_header, schedule_header};

/// Resolved figure columns of a premium exhibit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PremiumHeaderMap {
    pub written_premium: u32,
    pub earned_premium: u32,
    pub losses_incurred: u32,
    pub defense_cost: u32,
}

/// Resolved figure columns of a Schedule P Part 1 page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleHeaderMap {
    pub earned_premium: u32,
    pub losses_incurred: u32,
    pub claim_count: u32,
}

/// Locate the premium exhibit's numbered header row and map its codes
///
/// The anchor row is the first of the leading rows with "1" and "2" in the
/// anchor columns. Every integer cell on that row is recorded against its
/// resolved column; a repeated number keeps its last position. Returns
/// `None` when there is no anchor row or a required code is absent.
pub fn locate_premium_header(rows: &[Row]) -> Option<PremiumHeaderMap> {
    let anchor = rows.iter().take(premium_header::SCAN_ROWS).find(|row| {
        row.get(premium_header::FIRST_ANCHOR_COLUMN) == Some(premium_header::FIRST_ANCHOR_TEXT)
            && row.get(premium_header::SECOND_ANCHOR_COLUMN)
                == Some(premium_header::SECOND_ANCHOR_TEXT)
    })?;

    let mut columns: HashMap<u32, u32> = HashMap::new();
    for (index, text) in anchor.texts() {
        if let Some(code) = parse_column_number(text) {
            columns.insert(code, index);
        }
    }

    Some(PremiumHeaderMap {
        written_premium: *columns.get(&premium_header::WRITTEN_PREMIUM_CODE)?,
        earned_premium: *columns.get(&premium_header::EARNED_PREMIUM_CODE)?,
        losses_incurred: *columns.get(&premium_header::LOSSES_INCURRED_CODE)?,
        defense_cost: *columns.get(&premium_header::DEFENSE_COST_CODE)?,
    })
}

/// Locate the Schedule P column number tokens
///
/// Rows are scanned left to right; each token keeps the first column it is
/// seen in. Scanning stops once all tokens are found. Returns `None` when
/// any token is missing from the leading rows.
pub fn locate_schedule_header(rows: &[Row]) -> Option<ScheduleHeaderMap> {
    let targets = [
        schedule_header::EARNED_PREMIUM_TOKEN,
        schedule_header::CLAIM_COUNT_TOKEN,
        schedule_header::LOSSES_INCURRED_TOKEN,
    ];
    let mut found: [Option<u32>; 3] = [None; 3];

    'rows: for row in rows.iter().take(schedule_header::SCAN_ROWS) {
        for (index, text) in row.texts() {
            if let Some(slot) = targets.iter().position(|target| *target == text) {
                found[slot].get_or_insert(index);
            }
        }
        if found.iter().all(Option::is_some) {
            break 'rows;
        }
    }

    let [earned_premium, claim_count, losses_incurred] = found;
    Some(ScheduleHeaderMap {
        earned_premium: earned_premium?,
        losses_incurred: losses_incurred?,
        claim_count: claim_count?,
    })
}

/// A column number token: ASCII digits only, fitting in 32 bits
fn parse_column_number(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

//! Schedule P Part 1 loss development extraction
//!
//! A Part 1 page prints three stacked blocks of accident years: earned
//! premium, reported claim counts and losses incurred. Each block starts at a
//! "Prior" row and runs for twelve rows, so the same offset into each block
//! describes the same accident year.

use super::WorksheetSkip;
use super::company_header::worksheet_company_header;
use crate::app::models::{LiabilityType, ScheduleRecord};
use crate::app::services::header_locator::locate_schedule_header;
use crate::app::services::numeric_normalizer::normalize;
use crate::app::services::spreadsheet_xml::{Row, Worksheet};
use crate::constants::loss_schedule;

/// Extract one record per accident year label
pub fn extract_loss_schedule(
    sheet: &Worksheet,
    line_of_business: LiabilityType,
) -> Result<Vec<ScheduleRecord>, WorksheetSkip> {
    let header = worksheet_company_header(sheet).ok_or(WorksheetSkip::MissingCompanyHeader)?;
    let columns = locate_schedule_header(&sheet.rows).ok_or(WorksheetSkip::UnresolvedHeaders)?;

    let anchors = find_prior_anchors(&sheet.rows);
    if anchors.len() < loss_schedule::REQUIRED_ANCHORS {
        return Err(WorksheetSkip::MissingPriorAnchors {
            found: anchors.len(),
        });
    }
    let (premium_start, claims_start, losses_start) = (anchors[0], anchors[1], anchors[2]);

    let mut records = Vec::new();
    for offset in 0..loss_schedule::BLOCK_ROWS {
        let (Some(premium_row), Some(claims_row), Some(losses_row)) = (
            sheet.rows.get(premium_start + offset),
            sheet.rows.get(claims_start + offset),
            sheet.rows.get(losses_start + offset),
        ) else {
            break;
        };

        let Some(label) = premium_row.get(loss_schedule::YEAR_LABEL_COLUMN) else {
            continue;
        };

        records.push(ScheduleRecord {
            report_year: header.year,
            company: header.company.clone(),
            naic: header.naic.clone(),
            line_of_business,
            development_year: label.to_string(),
            earned_premium: normalize(premium_row.get(columns.earned_premium)),
            losses_incurred: normalize(losses_row.get(columns.losses_incurred)),
            claim_count: normalize(claims_row.get(columns.claim_count)),
        });
    }

    Ok(records)
}

/// Row positions whose year label contains "Prior", in document order
pub fn find_prior_anchors(rows: &[Row]) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            row.get(loss_schedule::YEAR_LABEL_COLUMN)
                .is_some_and(|label| label.contains(loss_schedule::PRIOR_LABEL))
        })
        .map(|(position, _)| position)
        .collect()
}

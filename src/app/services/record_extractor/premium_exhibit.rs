//! Premium exhibit (state page) extraction

use tracing::debug;

use super::WorksheetSkip;
use super::company_header::worksheet_company_header;
use crate::app::models::{LobCode, PremiumRecord};
use crate::app::services::header_locator::{PremiumHeaderMap, locate_premium_header};
use crate::app::services::numeric_normalizer::normalize;
use crate::app::services::spreadsheet_xml::{Row, Worksheet};
use crate::constants::premium_exhibit;

/// Extract one record per recognised line of business code
pub fn extract_premium_exhibit(sheet: &Worksheet) -> Result<Vec<PremiumRecord>, WorksheetSkip> {
    let header = worksheet_company_header(sheet).ok_or(WorksheetSkip::MissingCompanyHeader)?;
    let state = locate_state(&sheet.rows);
    let columns = locate_premium_header(&sheet.rows).ok_or(WorksheetSkip::UnresolvedHeaders)?;

    let mut records = Vec::new();
    for (position, row) in sheet.rows.iter().enumerate() {
        let Some(lob_code) = row.get(premium_exhibit::LOB_COLUMN).and_then(parse_lob_code) else {
            continue;
        };

        let Some(data_row) = sheet.rows.get(position + lob_code.data_row_offset()) else {
            debug!(
                sheet = %sheet.name,
                row = position,
                lob = %lob_code,
                "Line of business code has no data row"
            );
            continue;
        };

        let figures = read_figures(data_row, &columns);
        records.push(PremiumRecord {
            year: header.year,
            company: header.company.clone(),
            naic: header.naic.clone(),
            state: state.clone(),
            lob_code,
            liability_type: lob_code.liability_type(),
            gross_written_premium: figures.written_premium,
            earned_premium: figures.earned_premium,
            combined_losses_incurred: figures.losses_incurred.unwrap_or(0.0)
                + figures.defense_cost.unwrap_or(0.0),
            direct_losses_incurred: figures.losses_incurred,
            defense_cost_containment: figures.defense_cost,
        });
    }

    Ok(records)
}

/// State named on the "DIRECT BUSINESS IN THE STATE OF" row, or the grand total page
pub fn locate_state(rows: &[Row]) -> String {
    let label_row = rows.iter().take(premium_exhibit::STATE_SCAN_ROWS).find(|row| {
        row.get(premium_exhibit::STATE_LABEL_COLUMN)
            .is_some_and(|text| text.to_uppercase().contains(premium_exhibit::STATE_LABEL))
    });

    let state = label_row.and_then(|row| {
        premium_exhibit::STATE_VALUE_COLUMNS
            .filter_map(|column| row.get(column))
            .next()
            .map(str::to_uppercase)
    });

    match state {
        Some(state) if !state.contains(premium_exhibit::GRAND_TOTAL_TEXT) => state,
        _ => premium_exhibit::GRAND_TOTAL.to_string(),
    }
}

/// Line of business code of a row, rounded to one decimal
///
/// Rounds the stored binary value, so "21.15" (21.1499...) becomes 21.1.
pub fn parse_lob_code(text: &str) -> Option<LobCode> {
    let value: f64 = text.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    LobCode::from_code(&format!("{:.1}", value))
}

#[derive(Debug, Default)]
struct Figures {
    written_premium: Option<f64>,
    earned_premium: Option<f64>,
    losses_incurred: Option<f64>,
    defense_cost: Option<f64>,
}

fn read_figures(row: &Row, columns: &PremiumHeaderMap) -> Figures {
    Figures {
        written_premium: normalize(row.get(columns.written_premium)),
        earned_premium: normalize(row.get(columns.earned_premium)),
        losses_incurred: normalize(row.get(columns.losses_incurred)),
        defense_cost: normalize(row.get(columns.defense_cost)),
    }
}

//! Record aggregation across all processed files
//!
//! Records arrive as two concatenated streams in file order. Premium records
//! are deduplicated on (NAIC, year, state, line of business) keeping the
//! first one seen; schedule records are kept as they are. Both streams are
//! then materialized as polars frames with the output column names and
//! sorted on their output keys.

use std::collections::HashSet;

use polars::prelude::{Column, DataFrame, IntoLazy, SortMultipleOptions, col};
use tracing::{debug, info};

use crate::app::models::{PremiumRecord, ScheduleRecord};
use crate::constants::{premium_table, schedule_table};
use crate::{Error, Result};

/// Output tables ready for writing
#[derive(Debug, Clone)]
pub struct AggregatedTables {
    pub premium: DataFrame,
    pub schedule: DataFrame,
    pub duplicates_removed: usize,
}

impl AggregatedTables {
    /// Named tables in output sheet order
    pub fn named_frames(&self) -> [(&'static str, &DataFrame); 2] {
        [
            (premium_table::SHEET_NAME, &self.premium),
            (schedule_table::SHEET_NAME, &self.schedule),
        ]
    }

    pub fn total_records(&self) -> usize {
        self.premium.height() + self.schedule.height()
    }
}

/// Deduplicate, build and sort both output tables
pub fn aggregate(
    premium_records: Vec<PremiumRecord>,
    schedule_records: Vec<ScheduleRecord>,
) -> Result<AggregatedTables> {
    let (premium_records, duplicates_removed) = deduplicate_premium_records(premium_records);

    let premium = premium_frame(&premium_records)?;
    let schedule = schedule_frame(&schedule_records)?;

    info!(
        premium_records = premium.height(),
        schedule_records = schedule.height(),
        duplicates_removed,
        "Aggregated extraction results"
    );

    Ok(AggregatedTables {
        premium,
        schedule,
        duplicates_removed,
    })
}

/// Keep the first premium record for each (NAIC, year, state, LOB) key
///
/// Returns the surviving records in input order and the number dropped.
pub fn deduplicate_premium_records(records: Vec<PremiumRecord>) -> (Vec<PremiumRecord>, usize) {
    let total = records.len();
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(total);

    for record in records {
        let key = {
            let (naic, year, state, lob) = record.dedup_key();
            (naic.to_string(), year, state.to_string(), lob)
        };
        if seen.insert(key) {
            unique.push(record);
        } else {
            debug!(
                naic = %record.naic,
                year = record.year,
                state = %record.state,
                lob = %record.lob_code,
                "Dropping duplicate premium record"
            );
        }
    }

    let removed = total - unique.len();
    (unique, removed)
}

/// Premium exhibit table sorted by company, year, state, liability and LOB
pub fn premium_frame(records: &[PremiumRecord]) -> Result<DataFrame> {
    let columns = premium_table::COLUMNS
        .iter()
        .map(|name| premium_column(name, records))
        .collect::<Result<Vec<_>>>()?;

    let frame = DataFrame::new(columns)
        .map_err(|e| Error::data_frame("Failed to build premium exhibit table", e))?;

    sort_frame(frame, premium_table::SORT_KEYS)
}

/// Schedule P table sorted by company, report year, line and accident year
pub fn schedule_frame(records: &[ScheduleRecord]) -> Result<DataFrame> {
    let columns = schedule_table::COLUMNS
        .iter()
        .map(|name| schedule_column(name, records))
        .collect::<Result<Vec<_>>>()?;

    let frame = DataFrame::new(columns)
        .map_err(|e| Error::data_frame("Failed to build Schedule P table", e))?;

    sort_frame(frame, schedule_table::SORT_KEYS)
}

fn premium_column(name: &str, records: &[PremiumRecord]) -> Result<Column> {
    let column = match name {
        premium_table::YEAR => Column::new(name.into(), collect(records, |r| r.year)),
        premium_table::COMPANY => Column::new(name.into(), collect(records, |r| r.company.clone())),
        premium_table::NAIC => Column::new(name.into(), collect(records, |r| r.naic.clone())),
        premium_table::STATE => Column::new(name.into(), collect(records, |r| r.state.clone())),
        premium_table::LIABILITY => Column::new(
            name.into(),
            collect(records, |r| r.liability_type.as_str()),
        ),
        premium_table::LOB => Column::new(name.into(), collect(records, |r| r.lob_code.as_str())),
        premium_table::GWP => Column::new(name.into(), collect(records, |r| r.gross_written_premium)),
        premium_table::EP => Column::new(name.into(), collect(records, |r| r.earned_premium)),
        premium_table::LOSSES_INCURRED => Column::new(
            name.into(),
            collect(records, |r| r.combined_losses_incurred),
        ),
        premium_table::DIRECT_LOSSES => Column::new(
            name.into(),
            collect(records, |r| r.direct_losses_incurred),
        ),
        premium_table::DCC => Column::new(
            name.into(),
            collect(records, |r| r.defense_cost_containment),
        ),
        other => {
            return Err(Error::configuration(format!(
                "Unknown premium exhibit column '{}'",
                other
            )));
        }
    };
    Ok(column)
}

fn schedule_column(name: &str, records: &[ScheduleRecord]) -> Result<Column> {
    let column = match name {
        schedule_table::REPORT_YEAR => Column::new(name.into(), collect(records, |r| r.report_year)),
        schedule_table::COMPANY => Column::new(name.into(), collect(records, |r| r.company.clone())),
        schedule_table::NAIC => Column::new(name.into(), collect(records, |r| r.naic.clone())),
        schedule_table::LOB => Column::new(
            name.into(),
            collect(records, |r| r.line_of_business.as_str()),
        ),
        schedule_table::YEAR => Column::new(
            name.into(),
            collect(records, |r| r.development_year.clone()),
        ),
        schedule_table::EP => Column::new(name.into(), collect(records, |r| r.earned_premium)),
        schedule_table::LOSSES_INC => Column::new(name.into(), collect(records, |r| r.losses_incurred)),
        schedule_table::CLAIMS => Column::new(name.into(), collect(records, |r| r.claim_count)),
        other => {
            return Err(Error::configuration(format!(
                "Unknown Schedule P column '{}'",
                other
            )));
        }
    };
    Ok(column)
}

fn collect<R, T>(records: &[R], field: impl Fn(&R) -> T) -> Vec<T> {
    records.iter().map(field).collect()
}

/// Stable ascending sort on the given key columns
fn sort_frame(frame: DataFrame, keys: &[&str]) -> Result<DataFrame> {
    let exprs: Vec<_> = keys.iter().map(|key| col(*key)).collect();

    frame
        .lazy()
        .sort_by_exprs(exprs, SortMultipleOptions::default().with_maintain_order(true))
        .collect()
        .map_err(|e| Error::data_frame("Failed to sort output table", e))
}

//! Output workbook writing
//!
//! Each named frame becomes one worksheet: a bold header row with the column
//! names followed by one row per record. Text values are string cells,
//! numbers are numeric cells and nulls are left blank.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use polars::prelude::{AnyValue, DataFrame};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::{debug, info};

use crate::constants::{OUTPUT_FILE_PREFIX, OUTPUT_TIMESTAMP_FORMAT};
use crate::{Error, Result};

/// `<dir>/Combined_Output_<YYYYmmdd_HHMMSS>.xlsx`
pub fn timestamped_output_path(dir: &Path, timestamp: DateTime<Local>) -> PathBuf {
    dir.join(format!(
        "{}_{}.xlsx",
        OUTPUT_FILE_PREFIX,
        timestamp.format(OUTPUT_TIMESTAMP_FORMAT)
    ))
}

/// Write named tables to an `.xlsx` file, one worksheet each, in the given order
///
/// The parent directory is created when missing. Tables without rows still
/// get a worksheet with their header row.
pub fn write_workbook(path: &Path, tables: &[(&str, &DataFrame)]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::io(
                format!("Failed to create output directory {}", parent.display()),
                e,
            )
        })?;
    }

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for (name, frame) in tables {
        let worksheet = workbook.add_worksheet().set_name(*name).map_err(|e| {
            Error::workbook_writing(format!("Failed to create worksheet '{}'", name), e)
        })?;

        write_frame(worksheet, frame, &header_format)?;
        debug!(sheet = name, rows = frame.height(), "Wrote worksheet");
    }

    workbook
        .save(path)
        .map_err(|e| Error::workbook_writing(format!("Failed to save {}", path.display()), e))?;

    info!(path = %path.display(), sheets = tables.len(), "Saved output workbook");
    Ok(())
}

fn write_frame(worksheet: &mut Worksheet, frame: &DataFrame, header_format: &Format) -> Result<()> {
    for (col_index, column) in frame.get_columns().iter().enumerate() {
        let col = col_index as u16;
        worksheet.write_string_with_format(0, col, column.name().as_str(), header_format)?;

        let series = column.as_materialized_series();
        for row_index in 0..series.len() {
            let value = series
                .get(row_index)
                .map_err(|e| Error::data_frame(format!("Failed to read column '{}'", column.name()), e))?;
            write_value(worksheet, row_index as u32 + 1, col, value)?;
        }
    }

    worksheet.autofit();
    Ok(())
}

fn write_value(worksheet: &mut Worksheet, row: u32, col: u16, value: AnyValue<'_>) -> Result<()> {
    match value {
        AnyValue::Null => {}
        AnyValue::String(text) => {
            worksheet.write_string(row, col, text)?;
        }
        AnyValue::StringOwned(text) => {
            worksheet.write_string(row, col, text.as_str())?;
        }
        AnyValue::Float64(number) => {
            worksheet.write_number(row, col, number)?;
        }
        AnyValue::Int32(number) => {
            worksheet.write_number(row, col, number)?;
        }
        other => match other.extract::<f64>() {
            Some(number) => {
                worksheet.write_number(row, col, number)?;
            }
            None => {
                worksheet.write_string(row, col, other.to_string())?;
            }
        },
    }
    Ok(())
}

//! XML Spreadsheet 2003 reader
//!
//! Parses a whole document into memory with `roxmltree` and converts it into
//! the [`Document`] grid. Matching is namespace-aware: worksheets are direct
//! children of the workbook root, rows are found anywhere below a worksheet,
//! and cells are direct children of a row.

use std::path::Path;

use roxmltree::Node;
use tracing::debug;

use super::grid::{Document, Row, Worksheet};
use crate::constants::SPREADSHEET_NAMESPACE;
use crate::{Error, Result};

const WORKSHEET_TAG: &str = "Worksheet";
const ROW_TAG: &str = "Row";
const CELL_TAG: &str = "Cell";
const DATA_TAG: &str = "Data";
const NAME_ATTR: &str = "Name";
const INDEX_ATTR: &str = "Index";

/// Read and parse a spreadsheet XML file
pub fn read_document(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        let message = if e.kind() == std::io::ErrorKind::InvalidData {
            format!(
                "File {} is not valid UTF-8; statements must be saved as UTF-8 XML",
                path.display()
            )
        } else {
            format!("Failed to read file {}", path.display())
        };
        Error::io(message, e)
    })?;

    parse_document(&content, &path.display().to_string())
}

/// Parse spreadsheet XML text; `file` is only used for error context
pub fn parse_document(xml: &str, file: &str) -> Result<Document> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(xml, options)
        .map_err(|e| Error::xml_parsing(file, "Malformed spreadsheet XML", Some(e)))?;

    let worksheets = doc
        .root_element()
        .children()
        .filter(|n| n.has_tag_name((SPREADSHEET_NAMESPACE, WORKSHEET_TAG)))
        .map(|n| parse_worksheet(n, file))
        .collect::<Result<Vec<_>>>()?;

    debug!(file, worksheets = worksheets.len(), "Parsed spreadsheet document");

    Ok(Document { worksheets })
}

fn parse_worksheet(node: Node<'_, '_>, file: &str) -> Result<Worksheet> {
    let name = node
        .attribute((SPREADSHEET_NAMESPACE, NAME_ATTR))
        .unwrap_or_default()
        .to_string();

    let rows = node
        .descendants()
        .filter(|n| n.has_tag_name((SPREADSHEET_NAMESPACE, ROW_TAG)))
        .map(|row| parse_row(row, &name, file))
        .collect::<Result<Vec<_>>>()?;

    Ok(Worksheet { name, rows })
}

fn parse_row(node: Node<'_, '_>, sheet: &str, file: &str) -> Result<Row> {
    let mut cells = Vec::new();

    for cell in node
        .children()
        .filter(|n| n.has_tag_name((SPREADSHEET_NAMESPACE, CELL_TAG)))
    {
        let explicit_index = match cell.attribute((SPREADSHEET_NAMESPACE, INDEX_ATTR)) {
            Some(raw) => Some(parse_index(raw).ok_or_else(|| {
                Error::xml_parsing(
                    file,
                    format!("Invalid cell index '{}' in worksheet '{}'", raw, sheet),
                    None,
                )
            })?),
            None => None,
        };

        cells.push((explicit_index, cell_text(cell)));
    }

    Ok(Row::from_cells(cells))
}

/// Cell indices are 1-based
fn parse_index(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|&index| index > 0)
}

/// Text of the cell's first `Data` child, including any rich-text runs inside it
fn cell_text(cell: Node<'_, '_>) -> Option<String> {
    let data = cell
        .children()
        .find(|n| n.has_tag_name((SPREADSHEET_NAMESPACE, DATA_TAG)))?;

    let text: String = data
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();

    Some(text)
}

//! Test utilities for building spreadsheet XML and grids
//!
//! Builders here are shared with the classifier, header locator and
//! extractor tests so that every test works from real XML structure.

use crate::app::services::spreadsheet_xml::{Row, Worksheet, parse_document};
use crate::constants::SPREADSHEET_NAMESPACE;


/// A cell for the XML builder: optional explicit index and optional text
#[derive(Debug, Clone)]
pub struct TestCell {
    pub index: Option<u32>,
    pub text: Option<String>,
}

/// Cell with no explicit index
pub fn c(text: &str) -> TestCell {
    TestCell {
        index: None,
        text: Some(text.to_string()),
    }
}

/// Cell pinned to a 1-based column
pub fn at(index: u32, text: &str) -> TestCell {
    TestCell {
        index: Some(index),
        text: Some(text.to_string()),
    }
}

/// Cell without a data child
pub fn blank() -> TestCell {
    TestCell {
        index: None,
        text: None,
    }
}

/// Builder for one worksheet of spreadsheet XML
#[derive(Debug, Clone)]
pub struct SheetXml {
    name: String,
    rows: Vec<Vec<TestCell>>,
}

impl SheetXml {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, cells: Vec<TestCell>) -> Self {
        self.rows.push(cells);
        self
    }

    pub fn empty_rows(mut self, count: usize) -> Self {
        for _ in 0..count {
            self.rows.push(Vec::new());
        }
        self
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn to_xml(&self) -> String {
        let mut xml = format!(
            "  <Worksheet ss:Name=\"{}\">\n    <Table>\n",
            escape(&self.name)
        );
        for row in &self.rows {
            xml.push_str("      <Row>");
            for cell in row {
                match cell.index {
                    Some(index) => xml.push_str(&format!("<Cell ss:Index=\"{}\">", index)),
                    None => xml.push_str("<Cell>"),
                }
                if let Some(text) = &cell.text {
                    xml.push_str(&format!(
                        "<Data ss:Type=\"String\">{}</Data>",
                        escape(text)
                    ));
                }
                xml.push_str("</Cell>");
            }
            xml.push_str("</Row>\n");
        }
        xml.push_str("    </Table>\n  </Worksheet>\n");
        xml
    }

    /// Parse this sheet alone through the XML reader
    pub fn build(&self) -> Worksheet {
        let xml = workbook_xml(std::slice::from_ref(self));
        let mut document = parse_document(&xml, "test.xml").unwrap();
        document.worksheets.remove(0)
    }
}

/// Render a complete workbook document
pub fn workbook_xml(sheets: &[SheetXml]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\"?>\n<?mso-application progid=\"Excel.Sheet\"?>\n");
    xml.push_str(&format!(
        "<Workbook xmlns=\"{ns}\" xmlns:o=\"urn:schemas-microsoft-com:office:office\" \
         xmlns:x=\"urn:schemas-microsoft-com:office:excel\" xmlns:ss=\"{ns}\">\n",
        ns = SPREADSHEET_NAMESPACE
    ));
    for sheet in sheets {
        xml.push_str(&sheet.to_xml());
    }
    xml.push_str("</Workbook>\n");
    xml
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Rows built directly from texts, one cell per column starting at column 1
pub fn grid_rows(rows: &[&[&str]]) -> Vec<Row> {
    rows.iter()
        .map(|cells| {
            Row::from_cells(
                cells
                    .iter()
                    .map(|text| (None, if text.is_empty() { None } else { Some(*text) })),
            )
        })
        .collect()
}

// =============================================================================
// Statement page fixtures
// =============================================================================

pub const ACME_HEADER: &str = "2022 OF THE ACME INSURANCE CO (NAIC #12345)";

/// Numbered header row of a premium exhibit: codes 1..=9 in columns 8..=16,
/// written with explicit indices only where columns are skipped
pub fn premium_number_row() -> Vec<TestCell> {
    vec![
        at(8, "1"),
        c("2"),
        c("3"),
        c("4"),
        c("5"),
        c("6"),
        c("7"),
        c("8"),
        c("9"),
    ]
}

/// Premium exhibit data row: LOB code in column 2 and amounts for codes
/// 1 (col 8), 2 (col 9), 6 (col 13) and 9 (col 16)
pub fn premium_data_row(lob: &str, written: &str, earned: &str, losses: &str, dcc: &str) -> Vec<TestCell> {
    vec![
        at(2, lob),
        at(8, written),
        c(earned),
        at(13, losses),
        at(16, dcc),
    ]
}

/// Premium exhibit page for the given state with the standard header rows
pub fn premium_exhibit_sheet(name: &str, header: &str, state: &str) -> SheetXml {
    SheetXml::new(name)
        .row(vec![at(2, header)])
        .row(vec![c("EXHIBIT OF PREMIUMS AND LOSSES (Statutory Page 14)")])
        .row(vec![at(2, "DIRECT BUSINESS IN THE STATE OF"), at(5, state)])
        .row(premium_number_row())
}

/// Schedule P Part 1 page with the three "Prior" blocks
///
/// Layout: header rows, the column number row (tokens 1, 25, 26), then an
/// earned premium block, a claim count block and a losses block of twelve
/// rows each. Amounts are derived from the block and offset so tests can
/// check which block a value came from.
pub fn schedule_sheet(name: &str, header: &str, title: &str) -> SheetXml {
    let mut sheet = SheetXml::new(name)
        .row(vec![at(2, header)])
        .row(vec![c("SCHEDULE P - PART 1 - SUMMARY OF LOSS DEVELOPMENT")])
        .row(vec![c(title)])
        .row(vec![at(4, "1"), at(10, "25"), at(12, "26")]);

    for (block, base) in [(0u32, 1000u32), (1, 40), (2, 500)] {
        sheet = sheet.row(vec![at(3, "Years in Which Premiums Were Earned")]);
        for offset in 0..12u32 {
            let label = schedule_year_label(offset);
            let amount = (base + offset).to_string();
            let column = match block {
                0 => 4,
                1 => 10,
                _ => 12,
            };
            sheet = sheet.row(vec![at(3, &label), at(column, &amount)]);
        }
    }

    sheet
}

/// Year label at a block offset: "Prior", 2013..=2022, then "Total"
pub fn schedule_year_label(offset: u32) -> String {
    match offset {
        0 => "Prior".to_string(),
        11 => "Total".to_string(),
        n => (2012 + n).to_string(),
    }
}

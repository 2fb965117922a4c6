//! Application constants for the statement extractor
//!
//! This module contains the fixed heuristics used to recognise statement
//! layouts, the scan windows for header and anchor searches, and the names
//! of the output tables and columns.

// =============================================================================
// Spreadsheet XML
// =============================================================================

/// Namespace of the XML Spreadsheet 2003 schema
pub const SPREADSHEET_NAMESPACE: &str = "urn:schemas-microsoft-com:office:spreadsheet";

/// Default input file extension
pub const DEFAULT_FILE_EXTENSION: &str = "xml";

// =============================================================================
// Worksheet Classification
// =============================================================================

/// Marker phrase of the premium and loss exhibit (state page)
pub const PREMIUM_EXHIBIT_MARKER: &str = "EXHIBIT OF PREMIUMS AND LOSSES";

/// Marker phrase of the Schedule P Part 1 loss development pages
pub const LOSS_SCHEDULE_MARKER: &str = "SCHEDULE P - PART 1";

/// Number of leading rows searched for a report marker
pub const CLASSIFY_SCAN_ROWS: usize = 5;

/// Columns (1-based, inclusive) searched for a report marker
pub const CLASSIFY_SCAN_COLUMNS: std::ops::RangeInclusive<u32> = 1..=4;

/// Schedule P line of business detection
pub mod schedule_lob {
    /// 1-based row holding the line of business title
    pub const TITLE_ROW: usize = 3;

    /// Column holding the line of business title
    pub const TITLE_COLUMN: u32 = 1;

    pub const TITLE_AUTO_LIABILITY: &str = "COMMERCIAL AUTO LIABILITY";
    pub const TITLE_AUTO_PHYSICAL_DAMAGE: &str = "AUTO PHYSICAL DAMAGE";
    pub const TITLE_SUMMARY: &str = "SUMMARY";

    pub const SHEET_AUTO_LIABILITY: &str = "COMM'L AUTO L";
    pub const SHEET_AUTO_PHYSICAL_DAMAGE: &str = "AUTO PHYS";
    pub const SHEET_SUMMARY_PAGE: &str = "PG33";
}

// =============================================================================
// Header Location
// =============================================================================

/// Premium exhibit numbered header row
pub mod premium_header {
    /// Number of leading rows searched for the numbered header row
    pub const SCAN_ROWS: usize = 10;

    /// The header row has "1" in this column ...
    pub const FIRST_ANCHOR_COLUMN: u32 = 8;
    pub const FIRST_ANCHOR_TEXT: &str = "1";

    /// ... and "2" in this one
    pub const SECOND_ANCHOR_COLUMN: u32 = 9;
    pub const SECOND_ANCHOR_TEXT: &str = "2";

    /// Column numbers printed on the exhibit header
    pub const WRITTEN_PREMIUM_CODE: u32 = 1;
    pub const EARNED_PREMIUM_CODE: u32 = 2;
    pub const LOSSES_INCURRED_CODE: u32 = 6;
    pub const DEFENSE_COST_CODE: u32 = 9;
}

/// Schedule P Part 1 column number tokens
pub mod schedule_header {
    /// Number of leading rows searched for the column number tokens
    pub const SCAN_ROWS: usize = 50;

    pub const EARNED_PREMIUM_TOKEN: &str = "1";
    pub const CLAIM_COUNT_TOKEN: &str = "25";
    pub const LOSSES_INCURRED_TOKEN: &str = "26";
}

// =============================================================================
// Record Extraction
// =============================================================================

/// Column holding the "<year> OF THE <company> (NAIC #<code>)" text in the first row
pub const COMPANY_HEADER_COLUMN: u32 = 2;

/// NAIC code used when the company header carries no NAIC suffix
pub const NAIC_NOT_AVAILABLE: &str = "N/A";

/// Premium exhibit layout
pub mod premium_exhibit {
    /// Leading rows searched for the state label
    pub const STATE_SCAN_ROWS: usize = 5;

    /// Column holding the state label
    pub const STATE_LABEL_COLUMN: u32 = 2;

    pub const STATE_LABEL: &str = "DIRECT BUSINESS IN THE STATE OF";

    /// Columns (inclusive) searched for the state name on the label row
    pub const STATE_VALUE_COLUMNS: std::ops::RangeInclusive<u32> = 3..=9;

    pub const GRAND_TOTAL_TEXT: &str = "GRAND TOTAL";

    /// State value for the all-states page
    pub const GRAND_TOTAL: &str = "GRAND_TOTAL";

    /// Column holding the line of business code
    pub const LOB_COLUMN: u32 = 2;
}

/// Schedule P Part 1 layout
pub mod loss_schedule {
    /// Column holding the accident year labels
    pub const YEAR_LABEL_COLUMN: u32 = 3;

    /// Label that opens each block of accident years
    pub const PRIOR_LABEL: &str = "Prior";

    /// Number of anchor blocks: earned premium, claim counts, losses incurred
    pub const REQUIRED_ANCHORS: usize = 3;

    /// Rows in each block (Prior plus ten accident years plus total)
    pub const BLOCK_ROWS: usize = 12;
}

// =============================================================================
// Output
// =============================================================================

/// Premium exhibit output sheet
pub mod premium_table {
    pub const SHEET_NAME: &str = "Premium Exhibit Data";

    pub const YEAR: &str = "YEAR";
    pub const COMPANY: &str = "Company_Name";
    pub const NAIC: &str = "NAIC";
    pub const STATE: &str = "State";
    pub const LIABILITY: &str = "Liability";
    pub const LOB: &str = "LOB";
    pub const GWP: &str = "GWP";
    pub const EP: &str = "EP";
    pub const LOSSES_INCURRED: &str = "LOSSES_INCURRED";
    pub const DIRECT_LOSSES: &str = "DIRECT_LOSSES_INC";
    pub const DCC: &str = "DCC";

    /// Output column order
    pub const COLUMNS: &[&str] = &[
        YEAR,
        COMPANY,
        NAIC,
        STATE,
        LIABILITY,
        LOB,
        GWP,
        EP,
        LOSSES_INCURRED,
        DIRECT_LOSSES,
        DCC,
    ];

    /// Sort keys, most significant first
    pub const SORT_KEYS: &[&str] = &[COMPANY, YEAR, STATE, LIABILITY, LOB];
}

/// Schedule P output sheet
pub mod schedule_table {
    pub const SHEET_NAME: &str = "Schedule Data";

    pub const REPORT_YEAR: &str = "REPORT_YEAR";
    pub const COMPANY: &str = "Company_Name";
    pub const NAIC: &str = "NAIC";
    pub const LOB: &str = "LOB";
    pub const YEAR: &str = "YEAR";
    pub const EP: &str = "EP";
    pub const LOSSES_INC: &str = "LOSSES_INC";
    pub const CLAIMS: &str = "CLAIMS";

    /// Output column order
    pub const COLUMNS: &[&str] = &[REPORT_YEAR, COMPANY, NAIC, LOB, YEAR, EP, LOSSES_INC, CLAIMS];

    /// Sort keys, most significant first
    pub const SORT_KEYS: &[&str] = &[COMPANY, REPORT_YEAR, LOB, YEAR];
}

/// Prefix of the generated workbook file name
pub const OUTPUT_FILE_PREFIX: &str = "Combined_Output";

/// Timestamp format appended to the generated workbook file name
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// =============================================================================
// Defaults
// =============================================================================

/// Default input directory
pub const DEFAULT_INPUT_DIR: &str = "./Inputs";

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "./Output";

/// Upper bound for concurrent file workers
pub const MAX_WORKERS: usize = 64;

/// Environment variable overriding the input directory
pub const ENV_INPUT_PATH: &str = "STATEMENT_EXTRACTOR_INPUT";

/// Environment variable overriding the output directory
pub const ENV_OUTPUT_PATH: &str = "STATEMENT_EXTRACTOR_OUTPUT";

/// Application directory name under the user config directory
pub const CONFIG_DIR_NAME: &str = "statement-extractor";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

//! Statutory Statement Extractor Library
//!
//! A Rust library for pulling structured insurance data out of statutory
//! annual statement exports saved as XML Spreadsheet 2003 documents.
//!
//! This library provides tools for:
//! - Reading spreadsheet XML into a sparse row/cell grid with carry-forward column indices
//! - Classifying worksheets as premium exhibits or Schedule P loss development pages
//! - Locating numbered header columns by scanning worksheet content
//! - Extracting premium exhibit and Schedule P records with numeric normalization
//! - Deduplicating and ordering records across a batch of files
//! - Writing the combined tables to an `.xlsx` workbook

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod pipeline;
    pub mod services {
        pub mod aggregator;
        pub mod header_locator;
        pub mod numeric_normalizer;
        pub mod record_extractor;
        pub mod spreadsheet_xml;
        pub mod workbook_writer;
        pub mod worksheet_classifier;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{PremiumRecord, ReportKind, ScheduleLob, ScheduleRecord};
pub use app::pipeline::{ExtractionSummary, run_extraction};
pub use config::Config;

/// Result type alias for the statement extractor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for statement extraction operations
///
/// Worksheet-level misses (unknown layout, unresolved headers, unmatched
/// company header) are not errors; see
/// [`WorksheetSkip`](app::services::record_extractor::WorksheetSkip).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed spreadsheet XML, fatal to the file it came from
    #[error("XML parsing error in file '{file}': {message}")]
    XmlParsing {
        file: String,
        message: String,
        #[source]
        source: Option<roxmltree::Error>,
    },

    /// Output workbook could not be written
    #[error("Workbook writing error: {message}")]
    WorkbookWriting {
        message: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// Tabular aggregation failed
    #[error("Data frame error: {message}")]
    DataFrame {
        message: String,
        #[source]
        source: polars::error::PolarsError,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Input file enumeration failed
    #[error("File discovery error: {message}")]
    FileDiscovery { message: String },

    /// Processing of a single input file failed outside of parsing
    #[error("Processing failed for file '{file}': {message}")]
    FileProcessing { file: String, message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an XML parsing error for a file
    pub fn xml_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<roxmltree::Error>,
    ) -> Self {
        Self::XmlParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a workbook writing error
    pub fn workbook_writing(message: impl Into<String>, source: rust_xlsxwriter::XlsxError) -> Self {
        Self::WorkbookWriting {
            message: message.into(),
            source,
        }
    }

    /// Create a data frame error
    pub fn data_frame(message: impl Into<String>, source: polars::error::PolarsError) -> Self {
        Self::DataFrame {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a file discovery error
    pub fn file_discovery(message: impl Into<String>) -> Self {
        Self::FileDiscovery {
            message: message.into(),
        }
    }

    /// Create a per-file processing error
    pub fn file_processing(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileProcessing {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::DataFrame {
            message: "Data frame operation failed".to_string(),
            source: error,
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        Self::WorkbookWriting {
            message: "Workbook operation failed".to_string(),
            source: error,
        }
    }
}

impl From<glob::PatternError> for Error {
    fn from(error: glob::PatternError) -> Self {
        Self::file_discovery(format!("Invalid file pattern: {}", error))
    }
}

//! Spreadsheet XML grid model
//!
//! Statement exports are XML Spreadsheet 2003 documents: a workbook of
//! `Worksheet` elements, each holding `Row`s of `Cell`s. Cells only carry an
//! explicit `ss:Index` when they skip columns, so a cell's position has to be
//! carried forward from its predecessor.
//!
//! ## Architecture
//!
//! - [`grid`] - [`Document`], [`Worksheet`] and [`Row`] with the resolved
//!   column index built once per row
//! - [`reader`] - parsing XML text into the grid with `roxmltree`

pub mod grid;
pub mod reader;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use grid::{Cell, Document, Row, Worksheet};
pub use reader::{parse_document, read_document};

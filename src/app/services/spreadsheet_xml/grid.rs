//! Row and worksheet grid with carry-forward column indexing

use std::collections::HashMap;

/// A cell with its resolved 1-based column index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub index: u32,
    /// Trimmed cell text, `None` when the cell has no data or only whitespace
    pub text: Option<String>,
}

/// One worksheet row
///
/// Cells are kept in document order together with a lookup table from
/// resolved column index to cell position. When two cells resolve to the
/// same column, lookups return the first one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<Cell>,
    by_column: HashMap<u32, usize>,
}

impl Row {
    /// Build a row from `(explicit_index, text)` pairs in document order
    ///
    /// A cell without an explicit index sits one column after the previous
    /// cell; the first cell defaults to column 1.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = (Option<u32>, Option<S>)>,
        S: AsRef<str>,
    {
        let mut row = Row::default();
        let mut next_index = 1u32;

        for (explicit_index, text) in cells {
            let index = explicit_index.unwrap_or(next_index);
            next_index = index.saturating_add(1);

            let text = text
                .map(|t| t.as_ref().trim().to_string())
                .filter(|t| !t.is_empty());

            let position = row.cells.len();
            row.by_column.entry(index).or_insert(position);
            row.cells.push(Cell { index, text });
        }

        row
    }

    /// Text of the cell at a 1-based column, if any
    pub fn get(&self, column: u32) -> Option<&str> {
        self.by_column
            .get(&column)
            .and_then(|&position| self.cells[position].text.as_deref())
    }

    /// Cells in document order with their resolved indices
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells that carry text, in document order
    pub fn texts(&self) -> impl Iterator<Item = (u32, &str)> {
        self.cells
            .iter()
            .filter_map(|cell| cell.text.as_deref().map(|text| (cell.index, text)))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A named worksheet and its rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Worksheet {
    pub name: String,
    pub rows: Vec<Row>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Text at a 0-based row and 1-based column
    pub fn cell(&self, row: usize, column: u32) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A parsed spreadsheet document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub worksheets: Vec<Worksheet>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_cells_start_at_column_one() {
        let row = Row::from_cells([(None, Some("a")), (None, Some("b")), (None, Some("c"))]);

        assert_eq!(row.get(1), Some("a"));
        assert_eq!(row.get(2), Some("b"));
        assert_eq!(row.get(3), Some("c"));
        assert_eq!(row.get(4), None);
        assert_eq!(row.get(0), None);
    }

    #[test]
    fn test_explicit_index_carries_forward() {
        let row = Row::from_cells([
            (None, Some("a")),
            (Some(5), Some("e")),
            (None, Some("f")),
            (Some(9), Some("i")),
        ]);

        assert_eq!(row.get(1), Some("a"));
        assert_eq!(row.get(2), None);
        assert_eq!(row.get(5), Some("e"));
        assert_eq!(row.get(6), Some("f"));
        assert_eq!(row.get(9), Some("i"));

        let indices: Vec<u32> = row.cells().iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![1, 5, 6, 9]);
    }

    #[test]
    fn test_fully_explicit_and_sparse_rows_resolve_identically() {
        let sparse = Row::from_cells([
            (None, Some("x")),
            (None, Some("y")),
            (Some(7), Some("z")),
            (None, Some("w")),
        ]);
        let explicit = Row::from_cells([
            (Some(1), Some("x")),
            (Some(2), Some("y")),
            (Some(7), Some("z")),
            (Some(8), Some("w")),
        ]);

        for column in 0..12 {
            assert_eq!(sparse.get(column), explicit.get(column), "column {}", column);
        }
        assert_eq!(sparse, explicit);
    }

    #[test]
    fn test_empty_cells_occupy_a_column() {
        let row = Row::from_cells([(None, Some("a")), (None, None), (None, Some("   ")), (None, Some("d"))]);

        assert_eq!(row.get(2), None);
        assert_eq!(row.get(3), None);
        assert_eq!(row.get(4), Some("d"));
        assert_eq!(row.cells().len(), 4);
        assert_eq!(row.texts().count(), 2);
    }

    #[test]
    fn test_text_is_trimmed() {
        let row = Row::from_cells([(None, Some("  19.3 \n"))]);
        assert_eq!(row.get(1), Some("19.3"));
    }

    #[test]
    fn test_first_cell_wins_on_duplicate_index() {
        let row = Row::from_cells([(Some(3), Some("first")), (Some(3), Some("second"))]);
        assert_eq!(row.get(3), Some("first"));

        let row = Row::from_cells([(Some(3), None), (Some(3), Some("second"))]);
        assert_eq!(row.get(3), None);
    }

    #[test]
    fn test_worksheet_cell_lookup() {
        let sheet = Worksheet::new(
            "PG14",
            vec![
                Row::from_cells([(Some(2), Some("header"))]),
                Row::from_cells::<_, &str>([]),
            ],
        );

        assert_eq!(sheet.cell(0, 2), Some("header"));
        assert_eq!(sheet.cell(1, 1), None);
        assert_eq!(sheet.cell(5, 1), None);
        assert_eq!(sheet.row_count(), 2);
        assert!(sheet.rows[1].is_empty());
    }
}

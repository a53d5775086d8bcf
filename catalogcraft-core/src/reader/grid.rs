//! Grid data structure

/// A read-only sheet of text cells
///
/// Cells are addressed as `(col, row)`, both 0-based. Row 0 is the header
/// row. Every row holds exactly `column_count` cells; positions outside the
/// grid read as empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    sheet_name: String,
    columns: usize,
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Build a grid from row-major cell text, padding ragged rows
    pub fn new(sheet_name: impl Into<String>, mut rows: Vec<Vec<String>>) -> Self {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(columns, String::new());
        }
        Self {
            sheet_name: sheet_name.into(),
            columns,
            rows,
        }
    }

    /// Name of the sheet the grid was read from
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the text at the given position
    pub fn cell_text(&self, col: usize, row: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Get all cells of a row in column order
    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Number of data rows (everything below the header)
    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Grid {
        Grid::new(
            "Sheet1",
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let g = grid(&[&["a", "b", "c"], &["d"], &[]]);
        assert_eq!(g.column_count(), 3);
        assert_eq!(g.row_count(), 3);
        assert_eq!(g.row(1).unwrap(), &["d", "", ""]);
        assert_eq!(g.row(2).unwrap().len(), 3);
    }

    #[test]
    fn test_cell_text_addressing() {
        let g = grid(&[&["Food", "Price"], &["Soup", "4.5"]]);
        assert_eq!(g.cell_text(0, 0), "Food");
        assert_eq!(g.cell_text(1, 1), "4.5");
        assert_eq!(g.cell_text(5, 0), "");
        assert_eq!(g.cell_text(0, 9), "");
    }

    #[test]
    fn test_empty_grid() {
        let g = Grid::new("Empty", Vec::new());
        assert_eq!(g.column_count(), 0);
        assert_eq!(g.row_count(), 0);
        assert_eq!(g.data_row_count(), 0);
        assert!(g.row(0).is_none());
    }
}

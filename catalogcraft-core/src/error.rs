//! Error types for catalog extraction

use thiserror::Error;

/// Failures that stop a catalog listing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A column was requested by a header name the sheet does not have
    #[error("required column \"{0}\" not found in header row")]
    MissingColumn(String),

    #[error("column index {column} is outside the sheet ({column_count} columns)")]
    ColumnOutOfRange { column: usize, column_count: usize },

    /// `row` is the 1-based row number as shown by a spreadsheet application
    #[error("row {row}: price \"{text}\" is not a decimal number")]
    InvalidPrice { row: usize, text: String },

    #[error("header row is missing required columns: {}", .0.join(", "))]
    IncompleteHeader(Vec<String>),

    #[error("sheet has {found} columns, expected at least {expected}")]
    TooFewColumns { found: usize, expected: usize },

    #[error("sheet {0} not found in workbook")]
    SheetNotFound(String),

    #[error("workbook has no sheets")]
    NoSheets,

    #[error("unknown currency locale \"{0}\"")]
    UnknownLocale(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CatalogError::MissingColumn("price".to_string()).to_string(),
            "required column \"price\" not found in header row"
        );
        assert_eq!(
            CatalogError::IncompleteHeader(vec!["size".to_string(), "special order".to_string()])
                .to_string(),
            "header row is missing required columns: size, special order"
        );
        assert_eq!(
            CatalogError::InvalidPrice {
                row: 3,
                text: "abc".to_string()
            }
            .to_string(),
            "row 3: price \"abc\" is not a decimal number"
        );
    }
}

//! Column and row extraction

use rust_decimal::Decimal;
use serde::Serialize;

use crate::currency::parse_price;
use crate::error::CatalogError;
use crate::header::HeaderMap;
use crate::reader::Grid;

/// Text of one column for every data row, top to bottom
pub type ColumnValues = Vec<String>;

/// Read rows `1..row_count` of a column
pub fn column_values(grid: &Grid, column: usize) -> Result<ColumnValues, CatalogError> {
    if column >= grid.column_count() {
        return Err(CatalogError::ColumnOutOfRange {
            column,
            column_count: grid.column_count(),
        });
    }
    Ok((1..grid.row_count())
        .map(|row| grid.cell_text(column, row).to_string())
        .collect())
}

/// Read a column by header name
pub fn column_by_name(
    grid: &Grid,
    headers: &HeaderMap,
    name: &str,
) -> Result<ColumnValues, CatalogError> {
    column_values(grid, headers.require(name)?)
}

/// Read every cell of a row in column order
pub fn row_values(grid: &Grid, row: usize) -> Vec<String> {
    grid.row(row).map(<[String]>::to_vec).unwrap_or_default()
}

/// Aligned catalog columns, one value per data row in each
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogColumns {
    pub food: ColumnValues,
    pub category: ColumnValues,
    pub price: ColumnValues,
    pub quantity: ColumnValues,
    pub description: ColumnValues,
    /// Present only when the sheet has a "size" header
    pub size: Option<ColumnValues>,
    /// Present only when the sheet has a "special order" header
    pub special_order: Option<ColumnValues>,
}

impl CatalogColumns {
    /// Pull the catalog columns out of a grid
    ///
    /// Fails on the first listed column whose header is absent.
    pub fn extract(grid: &Grid, headers: &HeaderMap) -> Result<Self, CatalogError> {
        let optional = |name: &str| {
            headers
                .get(name)
                .map(|col| column_values(grid, col))
                .transpose()
        };

        Ok(Self {
            food: column_by_name(grid, headers, "food")?,
            category: column_by_name(grid, headers, "category")?,
            price: column_by_name(grid, headers, "price")?,
            quantity: column_by_name(grid, headers, "quantity")?,
            description: column_by_name(grid, headers, "description")?,
            size: optional("size")?,
            special_order: optional("special order")?,
        })
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.food.len()
    }

    pub fn is_empty(&self) -> bool {
        self.food.is_empty()
    }

    /// Typed record for the data row at `index`, `None` past the last row
    ///
    /// A hand-built column shorter than `food` reads as empty text.
    pub fn entry(&self, index: usize) -> Option<Result<CatalogEntry, CatalogError>> {
        let food = self.food.get(index)?.clone();
        let text = |column: &ColumnValues| column.get(index).cloned().unwrap_or_default();

        // Data rows start below the header; spreadsheet row numbers are 1-based
        let row = index + 2;
        let price_text = text(&self.price);
        let Some(price) = parse_price(&price_text) else {
            return Some(Err(CatalogError::InvalidPrice {
                row,
                text: price_text,
            }));
        };

        Some(Ok(CatalogEntry {
            row,
            food,
            category: text(&self.category),
            price,
            quantity: text(&self.quantity),
            description: text(&self.description),
            size: self.size.as_ref().map(text),
            special_order: self.special_order.as_ref().map(text),
        }))
    }

    /// Typed records in row order, each failing on its own price
    pub fn entries(&self) -> impl Iterator<Item = Result<CatalogEntry, CatalogError>> + '_ {
        (0..self.len()).filter_map(|index| self.entry(index))
    }
}

/// One catalog line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// 1-based sheet row the entry was read from
    pub row: usize,
    pub food: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_order: Option<String>,
}

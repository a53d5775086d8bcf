//! catalogcraft-core: Core library for catalog listings from spreadsheets
//!
//! Reads one sheet of an Excel/ODS workbook, resolves its columns from the
//! header row and turns every data row into a priced catalog entry.

pub mod config;
pub mod currency;
pub mod error;
pub mod extract;
pub mod header;
pub mod reader;
pub mod report;

use anyhow::{Context, Result};
use std::path::Path;

pub use config::{CatalogConfig, CurrencyConfig};
pub use currency::CurrencyFormat;
pub use error::CatalogError;
pub use extract::{CatalogColumns, CatalogEntry, ColumnValues};
pub use header::{HeaderCheck, HeaderMap};
pub use reader::{CellText, Grid, SheetSelector};

/// Main catalog interface
pub struct Catalog {
    config: CatalogConfig,
}

impl Catalog {
    /// Create a catalog reader with default configuration
    pub fn new() -> Self {
        Self::with_config(CatalogConfig::default())
    }

    pub fn with_config(config: CatalogConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Read a spreadsheet file and resolve its header row
    ///
    /// Header problems are only warnings unless the configuration is strict.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Listing> {
        let path = path.as_ref();
        let grid = reader::read_grid(path, &self.config.sheet, self.config.cell_text)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(self.resolve(grid)?)
    }

    /// Resolve the header row of an already loaded grid
    pub fn resolve(&self, grid: Grid) -> Result<Listing, CatalogError> {
        tracing::info!(
            "Sheet '{}' contains {} columns",
            grid.sheet_name(),
            grid.column_count()
        );
        tracing::info!(
            "Sheet '{}' contains {} rows",
            grid.sheet_name(),
            grid.row_count()
        );

        let (headers, check) = header::resolve_headers(
            &grid,
            self.config.required_columns.as_slice(),
            self.config.min_columns,
        );

        if self.config.strict {
            check.clone().into_result()?;
        }

        Ok(Listing {
            grid,
            headers,
            check,
        })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded sheet with its resolved header row
#[derive(Debug, Clone)]
pub struct Listing {
    pub grid: Grid,
    pub headers: HeaderMap,
    pub check: HeaderCheck,
}

impl Listing {
    /// Extract the aligned catalog columns
    pub fn columns(&self) -> Result<CatalogColumns, CatalogError> {
        CatalogColumns::extract(&self.grid, &self.headers)
    }

    /// Every data row as a typed entry, failing on the first bad row
    pub fn entries(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        self.columns()?.entries().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Grid {
        Grid::new(
            "Menu",
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_lenient_resolution_keeps_partial_header() {
        let listing = Catalog::new()
            .resolve(grid(&[&["Food", "Price"], &["Soup", "4.5"]]))
            .unwrap();
        assert_eq!(listing.headers.len(), 2);
        assert!(!listing.check.is_complete());
        assert_eq!(
            listing.columns(),
            Err(CatalogError::MissingColumn("category".to_string()))
        );
    }

    #[test]
    fn test_strict_resolution_fails() {
        let config = CatalogConfig {
            strict: true,
            ..CatalogConfig::default()
        };
        let result = Catalog::with_config(config).resolve(grid(&[&["Food", "Price"]]));
        assert!(matches!(result, Err(CatalogError::IncompleteHeader(missing)) if missing.len() == 5));
    }

    #[test]
    fn test_entries() {
        let listing = Catalog::new()
            .resolve(grid(&[
                &["Food", "Category", "Price", "Quantity", "Description", "Size", "Special Order"],
                &["Soup", "Entree", "4.5", "2", "Tomato soup", "M", "no"],
            ]))
            .unwrap();
        assert!(listing.check.is_complete());

        let entries = listing.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].food, "Soup");
    }
}

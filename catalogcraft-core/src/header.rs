//! Header row resolution
//!
//! Row 0 of a sheet names its columns. Lookups are case-insensitive: header
//! text is lowercased on insertion and queries are lowercased on lookup.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::CatalogError;
use crate::reader::Grid;

/// Header names every catalog sheet is expected to carry
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "food",
    "category",
    "price",
    "quantity",
    "description",
    "size",
    "special order",
];

/// Fewer columns than this is reported as a malformed sheet
pub const MIN_COLUMNS: usize = 7;

/// Lowercased header text mapped to its column index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HeaderMap {
    columns: BTreeMap<String, usize>,
}

impl HeaderMap {
    /// Build the map from row 0 of a grid
    ///
    /// Empty header cells are skipped. When two headers lowercase to the same
    /// text, the rightmost one wins.
    pub fn from_grid(grid: &Grid) -> Self {
        let mut columns = BTreeMap::new();
        for col in 0..grid.column_count() {
            let text = grid.cell_text(col, 0);
            if text.is_empty() {
                continue;
            }
            columns.insert(text.to_lowercase(), col);
        }
        Self { columns }
    }

    /// Column index for a header name, if present
    pub fn get(&self, name: &str) -> Option<usize> {
        self.columns.get(&name.to_lowercase()).copied()
    }

    /// Column index for a header name, failing when the header is absent
    pub fn require(&self, name: &str) -> Result<usize, CatalogError> {
        self.get(name)
            .ok_or_else(|| CatalogError::MissingColumn(name.to_lowercase()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate headers in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.columns.iter().map(|(name, col)| (name.as_str(), *col))
    }
}

/// Outcome of the header checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCheck {
    pub column_count: usize,
    pub min_columns: usize,
    /// Required names with no matching header, in the order they were required
    pub missing: Vec<String>,
}

impl HeaderCheck {
    pub fn too_few_columns(&self) -> bool {
        self.column_count < self.min_columns
    }

    /// True when every required header was found
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// True when the header would also pass strict mode
    pub fn passed(&self) -> bool {
        self.is_complete() && !self.too_few_columns()
    }

    /// Turn a failed check into an error
    pub fn into_result(self) -> Result<(), CatalogError> {
        if !self.missing.is_empty() {
            return Err(CatalogError::IncompleteHeader(self.missing));
        }
        if self.too_few_columns() {
            return Err(CatalogError::TooFewColumns {
                found: self.column_count,
                expected: self.min_columns,
            });
        }
        Ok(())
    }
}

/// Build the header map of a grid and check it against the required names
///
/// Problems are logged and recorded in the returned [`HeaderCheck`]; nothing
/// here fails.
pub fn resolve_headers<S: AsRef<str>>(
    grid: &Grid,
    required: &[S],
    min_columns: usize,
) -> (HeaderMap, HeaderCheck) {
    let column_count = grid.column_count();
    if column_count < min_columns {
        tracing::warn!(
            "Sheet '{}' has {} columns, expected at least {}",
            grid.sheet_name(),
            column_count,
            min_columns
        );
    }

    let headers = HeaderMap::from_grid(grid);
    tracing::debug!(?headers, "Resolved header row");

    let mut missing = Vec::new();
    for name in required {
        let name = name.as_ref();
        if !headers.contains(name) {
            tracing::warn!("Did not find required column name \"{}\"", name);
            missing.push(name.to_lowercase());
        }
    }

    let check = HeaderCheck {
        column_count,
        min_columns,
        missing,
    };
    (headers, check)
}

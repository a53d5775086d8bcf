//! Excel/ODS file reader using calamine

use anyhow::{Context, Result};
use calamine::{Data, ExcelDateTime, Range, Reader, Sheets, open_workbook_auto};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;
use zip::ZipArchive;

use crate::error::CatalogError;

pub mod grid;
pub mod ods_text;

pub use grid::Grid;

/// Which sheet of the workbook to read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SheetSelector {
    /// 0-based position in the workbook
    Index(usize),
    Name(String),
}

impl Default for SheetSelector {
    fn default() -> Self {
        SheetSelector::Index(0)
    }
}

impl SheetSelector {
    /// Pick a sheet name out of the workbook's sheet list
    pub fn select<'a>(&self, names: &'a [String]) -> Result<&'a str, CatalogError> {
        if names.is_empty() {
            return Err(CatalogError::NoSheets);
        }
        match self {
            SheetSelector::Index(index) => names
                .get(*index)
                .map(String::as_str)
                .ok_or_else(|| CatalogError::SheetNotFound(self.to_string())),
            SheetSelector::Name(name) => names
                .iter()
                .find(|n| *n == name)
                .map(String::as_str)
                .ok_or_else(|| CatalogError::SheetNotFound(self.to_string())),
        }
    }
}

impl FromStr for SheetSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<usize>() {
            Ok(index) => SheetSelector::Index(index),
            Err(_) => SheetSelector::Name(s.to_string()),
        })
    }
}

impl fmt::Display for SheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetSelector::Index(index) => write!(f, "#{}", index),
            SheetSelector::Name(name) => write!(f, "\"{}\"", name),
        }
    }
}

/// Where cell text comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellText {
    /// Typed cell value rendered as text
    #[default]
    Value,
    /// Text as displayed by the spreadsheet application (ODS only)
    Display,
}

/// Read one sheet of a workbook into a grid
pub fn read_grid<P: AsRef<Path>>(path: P, sheet: &SheetSelector, source: CellText) -> Result<Grid> {
    let path = path.as_ref();

    let is_ods = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("ods"))
        .unwrap_or(false);

    match source {
        CellText::Display if is_ods => read_display_grid(path, sheet),
        CellText::Display => {
            tracing::warn!(
                "Displayed text is only available for ODS files, reading cell values of {}",
                path.display()
            );
            read_value_grid(path, sheet)
        }
        CellText::Value => read_value_grid(path, sheet),
    }
}

fn read_value_grid(path: &Path, sheet: &SheetSelector) -> Result<Grid> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = sheet.select(&sheet_names)?.to_string();

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet '{}'", sheet_name))?;

    Ok(grid_from_range(sheet_name, &range))
}

fn read_display_grid(path: &Path, sheet: &SheetSelector) -> Result<Grid> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).context("Failed to open zip archive")?;
    let content = archive
        .by_name("content.xml")
        .context("ODS file has no content.xml")?;

    ods_text::read_sheet(BufReader::new(content), sheet)
}

/// Lay a calamine range out on absolute sheet coordinates
fn grid_from_range(sheet_name: String, range: &Range<Data>) -> Grid {
    let (rows, cols) = match range.end() {
        Some((row, col)) => (row as usize + 1, col as usize + 1),
        None => (0, 0),
    };
    let (start_row, start_col) = range.start().unwrap_or((0, 0));

    let mut cells = vec![vec![String::new(); cols]; rows];
    for (row, col, data) in range.used_cells() {
        cells[start_row as usize + row][start_col as usize + col] = cell_text(data);
    }

    Grid::new(sheet_name, cells)
}

fn cell_text(data: &Data) -> String {
    match data {
        Data::Int(i) => i.to_string(),
        Data::Float(f) => number_text(*f),
        Data::String(s) => s.clone(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::Error(e) => e.to_string(),
        Data::Empty => String::new(),
        Data::DateTime(dt) => datetime_text(dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Render a float with at most 15 significant digits, dropping binary noise
fn number_text(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    format!("{:.14e}", value)
        .parse::<f64>()
        .map(|rounded| rounded.to_string())
        .unwrap_or_else(|_| value.to_string())
}

/// Dates as ISO text; a midnight time of day is left out
fn datetime_text(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        return number_text(dt.as_f64());
    }
    match dt.as_datetime() {
        Some(datetime) if Some(datetime.time()) == NaiveTime::from_hms_opt(0, 0, 0) => {
            datetime.date().format("%Y-%m-%d").to_string()
        }
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => number_text(dt.as_f64()),
    }
}

//! Output formatters for catalog listings

use anyhow::Result;
use catalogcraft_core::report::write_listing;
use catalogcraft_core::{CurrencyFormat, Listing};
use colored::*;
use serde::Serialize;
use std::io;
use std::path::Path;

/// Print the plain-text listing to stdout
pub fn print_human(listing: &Listing, currency: &CurrencyFormat) -> Result<()> {
    let columns = listing.columns()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_listing(&mut out, &columns, currency)?;
    Ok(())
}

/// Print which required columns were found
pub fn print_header_report(file_path: &Path, listing: &Listing, required: &[String]) {
    println!("{}", format!("Checking: {}", file_path.display()).bold());
    println!(
        "{} {}",
        "Sheet:".bold(),
        listing.grid.sheet_name().cyan().bold()
    );
    println!();

    for name in required {
        match listing.headers.get(name) {
            Some(col) => println!("  {} {} (column {})", "✓".green().bold(), name, col + 1),
            None => println!("  {} {}", "✗".red().bold(), name),
        }
    }
    println!();

    let check = &listing.check;
    if check.too_few_columns() {
        println!(
            "{} sheet has {} columns, expected at least {}",
            "✗".red().bold(),
            check.column_count,
            check.min_columns
        );
    }
    if !check.is_complete() {
        println!(
            "{} {}",
            "Missing:".red().bold(),
            check.missing.join(", ")
        );
    }
    if check.passed() {
        println!("{}", "✓ All required columns found!".green().bold());
    }
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    #[serde(flatten)]
    entry: &'a catalogcraft_core::CatalogEntry,
    formatted_price: String,
}

/// Build the JSON document for a listing
fn json_report(
    file_path: &Path,
    listing: &Listing,
    currency: &CurrencyFormat,
) -> Result<serde_json::Value> {
    let entries = listing.entries()?;
    let entries: Vec<JsonEntry> = entries
        .iter()
        .map(|entry| JsonEntry {
            entry,
            formatted_price: currency.format(entry.price),
        })
        .collect();

    Ok(serde_json::json!({
        "file": file_path.display().to_string(),
        "sheet": listing.grid.sheet_name(),
        "headers": listing.headers,
        "missing_columns": listing.check.missing,
        "entries": entries,
        "summary": {
            "rows": listing.grid.data_row_count(),
            "columns": listing.grid.column_count(),
            "header_passed": listing.check.passed(),
        }
    }))
}

/// Print the listing in JSON format
pub fn print_json(file_path: &Path, listing: &Listing, currency: &CurrencyFormat) -> Result<()> {
    let output = json_report(file_path, listing, currency)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

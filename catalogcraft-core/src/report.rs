//! Plain-text catalog listing

use anyhow::Result;
use std::io::Write;

use crate::currency::CurrencyFormat;
use crate::extract::{CatalogColumns, CatalogEntry};

/// Render one entry as a listing record, blank separator line included
pub fn format_entry(entry: &CatalogEntry, currency: &CurrencyFormat) -> String {
    format!(
        "{}\t({}) × {}\n\tCategory: {}\n\t{}\n\n",
        entry.food,
        currency.format(entry.price),
        entry.quantity,
        entry.category,
        entry.description
    )
}

/// Write the listing record by record
///
/// Stops at the first row whose price does not parse; records before it
/// have already been written. Returns the number of records written.
pub fn write_listing<W: Write>(
    out: &mut W,
    columns: &CatalogColumns,
    currency: &CurrencyFormat,
) -> Result<usize> {
    let mut written = 0;
    for entry in columns.entries() {
        let entry = entry?;
        out.write_all(format_entry(&entry, currency).as_bytes())?;
        written += 1;
    }
    out.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::header::HeaderMap;
    use crate::reader::Grid;

    fn columns(rows: &[&[&str]]) -> CatalogColumns {
        let grid = Grid::new(
            "Menu",
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        );
        CatalogColumns::extract(&grid, &HeaderMap::from_grid(&grid)).unwrap()
    }

    const HEADER: &[&str] = &[
        "Food",
        "Category",
        "Price",
        "Quantity",
        "Description",
        "Size",
        "Special Order",
    ];

    #[test]
    fn test_single_record() {
        let columns = columns(&[HEADER, &["Soup", "Entree", "4.5", "2", "Tomato soup", "M", "no"]]);
        let mut out = Vec::new();
        let written = write_listing(&mut out, &columns, &CurrencyFormat::default()).unwrap();

        assert_eq!(written, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Soup\t($4.50) × 2\n\tCategory: Entree\n\tTomato soup\n\n"
        );
    }

    #[test]
    fn test_records_follow_row_order() {
        let columns = columns(&[
            HEADER,
            &["Soup", "Entree", "4.5", "2", "Tomato soup", "M", "no"],
            &["Pie", "Dessert", "12.5", "1", "Apple pie", "S", "yes"],
        ]);
        let mut out = Vec::new();
        write_listing(&mut out, &columns, &CurrencyFormat::default()).unwrap();

        let text = String::from_utf8(out).unwrap();
        let records: Vec<&str> = text.split_terminator("\n\n").collect();
        assert_eq!(records.len(), 2);
        assert!(records[0].starts_with("Soup\t($4.50) × 2"));
        assert_eq!(records[1], "Pie\t($12.50) × 1\n\tCategory: Dessert\n\tApple pie");
    }

    #[test]
    fn test_header_only_sheet_writes_nothing() {
        let columns = columns(&[HEADER]);
        let mut out = Vec::new();
        assert_eq!(write_listing(&mut out, &columns, &CurrencyFormat::default()).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_invalid_price_keeps_partial_output() {
        let columns = columns(&[
            HEADER,
            &["Soup", "Entree", "4.5", "2", "Tomato soup", "M", "no"],
            &["Stew", "Entree", "abc", "1", "Beef stew", "L", "no"],
            &["Pie", "Dessert", "3", "1", "Apple pie", "S", "yes"],
        ]);
        let mut out = Vec::new();
        let err = write_listing(&mut out, &columns, &CurrencyFormat::default()).unwrap_err();

        assert_eq!(
            err.downcast_ref::<CatalogError>(),
            Some(&CatalogError::InvalidPrice {
                row: 3,
                text: "abc".to_string()
            })
        );
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Soup\t($4.50) × 2\n\tCategory: Entree\n\tTomato soup\n\n"
        );
    }

    #[test]
    fn test_locale_currency_in_record() {
        let columns = columns(&[HEADER, &["Suppe", "Vorspeise", "4.5", "2", "Tomatensuppe", "M", "nein"]]);
        let entry = columns.entry(0).unwrap().unwrap();
        let de = CurrencyFormat::for_locale("de-DE").unwrap();
        assert!(format_entry(&entry, &de).starts_with("Suppe\t(4,50\u{a0}€) × 2\n"));
    }
}

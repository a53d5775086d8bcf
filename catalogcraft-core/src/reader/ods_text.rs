//! ODS displayed-text reader
//!
//! Reads the `text:p` paragraphs of every cell in `content.xml`, which is the
//! text a spreadsheet application shows (e.g. `$4.50` for a currency cell
//! whose value is `4.5`).

use anyhow::{Context, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::io::BufRead;

use super::{Grid, SheetSelector};

/// A parsed `table:table` before sheet selection
struct Table {
    name: String,
    rows: Vec<Vec<String>>,
}

/// Collects rows of one table, materialising repeats only when they are
/// followed by content.
#[derive(Default)]
struct TableBuilder {
    rows: Vec<Vec<String>>,
    pending_empty_rows: usize,
    row: Vec<String>,
    pending_empty_cells: usize,
}

impl TableBuilder {
    fn push_cell(&mut self, text: String, repeated: usize) {
        if text.is_empty() {
            self.pending_empty_cells += repeated;
            return;
        }
        self.row
            .extend(std::iter::repeat_n(String::new(), self.pending_empty_cells));
        self.pending_empty_cells = 0;
        self.row.extend(std::iter::repeat_n(text, repeated));
    }

    fn finish_row(&mut self, repeated: usize) {
        self.pending_empty_cells = 0;
        let row = std::mem::take(&mut self.row);
        if row.is_empty() {
            self.pending_empty_rows += repeated;
            return;
        }
        self.rows
            .extend(std::iter::repeat_n(Vec::new(), self.pending_empty_rows));
        self.pending_empty_rows = 0;
        self.rows.extend(std::iter::repeat_n(row, repeated));
    }
}

/// Read the selected sheet from an ODS `content.xml` stream
pub fn read_sheet<R: BufRead>(content: R, sheet: &SheetSelector) -> Result<Grid> {
    let tables = parse_tables(content)?;
    let names: Vec<String> = tables.iter().map(|t| t.name.clone()).collect();
    let selected = sheet.select(&names)?.to_string();

    let table = tables
        .into_iter()
        .find(|t| t.name == selected)
        .map(|t| t.rows)
        .unwrap_or_default();

    Ok(Grid::new(selected, table))
}

fn parse_tables<R: BufRead>(content: R) -> Result<Vec<Table>> {
    let mut reader = Reader::from_reader(content);
    let mut buf = Vec::new();

    let mut tables = Vec::new();
    let mut table: Option<(String, TableBuilder)> = None;

    let mut row_repeat = 1usize;
    let mut cell_repeat = 1usize;
    let mut in_cell = false;
    let mut in_paragraph = false;
    let mut annotation_depth = 0usize;
    let mut paragraphs = 0usize;
    let mut text = String::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .with_context(|| format!("XML parsing error at position {}", reader.error_position()))?;

        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"table:table" => {
                    table = Some((attr_string(&e, b"table:name"), TableBuilder::default()));
                }
                b"table:table-row" if table.is_some() => {
                    row_repeat = attr_count(&e, b"table:number-rows-repeated");
                }
                b"table:table-cell" | b"table:covered-table-cell" if table.is_some() => {
                    cell_repeat = attr_count(&e, b"table:number-columns-repeated");
                    in_cell = true;
                    paragraphs = 0;
                    text.clear();
                }
                b"office:annotation" => annotation_depth += 1,
                b"text:p" if in_cell && annotation_depth == 0 => {
                    if paragraphs > 0 {
                        text.push('\n');
                    }
                    paragraphs += 1;
                    in_paragraph = true;
                }
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"table:table" => tables.push(Table {
                    name: attr_string(&e, b"table:name"),
                    rows: Vec::new(),
                }),
                b"table:table-row" => {
                    if let Some((_, builder)) = table.as_mut() {
                        builder.finish_row(attr_count(&e, b"table:number-rows-repeated"));
                    }
                }
                b"table:table-cell" | b"table:covered-table-cell" => {
                    if let Some((_, builder)) = table.as_mut() {
                        builder.push_cell(
                            String::new(),
                            attr_count(&e, b"table:number-columns-repeated"),
                        );
                    }
                }
                b"text:p" if in_cell && annotation_depth == 0 => {
                    if paragraphs > 0 {
                        text.push('\n');
                    }
                    paragraphs += 1;
                }
                b"text:s" if in_paragraph && annotation_depth == 0 => {
                    let spaces = attr_count(&e, b"text:c");
                    text.extend(std::iter::repeat_n(' ', spaces));
                }
                b"text:tab" if in_paragraph && annotation_depth == 0 => text.push('\t'),
                b"text:line-break" if in_paragraph && annotation_depth == 0 => text.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_paragraph && annotation_depth == 0 => {
                text.push_str(&e.unescape().context("Invalid text in cell")?);
            }
            Event::CData(e) if in_paragraph && annotation_depth == 0 => {
                text.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Event::End(e) => match e.name().as_ref() {
                b"text:p" if annotation_depth == 0 => in_paragraph = false,
                b"office:annotation" => annotation_depth = annotation_depth.saturating_sub(1),
                b"table:table-cell" | b"table:covered-table-cell" => {
                    if let Some((_, builder)) = table.as_mut() {
                        builder.push_cell(std::mem::take(&mut text), cell_repeat);
                    }
                    in_cell = false;
                    in_paragraph = false;
                }
                b"table:table-row" => {
                    if let Some((_, builder)) = table.as_mut() {
                        builder.finish_row(row_repeat);
                    }
                }
                b"table:table" => {
                    if let Some((name, builder)) = table.take() {
                        tables.push(Table {
                            name,
                            rows: builder.rows,
                        });
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(tables)
}

fn attr_string(e: &BytesStart<'_>, key: &[u8]) -> String {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
        .unwrap_or_default()
}

/// Repeat counters default to 1 when absent or malformed
fn attr_count(e: &BytesStart<'_>, key: &[u8]) -> usize {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| String::from_utf8_lossy(&attr.value).parse::<usize>().ok())
        .unwrap_or(1)
}

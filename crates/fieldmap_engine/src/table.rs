//! Table readers: turn an uploaded CSV or spreadsheet file into a [`RawTable`].

use std::fs;
use std::io;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use fieldmap_core::{Cell, RawTable};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("unsupported file type {0:?}; expected csv or a spreadsheet")]
    UnsupportedFormat(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("workbook has no worksheets")]
    NoWorksheet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Delimited,
    Spreadsheet,
}

pub fn detect_format(path: &Path) -> Result<TableFormat, TableError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "csv" | "tsv" | "txt" => Ok(TableFormat::Delimited),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(TableFormat::Spreadsheet),
        _ => Err(TableError::UnsupportedFormat(ext)),
    }
}

/// Read the first row as headers and every following row as data.
pub fn read_table(path: &Path) -> Result<RawTable, TableError> {
    match detect_format(path)? {
        TableFormat::Delimited => {
            let content = decode_text(fs::read(path)?);
            parse_delimited(&content)
        }
        TableFormat::Spreadsheet => read_spreadsheet(path),
    }
}

/// Decode as UTF-8, falling back to Windows-1252 (common for Excel-exported CSVs).
pub fn decode_text(bytes: Vec<u8>) -> String {
    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

/// Parse delimited text, sniffing the delimiter from the first lines.
pub fn parse_delimited(content: &str) -> Result<RawTable, TableError> {
    parse_csv(content, sniff_delimiter(content))
}

pub fn parse_csv(content: &str, delimiter: u8) -> Result<RawTable, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        Cell::Empty
                    } else {
                        Cell::text(field)
                    }
                })
                .collect(),
        );
    }

    Ok(RawTable::new(headers, rows))
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    let mut best = b',';
    let mut best_score = 0usize;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        let target = counts.first().copied().unwrap_or(0);
        if target <= 1 {
            continue;
        }

        // More consistent lines win; a higher field count breaks ties.
        let consistent = counts.iter().filter(|&&c| c == target).count();
        let score = consistent * target;
        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

fn read_spreadsheet(path: &Path) -> Result<RawTable, TableError> {
    let mut workbook = open_workbook_auto(path)?;
    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(TableError::NoWorksheet)?;
    let range = workbook.worksheet_range(&first)?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|header| {
            header
                .iter()
                .map(|data| data.to_string().trim().to_string())
                .collect()
        })
        .unwrap_or_default();
    let rows = rows
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();

    Ok(RawTable::new(headers, rows))
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        other => Cell::Text(other.to_string()),
    }
}

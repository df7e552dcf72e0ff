use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::errors::PackError;

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("no header row")]
    NoHeader,

    #[error("line {line}: quoted cell is never closed")]
    UnterminatedQuote { line: usize },

    #[error("line {line}: expected {expected} fields, saw {found}")]
    RowTooLong {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// A tab-separated table with a header row. Cells are kept as text;
/// cells missing at the end of a short row are empty strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// `Ok(None)` when the file does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>, PackError> {
        if !path.is_file() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
            .map(Some)
            .map_err(|e| PackError::malformed(path, e.to_string()))
    }

    pub fn parse(text: &str) -> Result<Self, TableError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut records = split_records(text)?.into_iter();
        let headers = records.next().ok_or(TableError::NoHeader)?.cells;

        let mut rows = Vec::new();
        for record in records {
            let mut cells = record.cells;
            if cells.len() > headers.len() {
                return Err(TableError::RowTooLong {
                    line: record.line,
                    expected: headers.len(),
                    found: cells.len(),
                });
            }
            cells.resize(headers.len(), String::new());
            rows.push(cells);
        }

        Ok(Table { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column with exactly this header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[index].as_str()).collect())
    }
}

/// One row of the file. A quoted cell may carry it over several lines.
struct Record {
    /// Line the record starts on, 1-based.
    line: usize,
    cells: Vec<String>,
}

/// Splits text into records of cells.
///
/// Tabs and line breaks inside a quoted cell belong to the cell, and `""`
/// inside quotes is a literal quote. A line of nothing but spaces is skipped;
/// a line of bare tabs is a row of empty cells.
fn split_records(text: &str) -> Result<Vec<Record>, TableError> {
    let mut records = Vec::new();
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut line = 1;
    let mut record_line = 1;
    let mut blank = true;
    let mut quoted = false;
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    cell.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    cell.push(c);
                }
                _ => cell.push(c),
            }
            continue;
        }
        match c {
            '"' if cell.is_empty() && !quoted => {
                in_quotes = true;
                quoted = true;
                blank = false;
            }
            '\t' => {
                cells.push(std::mem::take(&mut cell));
                quoted = false;
                blank = false;
            }
            '\r' if matches!(chars.peek(), Some(&'\n') | None) => {}
            '\n' => {
                if blank {
                    cell.clear();
                } else {
                    cells.push(std::mem::take(&mut cell));
                    records.push(Record {
                        line: record_line,
                        cells: std::mem::take(&mut cells),
                    });
                }
                quoted = false;
                blank = true;
                line += 1;
                record_line = line;
            }
            ' ' => cell.push(c),
            _ => {
                cell.push(c);
                blank = false;
            }
        }
    }

    if in_quotes {
        return Err(TableError::UnterminatedQuote { line: record_line });
    }
    if !blank {
        cells.push(cell);
        records.push(Record {
            line: record_line,
            cells,
        });
    }
    Ok(records)
}

/// Numeric cell. An empty cell is missing data and reads as NaN.
pub fn parse_float(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Some(f64::NAN);
    }
    cell.parse().ok()
}

/// Integer cell, accepting integral float spellings such as `2.0`.
pub fn parse_int(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    cell.parse::<i64>().ok().or_else(|| {
        cell.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0)
            .map(|v| v as i64)
    })
}

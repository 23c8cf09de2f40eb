//! In-memory model of the wide match-record table.
//!
//! Cells are kept as raw text so a load/save round trip never reformats
//! values the engines did not touch. The empty string is the missing-value
//! marker; numeric columns may be float-formatted by upstream tooling
//! ("6.0" for 6), so numeric access parses as f64.

use crate::error::FixError;
use rustc_hash::FxHashMap;

/// Missing-value marker, distinct from the literal value zero.
pub const MISSING: &str = "";

/// Header + rows, with O(1) column lookup by name.
#[derive(Debug, Clone)]
pub struct MatchTable {
    headers: Vec<String>,
    col_index: FxHashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl MatchTable {
    pub fn new(headers: Vec<String>) -> Result<Self, FixError> {
        let mut col_index = FxHashMap::default();
        for (i, h) in headers.iter().enumerate() {
            if col_index.insert(h.clone(), i).is_some() {
                return Err(FixError::DuplicateColumn(h.clone()));
            }
        }
        Ok(Self { headers, col_index, rows: Vec::new() })
    }

    /// Build a table from string literals. Test convenience.
    pub fn from_rows(headers: &[&str], rows: &[&[&str]]) -> Result<Self, FixError> {
        let mut table = Self::new(headers.iter().map(|h| h.to_string()).collect())?;
        for row in rows {
            table.push_row(row.iter().map(|c| c.to_string()).collect())?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: Vec<String>) -> Result<(), FixError> {
        if row.len() != self.headers.len() {
            return Err(FixError::RowLength { expected: self.headers.len(), found: row.len() });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.headers.len()
    }

    pub fn row(&self, row: usize) -> &[String] {
        &self.rows[row]
    }

    /// Column index by name, `None` when the schema lacks it.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.col_index.get(name).copied()
    }

    pub fn require_column(&self, name: &str) -> Result<usize, FixError> {
        self.column(name).ok_or_else(|| FixError::MissingColumn(name.to_string()))
    }

    /// Append a column filled with the missing marker. Returns the new
    /// index; a pre-existing column of the same name is returned as is.
    pub fn add_column(&mut self, name: &str) -> usize {
        if let Some(i) = self.column(name) {
            return i;
        }
        let i = self.headers.len();
        self.headers.push(name.to_string());
        self.col_index.insert(name.to_string(), i);
        for row in &mut self.rows {
            row.push(MISSING.to_string());
        }
        i
    }

    pub fn get(&self, row: usize, col: usize) -> &str {
        &self.rows[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: String) {
        self.rows[row][col] = value;
    }

    /// Blank or whitespace-only cells count as missing.
    pub fn is_missing(&self, row: usize, col: usize) -> bool {
        self.rows[row][col].trim().is_empty()
    }

    pub fn set_missing(&mut self, row: usize, col: usize) {
        self.rows[row][col] = MISSING.to_string();
    }

    /// Numeric view of a cell. Missing or unparseable text is `None`.
    pub fn get_num(&self, row: usize, col: usize) -> Option<f64> {
        let raw = self.rows[row][col].trim();
        if raw.is_empty() {
            return None;
        }
        raw.parse::<f64>().ok()
    }

    /// Exact-zero test; missing and non-numeric cells are not zero.
    pub fn is_zero(&self, row: usize, col: usize) -> bool {
        self.get_num(row, col) == Some(0.0)
    }

    /// Count missing cells across the given columns.
    pub fn count_missing(&self, cols: &[usize]) -> u64 {
        let mut n = 0;
        for row in 0..self.rows.len() {
            for &col in cols {
                if self.is_missing(row, col) {
                    n += 1;
                }
            }
        }
        n
    }

    /// Count exact-zero cells across the given columns.
    pub fn count_zeros(&self, cols: &[usize]) -> u64 {
        let mut n = 0;
        for row in 0..self.rows.len() {
            for &col in cols {
                if self.is_zero(row, col) {
                    n += 1;
                }
            }
        }
        n
    }
}

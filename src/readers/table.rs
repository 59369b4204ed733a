use crate::error::{ProcessingError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::Path;

/// A fully materialized CSV table with its header row.
#[derive(Debug, Clone)]
pub struct CsvTable {
    name: String,
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl CsvTable {
    /// Read a table from disk. The file is decoded as UTF-8 with any BOM removed.
    pub fn read(name: &str, path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(&bytes);
        if had_errors {
            tracing::warn!(
                table = name,
                path = %path.display(),
                "Input contains invalid UTF-8; offending bytes were replaced"
            );
        }
        Self::from_text(name, &text)
    }

    pub fn from_text(name: &str, text: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::debug!(table = name, rows = rows.len(), "Loaded CSV table");

        Ok(Self {
            name: name.to_string(),
            headers,
            rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<StringRecord> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column, matched case-insensitively.
    pub fn column(&self, column: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(column))
    }

    pub fn require(&self, column: &str) -> Result<usize> {
        self.column(column)
            .ok_or_else(|| ProcessingError::missing_column(&self.name, column))
    }

    /// First present column among `candidates`, in preference order.
    pub fn require_any(&self, candidates: &[&str]) -> Result<usize> {
        candidates
            .iter()
            .find_map(|c| self.column(c))
            .ok_or_else(|| ProcessingError::missing_column(&self.name, &candidates.join("/")))
    }
}

/// Non-empty cell content, or `None` for empty or short rows.
pub fn cell(row: &StringRecord, index: usize) -> Option<&str> {
    row.get(index).filter(|value| !value.is_empty())
}

/// Parse a real number, accepting a decimal comma; `nan`-like cells are absent.
pub fn parse_real(raw: Option<&str>) -> Option<f64> {
    let value = raw?.replace(',', ".").parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

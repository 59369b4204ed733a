use crate::error::Result;
use crate::readers::CsvTable;
use crate::utils::timestamp::normalize_time;
use crate::writers::CsvWriter;
use csv::StringRecord;
use std::path::Path;

/// Rewrites one time column of an arbitrary table to canonical `HH:MM`.
pub struct TimeCleaner {
    column: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanSummary {
    pub rows: usize,
    pub cleared: usize,
}

impl TimeCleaner {
    pub fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
        }
    }

    pub fn clean_file(&self, input: &Path, output: &Path) -> Result<CleanSummary> {
        let table = CsvTable::read("input", input)?;
        let (rows, summary) = self.clean_table(&table)?;
        CsvWriter::new().write_table(table.headers(), &rows, output)?;

        tracing::info!(
            rows = summary.rows,
            cleared = summary.cleared,
            column = %self.column,
            path = %output.display(),
            "Wrote cleaned table"
        );
        Ok(summary)
    }

    /// Unparsable cells become empty; every other column is copied verbatim.
    pub fn clean_table(&self, table: &CsvTable) -> Result<(Vec<StringRecord>, CleanSummary)> {
        let index = table.require(&self.column)?;
        let mut summary = CleanSummary::default();

        let rows = table
            .rows()
            .iter()
            .map(|row| {
                summary.rows += 1;
                row.iter()
                    .enumerate()
                    .map(|(i, value)| {
                        if i != index {
                            return value.to_string();
                        }
                        normalize_time(value).unwrap_or_else(|| {
                            summary.cleared += 1;
                            String::new()
                        })
                    })
                    .collect::<StringRecord>()
            })
            .collect();

        Ok((rows, summary))
    }
}

use crate::error::Result;
use crate::models::{CaptureRecord, CaptureTable};
use crate::readers::table::{cell, CsvTable};
use crate::utils::constants::*;
use std::path::Path;

pub struct CaptureReader;

impl CaptureReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the capture log written by the camera acquisition loop
    pub fn read_captures(&self, path: &Path) -> Result<CaptureTable> {
        let table = CsvTable::read(TABLE_CAPTURES, path)?;
        self.parse_table(&table)
    }

    pub fn parse_table(&self, table: &CsvTable) -> Result<CaptureTable> {
        let date_idx = table.require(COL_DATE)?;
        let time_idx = table.require(COL_TIME)?;
        let street_idx = table.require(COL_STREET)?;
        let image_idx = table.require(COL_IMAGE_PATH)?;
        let city_idx = table.column(COL_CITY);

        let records = table
            .rows()
            .iter()
            .map(|row| {
                let owned = |idx: usize| cell(row, idx).map(str::to_string);
                CaptureRecord::new(
                    owned(date_idx).unwrap_or_default(),
                    owned(time_idx),
                    owned(street_idx).unwrap_or_default(),
                    owned(image_idx).unwrap_or_default(),
                )
                .with_city(city_idx.and_then(owned))
            })
            .collect::<Vec<_>>();

        tracing::info!(
            rows = records.len(),
            has_city = city_idx.is_some(),
            "Read capture table"
        );

        Ok(CaptureTable::new(records).with_city_column(city_idx.is_some()))
    }
}

impl Default for CaptureReader {
    fn default() -> Self {
        Self::new()
    }
}

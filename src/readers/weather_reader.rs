use crate::error::Result;
use crate::models::{RainCategory, WeatherRecord};
use crate::readers::table::{cell, parse_real, CsvTable};
use crate::utils::constants::*;
use std::path::Path;
use validator::Validate;

pub struct WeatherReader;

impl WeatherReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the weather log written by the polling loop
    pub fn read_weather(&self, path: &Path) -> Result<Vec<WeatherRecord>> {
        let table = CsvTable::read(TABLE_WEATHER, path)?;
        self.parse_table(&table)
    }

    pub fn parse_table(&self, table: &CsvTable) -> Result<Vec<WeatherRecord>> {
        let date_idx = table.require(COL_DATE)?;
        let time_idx = table.require(COL_TIME)?;
        let temp_idx = table.require(COL_TEMPERATURE)?;
        let precip_idx = table.require(COL_PRECIPITATION)?;
        let rain_idx = table.column(COL_RAIN);

        let mut records = Vec::with_capacity(table.len());

        for (line, row) in table.rows().iter().enumerate() {
            let record = WeatherRecord::from_reading(
                cell(row, date_idx).unwrap_or_default().to_string(),
                cell(row, time_idx).map(str::to_string),
                parse_real(cell(row, temp_idx)),
                parse_real(cell(row, precip_idx)),
                rain_idx
                    .and_then(|idx| cell(row, idx))
                    .and_then(RainCategory::parse),
            );

            if let Err(e) = record.validate() {
                tracing::warn!(
                    row = line + 2,
                    error = %e,
                    "Skipping weather reading with negative precipitation"
                );
                continue;
            }

            records.push(record);
        }

        tracing::info!(rows = records.len(), "Read weather table");
        Ok(records)
    }
}

impl Default for WeatherReader {
    fn default() -> Self {
        Self::new()
    }
}

use crate::error::Result;
use crate::models::{DetectionRecord, DetectionTable, TrafficLevel};
use crate::readers::table::{cell, CsvTable};
use crate::utils::constants::*;
use csv::StringRecord;
use std::path::Path;

pub struct DetectionReader;

impl DetectionReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the per-image vehicle counts produced by the detector
    pub fn read_detections(&self, path: &Path) -> Result<DetectionTable> {
        let table = CsvTable::read(TABLE_DETECTIONS, path)?;
        self.parse_table(&table)
    }

    pub fn parse_table(&self, table: &CsvTable) -> Result<DetectionTable> {
        let image_idx = table.require_any(&[COL_PHOTO, COL_FILE])?;
        let count_idx = table.require(COL_VEHICLE_COUNT)?;
        let level_idx = table.column(COL_TRAFFIC_LEVEL);

        let mut detections = Vec::with_capacity(table.len());
        let mut skipped = 0usize;

        for (line, row) in table.rows().iter().enumerate() {
            match self.parse_row(row, image_idx, count_idx, level_idx) {
                Some(detection) => detections.push(detection),
                None => {
                    skipped += 1;
                    tracing::warn!(
                        row = line + 2,
                        "Skipping detection row without image or valid vehicle count"
                    );
                }
            }
        }

        tracing::info!(rows = detections.len(), skipped, "Read detection table");
        Ok(DetectionTable {
            records: detections,
            skipped,
        })
    }

    fn parse_row(
        &self,
        row: &StringRecord,
        image_idx: usize,
        count_idx: usize,
        level_idx: Option<usize>,
    ) -> Option<DetectionRecord> {
        let image_ref = cell(row, image_idx)?.to_string();
        let vehicle_count = parse_count(cell(row, count_idx)?)?;
        let reported = level_idx
            .and_then(|idx| cell(row, idx))
            .and_then(TrafficLevel::parse);

        Some(DetectionRecord::new(image_ref, vehicle_count).with_reported_level(reported))
    }
}

impl Default for DetectionReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts may have been serialized as floats (`12.0`); fractional or negative values are rejected.
fn parse_count(raw: &str) -> Option<u32> {
    if let Ok(count) = raw.parse::<u32>() {
        return Some(count);
    }
    let value = raw.parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64)
        .then_some(value as u32)
}

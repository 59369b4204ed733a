use crate::models::labels::{RainCategory, TimeBucket, TrafficLevel, WorkdayLabel};
use crate::utils::constants::*;
use serde::{Deserialize, Serialize};

/// One row of the labeled output dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub city: Option<String>,
    pub street: String,
    pub date: String,
    pub time: Option<String>,
    pub image_ref: String,
    pub vehicle_count: u32,
    pub traffic_level: TrafficLevel,
    pub temperature: Option<f64>,
    pub rain: Option<RainCategory>,
    pub precipitation_mm: Option<f64>,
    pub workday: Option<WorkdayLabel>,
    pub time_bucket: Option<TimeBucket>,
}

impl MergedRecord {
    pub fn has_weather(&self) -> bool {
        self.temperature.is_some() || self.rain.is_some() || self.precipitation_mm.is_some()
    }
}

/// Output table in final row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedDataset {
    pub records: Vec<MergedRecord>,
    pub include_city: bool,
}

impl MergedDataset {
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = Vec::with_capacity(12);
        if self.include_city {
            columns.push(COL_CITY);
        }
        columns.extend([
            COL_STREET,
            COL_DATE,
            COL_TIME,
            COL_IMAGE_PATH,
            COL_VEHICLE_COUNT,
            COL_TRAFFIC_LEVEL,
            COL_TEMPERATURE,
            COL_RAIN,
            COL_PRECIPITATION,
            COL_WORKDAY,
            COL_TIME_BUCKET,
        ]);
        columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

use crate::models::labels::TrafficLevel;
use crate::utils::filename::image_key;
use serde::{Deserialize, Serialize};

/// Vehicle count the external detector produced for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub image_ref: String,
    pub vehicle_count: u32,
    /// Always derived from `vehicle_count`.
    pub traffic_level: TrafficLevel,
    /// Label found in the source file, kept only for consistency checks.
    pub reported_level: Option<TrafficLevel>,
}

impl DetectionRecord {
    pub fn new(image_ref: String, vehicle_count: u32) -> Self {
        Self {
            image_ref,
            vehicle_count,
            traffic_level: TrafficLevel::from_count(vehicle_count),
            reported_level: None,
        }
    }

    pub fn with_reported_level(mut self, reported_level: Option<TrafficLevel>) -> Self {
        self.reported_level = reported_level;
        self
    }

    pub fn image_key(&self) -> String {
        image_key(&self.image_ref)
    }

    pub fn has_label_mismatch(&self) -> bool {
        self.reported_level
            .is_some_and(|reported| reported != self.traffic_level)
    }
}

/// Detections read from the detector output plus rows that had no usable count.
#[derive(Debug, Clone, Default)]
pub struct DetectionTable {
    pub records: Vec<DetectionRecord>,
    pub skipped: usize,
}

impl DetectionTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

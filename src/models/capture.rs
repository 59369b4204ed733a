use crate::utils::filename::image_key;
use serde::{Deserialize, Serialize};

/// One camera frame saved by the acquisition loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureRecord {
    pub date: String,
    /// Time text exactly as logged; normalized later by the assembler.
    pub time: Option<String>,
    pub street: String,
    pub city: Option<String>,
    pub image_ref: String,
}

impl CaptureRecord {
    pub fn new(date: String, time: Option<String>, street: String, image_ref: String) -> Self {
        Self {
            date,
            time,
            street,
            city: None,
            image_ref,
        }
    }

    pub fn with_city(mut self, city: Option<String>) -> Self {
        self.city = city;
        self
    }

    /// Join key shared with detection records.
    pub fn image_key(&self) -> String {
        image_key(&self.image_ref)
    }
}

/// Capture rows plus whether the source schema carried the optional city column.
#[derive(Debug, Clone, Default)]
pub struct CaptureTable {
    pub records: Vec<CaptureRecord>,
    pub has_city: bool,
}

impl CaptureTable {
    pub fn new(records: Vec<CaptureRecord>) -> Self {
        Self {
            records,
            has_city: false,
        }
    }

    pub fn with_city_column(mut self, has_city: bool) -> Self {
        self.has_city = has_city;
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

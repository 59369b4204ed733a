use crate::models::labels::RainCategory;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One poll of the weather feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WeatherRecord {
    pub date: String,
    pub time: Option<String>,

    pub temperature: Option<f64>,

    pub rain: Option<RainCategory>,

    // L/m², rounded to 2 decimals
    #[validate(range(min = 0.0))]
    pub precipitation_mm: Option<f64>,
}

impl WeatherRecord {
    /// Build a record from raw readings.
    ///
    /// Precipitation is rounded to 2 decimals and the rain category derived
    /// from it. The `rain_label` is only consulted when no precipitation
    /// reading exists.
    pub fn from_reading(
        date: String,
        time: Option<String>,
        temperature: Option<f64>,
        precipitation_mm: Option<f64>,
        rain_label: Option<RainCategory>,
    ) -> Self {
        let precipitation_mm = precipitation_mm.map(round_hundredths);
        let rain = precipitation_mm
            .map(RainCategory::from_precipitation)
            .or(rain_label);

        Self {
            date,
            time,
            temperature,
            rain,
            precipitation_mm,
        }
    }
}

pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

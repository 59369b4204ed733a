pub mod capture;
pub mod detection;
pub mod labels;
pub mod merged;
pub mod weather;

pub use capture::{CaptureRecord, CaptureTable};
pub use detection::{DetectionRecord, DetectionTable};
pub use labels::{RainCategory, TimeBucket, TrafficLevel, WorkdayLabel};
pub use merged::{MergedDataset, MergedRecord};
pub use weather::WeatherRecord;

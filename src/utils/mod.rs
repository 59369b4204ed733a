pub mod constants;
pub mod filename;
pub mod progress;
pub mod timestamp;

pub use constants::*;
pub use filename::{cleaned_filename, image_key};
pub use progress::ProgressReporter;
pub use timestamp::{combine, format_time, normalize_time, parse_date, parse_time};

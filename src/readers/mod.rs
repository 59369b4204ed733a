pub mod capture_reader;
pub mod detection_reader;
pub mod table;
pub mod weather_reader;

pub use capture_reader::CaptureReader;
pub use detection_reader::DetectionReader;
pub use table::CsvTable;
pub use weather_reader::WeatherReader;

/// Capture table columns
pub const COL_DATE: &str = "fecha";
pub const COL_TIME: &str = "hora";
pub const COL_STREET: &str = "calle";
pub const COL_CITY: &str = "ciudad";
pub const COL_IMAGE_PATH: &str = "ruta_imagen";

/// Detection table columns
pub const COL_PHOTO: &str = "foto";
pub const COL_FILE: &str = "archivo";
pub const COL_VEHICLE_COUNT: &str = "num_vehiculos";
pub const COL_TRAFFIC_LEVEL: &str = "nivel_trafico";

/// Weather table columns
pub const COL_TEMPERATURE: &str = "temperatura";
pub const COL_RAIN: &str = "lluvia";
pub const COL_PRECIPITATION: &str = "litros_m2";

/// Derived output columns
pub const COL_WORKDAY: &str = "laborable";
pub const COL_TIME_BUCKET: &str = "franja_horaria";

/// Table names used in diagnostics
pub const TABLE_CAPTURES: &str = "capture";
pub const TABLE_DETECTIONS: &str = "detection";
pub const TABLE_WEATHER: &str = "weather";

/// Join defaults
pub const DEFAULT_TOLERANCE_MINUTES: u32 = 2;
pub const MAX_TOLERANCE_MINUTES: u32 = 24 * 60;

/// Traffic level thresholds (inclusive upper bounds)
pub const TRAFFIC_LOW_MAX: u32 = 5;
pub const TRAFFIC_MEDIUM_MAX: u32 = 15;

/// Rain category thresholds in L/m² (inclusive upper bounds)
pub const RAIN_NONE_MAX: f64 = 0.1;
pub const RAIN_LIGHT_MAX: f64 = 0.3;

/// Canonical formats
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Suffix appended to cleaned file stems
pub const CLEANED_SUFFIX: &str = "_limpio";

/// Environment variable prefix for settings overrides
pub const ENV_PREFIX: &str = "TRAFFIC";

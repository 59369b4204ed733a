//! Layered run configuration.
//!
//! Sources, lowest precedence first: the embedded `config/default.toml`, an
//! optional user TOML file, `TRAFFIC__<SECTION>__<KEY>` environment variables,
//! then explicit overrides from the command line.
use crate::error::Result;
use crate::processors::{CalendarClassifier, ToleranceJoin};
use crate::utils::constants::{ENV_PREFIX, MAX_TOLERANCE_MINUTES};
use chrono::{NaiveDate, Weekday};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use validator::{Validate, ValidationError, ValidationErrors};

const DEFAULT_SETTINGS: &str = include_str!("../config/default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub inputs: InputPaths,
    pub join: JoinSettings,
    pub calendar: CalendarSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputPaths {
    pub captures: PathBuf,
    pub detections: PathBuf,
    pub weather: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JoinSettings {
    pub tolerance_minutes: u32,
}

impl JoinSettings {
    /// Tolerance must stay within one day.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        if self.tolerance_minutes > MAX_TOLERANCE_MINUTES {
            let mut errors = ValidationErrors::new();
            let mut error = ValidationError::new("range");
            error.add_param("max".into(), &MAX_TOLERANCE_MINUTES);
            error.add_param("value".into(), &self.tolerance_minutes);
            errors.add("tolerance_minutes", error);
            return Err(errors);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CalendarSettings {
    #[validate(length(max = 7))]
    pub weekend: Vec<Weekday>,

    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}

/// Command-line values that take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub captures: Option<PathBuf>,
    pub detections: Option<PathBuf>,
    pub weather: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub tolerance_minutes: Option<u32>,
}

impl Settings {
    /// Load settings from the built-in defaults, an optional file and the environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml));

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Result<Self> {
        let SettingsOverrides {
            captures,
            detections,
            weather,
            output,
            tolerance_minutes,
        } = overrides;

        if let Some(path) = captures {
            self.inputs.captures = path;
        }
        if let Some(path) = detections {
            self.inputs.detections = path;
        }
        if let Some(path) = weather {
            self.inputs.weather = path;
        }
        if let Some(path) = output {
            self.inputs.output = path;
        }
        if let Some(minutes) = tolerance_minutes {
            self.join.tolerance_minutes = minutes;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        self.join.validate()?;
        self.calendar.validate()?;
        Ok(())
    }

    pub fn tolerance_join(&self) -> ToleranceJoin {
        ToleranceJoin::from_minutes(self.join.tolerance_minutes)
    }

    pub fn calendar(&self) -> CalendarClassifier {
        CalendarClassifier::new(
            self.calendar.weekend.clone(),
            self.calendar.holidays.iter().copied(),
        )
    }

    pub fn log_settings(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  captures   : {}", self.inputs.captures.display());
        tracing::info!("  detections : {}", self.inputs.detections.display());
        tracing::info!("  weather    : {}", self.inputs.weather.display());
        tracing::info!("  output     : {}", self.inputs.output.display());
        tracing::info!("  tolerance  : {} min", self.join.tolerance_minutes);
        tracing::info!(
            "  calendar   : weekend {:?}, {} holidays",
            self.calendar.weekend,
            self.calendar.holidays.len()
        );
    }
}

use crate::utils::constants::{RAIN_LIGHT_MAX, RAIN_NONE_MAX, TRAFFIC_LOW_MAX, TRAFFIC_MEDIUM_MAX};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowercase and strip the Spanish diacritics used by the source labels.
fn fold(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrafficLevel {
    Low,
    Medium,
    High,
}

impl TrafficLevel {
    pub fn from_count(count: u32) -> Self {
        match count {
            c if c <= TRAFFIC_LOW_MAX => TrafficLevel::Low,
            c if c <= TRAFFIC_MEDIUM_MAX => TrafficLevel::Medium,
            _ => TrafficLevel::High,
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match fold(label).as_str() {
            "bajo" | "low" => Some(TrafficLevel::Low),
            "medio" | "medium" => Some(TrafficLevel::Medium),
            "alto" | "high" => Some(TrafficLevel::High),
            _ => None,
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            TrafficLevel::Low => "Bajo",
            TrafficLevel::Medium => "Medio",
            TrafficLevel::High => "Alto",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RainCategory {
    None,
    Light,
    Yes,
}

impl RainCategory {
    pub fn from_precipitation(litres_m2: f64) -> Self {
        if litres_m2 <= RAIN_NONE_MAX {
            RainCategory::None
        } else if litres_m2 <= RAIN_LIGHT_MAX {
            RainCategory::Light
        } else {
            RainCategory::Yes
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match fold(label).as_str() {
            "no" | "none" => Some(RainCategory::None),
            "debil" | "light" => Some(RainCategory::Light),
            "si" | "yes" => Some(RainCategory::Yes),
            _ => None,
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            RainCategory::None => "No",
            RainCategory::Light => "Débil",
            RainCategory::Yes => "Sí",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkdayLabel {
    Workday,
    NonWorkday,
}

impl WorkdayLabel {
    pub fn as_label(&self) -> &'static str {
        match self {
            WorkdayLabel::Workday => "Laborable",
            WorkdayLabel::NonWorkday => "No laborable",
        }
    }
}

/// Named partition of the 24-hour day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeBucket {
    Dawn,
    Morning,
    Midday,
    Afternoon,
    Night,
}

impl TimeBucket {
    pub const ALL: [TimeBucket; 5] = [
        TimeBucket::Dawn,
        TimeBucket::Morning,
        TimeBucket::Midday,
        TimeBucket::Afternoon,
        TimeBucket::Night,
    ];

    pub fn as_label(&self) -> &'static str {
        match self {
            TimeBucket::Dawn => "madrugada",
            TimeBucket::Morning => "mañana",
            TimeBucket::Midday => "mediodía",
            TimeBucket::Afternoon => "tarde",
            TimeBucket::Night => "noche",
        }
    }
}

macro_rules! impl_label_display {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_label())
                }
            }
        )*
    };
}

impl_label_display!(TrafficLevel, RainCategory, WorkdayLabel, TimeBucket);

use crate::utils::constants::{DATE_FORMAT, TIME_FORMAT};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;
use std::sync::OnceLock;

/// Compact datetime layouts tried when no `H:MM` substring is present
const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y%m%dT%H%M%S",
    "%Y%m%dT%H%M",
    "%Y%m%d%H%M%S",
    "%Y%m%d%H%M",
    "%Y-%m-%dT%H%M%S",
    "%Y-%m-%dT%H%M",
];

/// Date-only layouts; a bare date means midnight
const FALLBACK_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%d/%m/%Y"];

fn hour_minute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\b([01]?\d|2[0-3]):([0-5]\d)\b").expect("hour-minute pattern is valid")
    })
}

/// `7 PM`, `7PM`, `11.30 a.m.`
fn twelve_hour_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(0?[1-9]|1[0-2])(?:\.([0-5]\d))?\s*([ap])\.?\s*m\.?$")
            .expect("twelve-hour pattern is valid")
    })
}

fn whitespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Extract a wall-clock time from free-form text.
///
/// The first word-bounded `H:MM`/`HH:MM` occurrence wins, so
/// `"2025-03-01 9:05:59"` yields 09:05 and seconds are discarded. Text without
/// such a substring is parsed as a whole: compact ISO-8601 datetimes, 12-hour
/// clock text (`7 PM`), then bare dates, which mean midnight. Anything else
/// yields `None`.
///
/// # Examples
/// ```
/// use traffic_correlator::utils::timestamp::parse_time;
/// use chrono::NaiveTime;
///
/// let time = parse_time("2025-03-01 9:05:59").unwrap();
/// assert_eq!(time, NaiveTime::from_hms_opt(9, 5, 0).unwrap());
/// assert!(parse_time("sin hora").is_none());
/// ```
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let collapsed = whitespace_pattern().replace_all(raw, " ");
    let text = collapsed.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(caps) = hour_minute_pattern().captures(text) {
        let hour = caps[1].parse::<u32>().ok()?;
        let minute = caps[2].parse::<u32>().ok()?;
        return NaiveTime::from_hms_opt(hour, minute, 0);
    }

    parse_whole(text).and_then(|time| NaiveTime::from_hms_opt(time.hour(), time.minute(), 0))
}

fn parse_whole(text: &str) -> Option<NaiveTime> {
    if let Some(dt) = FALLBACK_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(dt.time());
    }

    if let Some(caps) = twelve_hour_pattern().captures(text) {
        let hour = caps[1].parse::<u32>().ok()? % 12;
        let minute = match caps.get(2) {
            Some(m) => m.as_str().parse::<u32>().ok()?,
            None => 0,
        };
        let offset = if caps[3].eq_ignore_ascii_case("p") { 12 } else { 0 };
        return NaiveTime::from_hms_opt(hour + offset, minute, 0);
    }

    FALLBACK_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.time())
}

/// Normalize free-form time text to canonical zero-padded `HH:MM`.
pub fn normalize_time(raw: &str) -> Option<String> {
    parse_time(raw).map(format_time)
}

/// Normalize an optional cell; absent input stays absent.
pub fn normalize_time_opt(raw: Option<&str>) -> Option<String> {
    raw.and_then(normalize_time)
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Combine a `YYYY-MM-DD` date with free-form time text into an instant.
pub fn combine(date: &str, time: Option<&str>) -> Option<NaiveDateTime> {
    let time = parse_time(time?)?;
    let date = parse_date(date)?;
    Some(date.and_time(time))
}

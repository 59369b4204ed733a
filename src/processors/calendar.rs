use crate::models::{TimeBucket, WorkdayLabel};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use std::collections::BTreeSet;

/// Labels dates as workdays and instants by time of day.
///
/// The holiday table is injected data; nothing here knows which region or
/// year it describes.
#[derive(Debug, Clone)]
pub struct CalendarClassifier {
    weekend: Vec<Weekday>,
    holidays: BTreeSet<NaiveDate>,
}

impl CalendarClassifier {
    pub fn new(weekend: Vec<Weekday>, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            weekend,
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Saturday/Sunday weekend and no holidays.
    pub fn weekends_only() -> Self {
        Self::new(vec![Weekday::Sat, Weekday::Sun], Vec::<NaiveDate>::new())
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    pub fn holiday_count(&self) -> usize {
        self.holidays.len()
    }

    pub fn workday_label(&self, date: NaiveDate) -> WorkdayLabel {
        if self.weekend.contains(&date.weekday()) || self.is_holiday(date) {
            WorkdayLabel::NonWorkday
        } else {
            WorkdayLabel::Workday
        }
    }

    pub fn time_bucket(&self, instant: NaiveDateTime) -> TimeBucket {
        bucket_for_hour(instant.hour())
    }
}

impl Default for CalendarClassifier {
    fn default() -> Self {
        Self::weekends_only()
    }
}

pub fn bucket_for_hour(hour: u32) -> TimeBucket {
    match hour {
        5..=7 => TimeBucket::Dawn,
        8..=12 => TimeBucket::Morning,
        13..=16 => TimeBucket::Midday,
        17..=20 => TimeBucket::Afternoon,
        _ => TimeBucket::Night,
    }
}

use crate::utils::constants::DEFAULT_TOLERANCE_MINUTES;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::HashMap;

/// Anything that may carry an instant on the join axis.
pub trait Timestamped {
    fn instant(&self) -> Option<NaiveDateTime>;
}

/// Candidate on the right side: original index and its instant.
type Candidate = (usize, NaiveDateTime);

/// Left-outer nearest-instant join restricted to the same calendar date.
#[derive(Debug, Clone, Copy)]
pub struct ToleranceJoin {
    tolerance: Duration,
}

impl ToleranceJoin {
    pub fn new(tolerance: Duration) -> Self {
        Self { tolerance }
    }

    pub fn from_minutes(minutes: u32) -> Self {
        Self::new(Duration::minutes(i64::from(minutes)))
    }

    pub fn tolerance(&self) -> Duration {
        self.tolerance
    }

    /// Match every left record against the right side.
    ///
    /// Returns one entry per left record, in left order: the index of the
    /// chosen right record, or `None` when nothing on the same date lies within
    /// the tolerance (inclusive). Equally distant candidates resolve to the one
    /// appearing first in `right`.
    pub fn join<L, R>(&self, left: &[L], right: &[R]) -> Vec<Option<usize>>
    where
        L: Timestamped,
        R: Timestamped,
    {
        let partitions = Self::partition_by_date(right);

        left.iter()
            .map(|record| {
                let instant = record.instant()?;
                let candidates = partitions.get(&instant.date())?;
                self.nearest(candidates, instant)
            })
            .collect()
    }

    /// Group right-side instants by date, keeping original order within each group.
    fn partition_by_date<R: Timestamped>(right: &[R]) -> HashMap<NaiveDate, Vec<Candidate>> {
        let mut partitions: HashMap<NaiveDate, Vec<Candidate>> = HashMap::new();
        for (index, record) in right.iter().enumerate() {
            if let Some(instant) = record.instant() {
                partitions
                    .entry(instant.date())
                    .or_default()
                    .push((index, instant));
            }
        }
        partitions
    }

    fn nearest(&self, candidates: &[Candidate], instant: NaiveDateTime) -> Option<usize> {
        let mut best: Option<(usize, Duration)> = None;

        for &(index, candidate) in candidates {
            let distance = if candidate >= instant {
                candidate - instant
            } else {
                instant - candidate
            };
            if distance > self.tolerance {
                continue;
            }
            // strict comparison keeps the earliest index on ties
            if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                best = Some((index, distance));
            }
        }

        best.map(|(index, _)| index)
    }
}

impl Default for ToleranceJoin {
    fn default() -> Self {
        Self::from_minutes(DEFAULT_TOLERANCE_MINUTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl Timestamped for Option<NaiveDateTime> {
        fn instant(&self) -> Option<NaiveDateTime> {
            *self
        }
    }

    fn at(date: &str, time: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M:%S").ok()
    }

    #[test]
    fn test_prefers_nearest_within_tolerance() {
        let left = vec![at("2025-10-14", "10:00:00")];
        let right = vec![
            at("2025-10-14", "09:58:00"),
            at("2025-10-14", "10:01:00"),
            at("2025-10-14", "10:05:00"),
        ];

        let matches = ToleranceJoin::default().join(&left, &right);
        assert_eq!(matches, vec![Some(1)]);
    }

    #[test]
    fn test_tolerance_is_inclusive() {
        let left = vec![at("2025-10-14", "10:00:00")];
        let right = vec![at("2025-10-14", "10:02:00")];
        assert_eq!(ToleranceJoin::default().join(&left, &right), vec![Some(0)]);

        let right = vec![at("2025-10-14", "10:03:00")];
        assert_eq!(ToleranceJoin::default().join(&left, &right), vec![None]);
    }

    #[test]
    fn test_ties_resolve_to_first_index() {
        let left = vec![at("2025-10-14", "10:00:00")];
        let right = vec![
            at("2025-10-14", "10:01:00"),
            at("2025-10-14", "09:59:00"),
            at("2025-10-14", "10:01:00"),
        ];

        assert_eq!(ToleranceJoin::default().join(&left, &right), vec![Some(0)]);

        let reversed = vec![right[1], right[0]];
        assert_eq!(ToleranceJoin::default().join(&left, &reversed), vec![Some(0)]);
    }

    #[test]
    fn test_matches_stay_within_the_same_date() {
        let left = vec![at("2025-10-14", "23:59:00"), at("2025-10-15", "00:00:00")];
        let right = vec![at("2025-10-15", "00:00:00")];

        assert_eq!(
            ToleranceJoin::default().join(&left, &right),
            vec![None, Some(0)]
        );
    }

    #[test]
    fn test_left_records_are_always_preserved() {
        let left = vec![None, at("2025-10-14", "10:00:00"), at("2025-10-16", "10:00:00")];
        let right = vec![None, at("2025-10-14", "10:00:00")];

        let matches = ToleranceJoin::default().join(&left, &right);

        assert_eq!(matches.len(), left.len());
        assert_eq!(matches, vec![None, Some(1), None]);
    }

    #[test]
    fn test_custom_tolerance() {
        let left = vec![at("2025-10-14", "10:00:00")];
        let right = vec![at("2025-10-14", "10:05:00")];

        assert_eq!(ToleranceJoin::from_minutes(5).join(&left, &right), vec![Some(0)]);
        assert_eq!(ToleranceJoin::from_minutes(0).join(&left, &right), vec![None]);
    }
}

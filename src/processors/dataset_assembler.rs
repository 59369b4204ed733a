use crate::error::Result;
use crate::models::{
    CaptureRecord, CaptureTable, DetectionRecord, MergedDataset, MergedRecord, WeatherRecord,
};
use crate::processors::calendar::CalendarClassifier;
use crate::processors::merge_report::MergeReport;
use crate::processors::tolerance_join::{Timestamped, ToleranceJoin};
use crate::readers::{CaptureReader, DetectionReader, WeatherReader};
use crate::settings::{InputPaths, Settings};
use crate::utils::timestamp::{combine, format_time, normalize_time_opt, parse_date};
use crate::writers::CsvWriter;
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// A capture paired with its detection, with the time normalized.
struct ScoredCapture<'a> {
    capture: &'a CaptureRecord,
    detection: &'a DetectionRecord,
    instant: Option<NaiveDateTime>,
}

impl Timestamped for ScoredCapture<'_> {
    fn instant(&self) -> Option<NaiveDateTime> {
        self.instant
    }
}

struct TimedWeather<'a> {
    record: &'a WeatherRecord,
    instant: Option<NaiveDateTime>,
}

impl Timestamped for TimedWeather<'_> {
    fn instant(&self) -> Option<NaiveDateTime> {
        self.instant
    }
}

/// Builds the labeled traffic dataset from captures, detections and weather.
pub struct DatasetAssembler {
    inputs: InputPaths,
    join: ToleranceJoin,
    calendar: CalendarClassifier,
}

impl DatasetAssembler {
    pub fn new(inputs: InputPaths, join: ToleranceJoin, calendar: CalendarClassifier) -> Self {
        Self {
            inputs,
            join,
            calendar,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.inputs.clone(),
            settings.tolerance_join(),
            settings.calendar(),
        )
    }

    pub fn inputs(&self) -> &InputPaths {
        &self.inputs
    }

    /// Read the configured inputs, assemble, and write the output table.
    ///
    /// Any read error aborts before the output is touched. The output is
    /// persisted atomically once fully written.
    pub fn run(&self) -> Result<MergeReport> {
        let _span = tracing::info_span!("merge").entered();

        let captures = CaptureReader::new().read_captures(&self.inputs.captures)?;
        let detections = DetectionReader::new().read_detections(&self.inputs.detections)?;
        let weather = WeatherReader::new().read_weather(&self.inputs.weather)?;

        let (dataset, mut report) = self.assemble(&captures, &detections.records, &weather);
        report.detection_rows_skipped = detections.skipped;

        CsvWriter::new().write_dataset(&dataset, &self.inputs.output)?;
        tracing::info!(
            rows = dataset.len(),
            path = %self.inputs.output.display(),
            "Wrote merged dataset"
        );

        Ok(report)
    }

    /// Pure merge of already-loaded tables.
    pub fn assemble(
        &self,
        captures: &CaptureTable,
        detections: &[DetectionRecord],
        weather: &[WeatherRecord],
    ) -> (MergedDataset, MergeReport) {
        let mut report = MergeReport {
            capture_rows: captures.len(),
            detection_rows: detections.len(),
            traffic_label_mismatches: detections.iter().filter(|d| d.has_label_mismatch()).count(),
            ..Default::default()
        };

        let scored = self.join_detections(captures, detections, &mut report);
        let timed_weather = self.prepare_weather(weather, &mut report);

        let matches = self.join.join(&scored, &timed_weather);

        let records: Vec<MergedRecord> = scored
            .iter()
            .zip(matches)
            .map(|(row, matched)| {
                let weather = matched.map(|index| timed_weather[index].record);
                if weather.is_some() {
                    report.weather_matched += 1;
                } else {
                    report.weather_unmatched += 1;
                }
                self.label(row, weather)
            })
            .collect();

        report.output_rows = records.len();
        tracing::info!(
            rows = report.output_rows,
            matched = report.weather_matched,
            unmatched = report.weather_unmatched,
            "Assembled dataset"
        );

        let dataset = MergedDataset {
            records,
            include_city: captures.has_city,
        };
        (dataset, report)
    }

    /// Inner join on image basename, preserving capture order.
    fn join_detections<'a>(
        &self,
        captures: &'a CaptureTable,
        detections: &'a [DetectionRecord],
        report: &mut MergeReport,
    ) -> Vec<ScoredCapture<'a>> {
        let mut by_image: HashMap<String, Vec<&DetectionRecord>> = HashMap::new();
        for detection in detections {
            by_image
                .entry(detection.image_key())
                .or_default()
                .push(detection);
        }

        let mut scored = Vec::with_capacity(captures.len());
        for capture in &captures.records {
            let Some(matches) = by_image.get(&capture.image_key()) else {
                report.captures_without_detection += 1;
                continue;
            };

            let time = normalize_time_opt(capture.time.as_deref());
            if time.is_none() {
                report.unparsable_times += matches.len();
            }
            let instant = combine(&capture.date, time.as_deref());
            if instant.is_none() {
                report.missing_instants += matches.len();
            }

            for &detection in matches {
                scored.push(ScoredCapture {
                    capture,
                    detection,
                    instant,
                });
            }
        }

        tracing::debug!(
            joined = scored.len(),
            dropped = report.captures_without_detection,
            "Joined captures with detections"
        );
        scored
    }

    /// Normalize weather times and collapse rows sharing a (date, time) key.
    ///
    /// The later row's readings replace the earlier ones in place, so row order
    /// stays that of each key's first appearance.
    fn prepare_weather<'a>(
        &self,
        weather: &'a [WeatherRecord],
        report: &mut MergeReport,
    ) -> Vec<TimedWeather<'a>> {
        let mut timed: Vec<TimedWeather<'a>> = Vec::with_capacity(weather.len());
        let mut positions: HashMap<(String, String), usize> = HashMap::new();

        for record in weather {
            let time = normalize_time_opt(record.time.as_deref());
            let instant = combine(&record.date, time.as_deref());
            let entry = TimedWeather { record, instant };

            match time {
                Some(time) => match positions.get(&(record.date.clone(), time.clone())) {
                    Some(&position) => {
                        timed[position] = entry;
                        report.weather_duplicates_removed += 1;
                    }
                    None => {
                        positions.insert((record.date.clone(), time), timed.len());
                        timed.push(entry);
                    }
                },
                None => timed.push(entry),
            }
        }

        report.weather_rows = timed.len();
        if report.weather_duplicates_removed > 0 {
            tracing::debug!(
                removed = report.weather_duplicates_removed,
                "Collapsed duplicate weather readings"
            );
        }
        timed
    }

    fn label(&self, row: &ScoredCapture<'_>, weather: Option<&WeatherRecord>) -> MergedRecord {
        let capture = row.capture;

        MergedRecord {
            city: capture.city.clone(),
            street: capture.street.clone(),
            date: capture.date.clone(),
            time: row.instant.map(|instant| format_time(instant.time())),
            image_ref: capture.image_ref.clone(),
            vehicle_count: row.detection.vehicle_count,
            traffic_level: row.detection.traffic_level,
            temperature: weather.and_then(|w| w.temperature),
            rain: weather.and_then(|w| w.rain),
            precipitation_mm: weather.and_then(|w| w.precipitation_mm),
            workday: parse_date(&capture.date).map(|date| self.calendar.workday_label(date)),
            time_bucket: row.instant.map(|instant| self.calendar.time_bucket(instant)),
        }
    }
}

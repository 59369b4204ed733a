use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Diagnostic counters of one merge run.
///
/// Nothing here affects the output table; it records what was absorbed
/// silently (dropped captures, absent weather, unparsable times).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    pub capture_rows: usize,
    pub detection_rows: usize,
    pub detection_rows_skipped: usize,
    pub weather_rows: usize,
    pub weather_duplicates_removed: usize,
    pub captures_without_detection: usize,
    pub output_rows: usize,
    pub unparsable_times: usize,
    pub missing_instants: usize,
    pub weather_matched: usize,
    pub weather_unmatched: usize,
    pub traffic_label_mismatches: usize,
}

impl MergeReport {
    pub fn match_rate(&self) -> f64 {
        percentage(self.weather_matched, self.output_rows)
    }

    /// Human-readable report, in the same layout the CLI prints.
    pub fn generate_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Merge Report ===\n");
        summary.push_str(&format!("Capture Rows: {}\n", self.capture_rows));
        summary.push_str(&format!(
            "Detection Rows: {} ({} skipped without a usable count)\n",
            self.detection_rows, self.detection_rows_skipped
        ));
        summary.push_str(&format!(
            "Weather Rows: {} ({} duplicates removed)\n",
            self.weather_rows, self.weather_duplicates_removed
        ));
        summary.push_str(&format!(
            "Captures Without Detection: {} (dropped)\n",
            self.captures_without_detection
        ));
        summary.push_str(&format!("Output Rows: {}\n", self.output_rows));
        summary.push_str(&format!(
            "Weather Matched: {} ({:.1}%)\n",
            self.weather_matched,
            self.match_rate()
        ));
        summary.push_str(&format!(
            "Weather Unmatched: {} ({:.1}%)\n",
            self.weather_unmatched,
            percentage(self.weather_unmatched, self.output_rows)
        ));
        summary.push_str(&format!("Unparsable Times: {}\n", self.unparsable_times));
        summary.push_str(&format!("Rows Without Instant: {}\n", self.missing_instants));

        if self.traffic_label_mismatches > 0 {
            summary.push_str(&format!(
                "\nTraffic labels recomputed from counts: {}\n",
                self.traffic_label_mismatches
            ));
        }

        summary
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f64 / total as f64
    }
}

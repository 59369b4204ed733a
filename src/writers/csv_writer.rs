use crate::error::Result;
use crate::models::{MergedDataset, MergedRecord};
use crate::readers::CsvTable;
use csv::{StringRecord, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write the merged dataset, header first, in final column order
    pub fn write_dataset(&self, dataset: &MergedDataset, path: &Path) -> Result<()> {
        self.write_atomic(path, |writer| {
            writer.write_record(dataset.columns())?;
            for record in &dataset.records {
                writer.write_record(record_fields(record, dataset.include_city))?;
            }
            Ok(())
        })
    }

    /// Write an arbitrary table with the given header
    pub fn write_table(&self, headers: &StringRecord, rows: &[StringRecord], path: &Path) -> Result<()> {
        self.write_atomic(path, |writer| {
            writer.write_record(headers)?;
            for row in rows {
                writer.write_record(row)?;
            }
            Ok(())
        })
    }

    /// Stage the whole table in a temp file beside `path`, then rename it into place.
    fn write_atomic<F>(&self, path: &Path, write: F) -> Result<()>
    where
        F: FnOnce(&mut csv::Writer<&mut NamedTempFile>) -> Result<()>,
    {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut staged = NamedTempFile::new_in(dir)?;
        {
            let mut writer = WriterBuilder::new()
                .flexible(true)
                .from_writer(&mut staged);
            write(&mut writer)?;
            writer.flush()?;
        }
        staged.flush()?;
        staged.as_file().sync_all()?;
        staged.persist(path)?;

        Ok(())
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<CsvFileInfo> {
        let table = CsvTable::read("output", path)?;
        let file_size = File::open(path)?.metadata()?.len();

        Ok(CsvFileInfo {
            total_rows: table.len(),
            columns: table.headers().iter().map(str::to_string).collect(),
            file_size,
        })
    }

    pub fn read_sample_rows(&self, path: &Path, limit: usize) -> Result<Vec<StringRecord>> {
        let table = CsvTable::read("output", path)?;
        Ok(table.into_rows().into_iter().take(limit).collect())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Reals always carry a decimal point: `9.0`, `0.25`.
fn format_real(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() && v.fract() == 0.0 => format!("{:.1}", v),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

fn record_fields(record: &MergedRecord, include_city: bool) -> Vec<String> {
    let mut fields = Vec::with_capacity(12);
    if include_city {
        fields.push(record.city.clone().unwrap_or_default());
    }
    fields.extend([
        record.street.clone(),
        record.date.clone(),
        record.time.clone().unwrap_or_default(),
        record.image_ref.clone(),
        record.vehicle_count.to_string(),
        record.traffic_level.to_string(),
        format_real(record.temperature),
        optional(record.rain),
        format_real(record.precipitation_mm),
        optional(record.workday),
        optional(record.time_bucket),
    ]);
    fields
}

#[derive(Debug)]
pub struct CsvFileInfo {
    pub total_rows: usize,
    pub columns: Vec<String>,
    pub file_size: u64,
}

impl CsvFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "CSV File Summary:\n\
            - Total rows: {}\n\
            - Columns ({}): {}\n\
            - File size: {:.2} KB",
            self.total_rows,
            self.columns.len(),
            self.columns.join(", "),
            self.file_size as f64 / 1024.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RainCategory, TimeBucket, TrafficLevel, WorkdayLabel};
    use pretty_assertions::assert_eq;

    fn record() -> MergedRecord {
        MergedRecord {
            city: Some("Madrid".to_string()),
            street: "Alcalá - Velázquez".to_string(),
            date: "2025-10-14".to_string(),
            time: Some("08:15".to_string()),
            image_ref: "img/a.jpg".to_string(),
            vehicle_count: 9,
            traffic_level: TrafficLevel::Medium,
            temperature: Some(14.5),
            rain: Some(RainCategory::None),
            precipitation_mm: Some(0.0),
            workday: Some(WorkdayLabel::Workday),
            time_bucket: Some(TimeBucket::Morning),
        }
    }

    #[test]
    fn test_write_empty_dataset_keeps_header() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("empty.csv");

        CsvWriter::new().write_dataset(&MergedDataset::default(), &path)?;

        let content = std::fs::read_to_string(&path)?;
        assert_eq!(
            content,
            "calle,fecha,hora,ruta_imagen,num_vehiculos,nivel_trafico,temperatura,lluvia,litros_m2,laborable,franja_horaria\n"
        );
        Ok(())
    }

    #[test]
    fn test_write_rows_with_and_without_weather() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("dataset.csv");

        let mut dry = record();
        dry.temperature = None;
        dry.rain = None;
        dry.precipitation_mm = None;

        let dataset = MergedDataset {
            records: vec![record(), dry],
            include_city: true,
        };
        CsvWriter::new().write_dataset(&dataset, &path)?;

        let content = std::fs::read_to_string(&path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ciudad,calle,"));
        assert_eq!(
            lines[1],
            "Madrid,Alcalá - Velázquez,2025-10-14,08:15,img/a.jpg,9,Medio,14.5,No,0.0,Laborable,mañana"
        );
        assert_eq!(
            lines[2],
            "Madrid,Alcalá - Velázquez,2025-10-14,08:15,img/a.jpg,9,Medio,,,,Laborable,mañana"
        );
        Ok(())
    }

    #[test]
    fn test_format_real_keeps_a_decimal() {
        assert_eq!(format_real(Some(9.0)), "9.0");
        assert_eq!(format_real(Some(0.0)), "0.0");
        assert_eq!(format_real(Some(-3.0)), "-3.0");
        assert_eq!(format_real(Some(0.25)), "0.25");
        assert_eq!(format_real(Some(14.5)), "14.5");
        assert_eq!(format_real(None), "");
    }

    #[test]
    fn test_file_info() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("dataset.csv");
        let dataset = MergedDataset {
            records: vec![record()],
            include_city: false,
        };

        let writer = CsvWriter::new();
        writer.write_dataset(&dataset, &path)?;
        let info = writer.get_file_info(&path)?;

        assert_eq!(info.total_rows, 1);
        assert_eq!(info.columns.len(), 11);
        assert!(info.summary().contains("Total rows: 1"));
        assert_eq!(writer.read_sample_rows(&path, 5)?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_overwrite_replaces_previous_output() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("dataset.csv");
        std::fs::write(&path, "stale content that is much longer than the new table\n")?;

        CsvWriter::new().write_dataset(&MergedDataset::default(), &path)?;

        let content = std::fs::read_to_string(&path)?;
        assert!(content.starts_with("calle,"));
        assert!(!content.contains("stale"));
        Ok(())
    }
}

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use traffic_correlator::processors::{CalendarClassifier, DatasetAssembler, TimeCleaner, ToleranceJoin};
use traffic_correlator::settings::InputPaths;
use traffic_correlator::writers::CsvWriter;
use traffic_correlator::ProcessingError;

const CAPTURES: &str = "\
fecha,hora,calle,ruta_imagen
2025-10-14,08:15:30,Alcalá - Velázquez,img/a.jpg
2025-10-14,09:00,Gran Vía,img/b.jpg
2025-10-18,22:41,Castellana,capturas\\c.jpg
";

const DETECTIONS: &str = "\
foto,num_vehiculos,nivel_trafico
a.jpg,9,Medio
C.JPG,20,Bajo
";

const WEATHER: &str = "\
fecha,hora,temperatura,lluvia,litros_m2
2025-10-14,08:14,14.0,No,0
2025-10-14,08:14:00,14.5,No,0
2025-10-14,12:00,\"20,5\",Sí,1.2
";

fn write_inputs(dir: &Path, captures: &str, detections: &str, weather: &str) -> InputPaths {
    let inputs = InputPaths {
        captures: dir.join("camaras.csv"),
        detections: dir.join("yolo.csv"),
        weather: dir.join("tiempo.csv"),
        output: dir.join("out").join("dataset_final.csv"),
    };
    fs::write(&inputs.captures, captures).expect("write captures");
    fs::write(&inputs.detections, detections).expect("write detections");
    fs::write(&inputs.weather, weather).expect("write weather");
    inputs
}

fn assembler(inputs: InputPaths) -> DatasetAssembler {
    DatasetAssembler::new(inputs, ToleranceJoin::from_minutes(2), CalendarClassifier::default())
}

#[test]
fn test_full_merge_from_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let inputs = write_inputs(temp_dir.path(), CAPTURES, DETECTIONS, WEATHER);
    let output = inputs.output.clone();

    let report = assembler(inputs).run().expect("merge succeeds");

    let written = fs::read_to_string(&output).expect("output exists");
    assert_eq!(
        written,
        "calle,fecha,hora,ruta_imagen,num_vehiculos,nivel_trafico,temperatura,lluvia,litros_m2,laborable,franja_horaria\n\
         Alcalá - Velázquez,2025-10-14,08:15,img/a.jpg,9,Medio,14.5,No,0.0,Laborable,mañana\n\
         Castellana,2025-10-18,22:41,capturas\\c.jpg,20,Alto,,,,No laborable,noche\n"
    );

    assert_eq!(report.capture_rows, 3);
    assert_eq!(report.detection_rows, 2);
    assert_eq!(report.weather_rows, 2);
    assert_eq!(report.weather_duplicates_removed, 1);
    assert_eq!(report.captures_without_detection, 1);
    assert_eq!(report.output_rows, 2);
    assert_eq!(report.weather_matched, 1);
    assert_eq!(report.weather_unmatched, 1);
    assert_eq!(report.traffic_label_mismatches, 1);
    assert_eq!(report.detection_rows_skipped, 0);
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let inputs = write_inputs(temp_dir.path(), CAPTURES, DETECTIONS, WEATHER);

    let first = inputs.output.clone();
    let second = temp_dir.path().join("second.csv");
    let rerun = InputPaths {
        output: second.clone(),
        ..inputs.clone()
    };

    assembler(inputs).run().expect("first run");
    assembler(rerun).run().expect("second run");

    assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
}

#[test]
fn test_missing_column_aborts_without_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let inputs = write_inputs(
        temp_dir.path(),
        CAPTURES,
        "foto,vehiculos\na.jpg,9\n",
        WEATHER,
    );
    let output = inputs.output.clone();

    let err = assembler(inputs).run().unwrap_err();

    match err {
        ProcessingError::MissingColumn { table, column } => {
            assert_eq!(table, "detection");
            assert_eq!(column, "num_vehiculos");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!output.exists());
}

#[test]
fn test_missing_input_file_is_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let mut inputs = write_inputs(temp_dir.path(), CAPTURES, DETECTIONS, WEATHER);
    inputs.weather = temp_dir.path().join("does_not_exist.csv");
    let output = inputs.output.clone();

    assert!(assembler(inputs).run().is_err());
    assert!(!output.exists());
}

#[test]
fn test_capture_without_detection_is_dropped() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let inputs = write_inputs(
        temp_dir.path(),
        "fecha,hora,calle,ruta_imagen\n2025-10-14,10:00,Sol,x/A.jpg\n2025-10-14,10:01,Sol,x/B.jpg\n",
        "archivo,num_vehiculos\nA.jpg,3\n",
        "fecha,hora,temperatura,litros_m2\n",
    );
    let output = inputs.output.clone();

    let report = assembler(inputs).run().expect("merge succeeds");

    let written = fs::read_to_string(&output).unwrap();
    let rows: Vec<&str> = written.lines().skip(1).collect();
    assert_eq!(rows, vec!["Sol,2025-10-14,10:00,x/A.jpg,3,Bajo,,,,Laborable,mañana"]);
    assert_eq!(report.captures_without_detection, 1);
}

#[test]
fn test_city_column_is_carried_through() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let inputs = write_inputs(
        temp_dir.path(),
        "ciudad,fecha,hora,calle,ruta_imagen\nMadrid,2025-10-15,06:30,Atocha,a.jpg\n",
        DETECTIONS,
        "fecha,hora,temperatura,litros_m2\n2025-10-15,06:32,9.0,0.25\n",
    );
    let output = inputs.output.clone();

    assembler(inputs).run().expect("merge succeeds");

    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert!(lines[0].starts_with("ciudad,calle,"));
    assert_eq!(lines[1], "Madrid,Atocha,2025-10-15,06:30,a.jpg,9,Medio,9.0,Débil,0.25,Laborable,madrugada");
}

#[test]
fn test_detection_without_count_is_reported_separately() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let inputs = write_inputs(
        temp_dir.path(),
        "fecha,hora,calle,ruta_imagen\n2025-10-14,10:00,Sol,x/A.jpg\n2025-10-14,10:01,Sol,x/B.jpg\n",
        "foto,num_vehiculos\nA.jpg,3\nB.jpg,\n",
        "fecha,hora,temperatura,litros_m2\n",
    );

    let report = assembler(inputs).run().expect("merge succeeds");

    assert_eq!(report.detection_rows, 1);
    assert_eq!(report.detection_rows_skipped, 1);
    assert_eq!(report.captures_without_detection, 1);
    assert_eq!(report.output_rows, 1);
}

#[test]
fn test_extreme_temperature_keeps_weather_attached() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let inputs = write_inputs(
        temp_dir.path(),
        "fecha,hora,calle,ruta_imagen\n2025-07-14,15:01,Sol,a.jpg\n",
        "foto,num_vehiculos\na.jpg,3\n",
        "fecha,hora,temperatura,litros_m2\n2025-07-14,15:00,61.0,0.5\n",
    );
    let output = inputs.output.clone();

    let report = assembler(inputs).run().expect("merge succeeds");

    let written = fs::read_to_string(&output).unwrap();
    let rows: Vec<&str> = written.lines().skip(1).collect();
    assert_eq!(rows, vec!["Sol,2025-07-14,15:01,a.jpg,3,Bajo,61.0,Sí,0.5,Laborable,mediodía"]);
    assert_eq!(report.weather_rows, 1);
    assert_eq!(report.weather_matched, 1);
}

#[test]
fn test_clean_time_on_merged_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("dataset_final.csv");
    let output = temp_dir.path().join("dataset_final_limpio.csv");
    fs::write(&input, "calle,hora\nSol,2025-10-14 7:05:12\nPrado,sin hora\n").unwrap();

    let summary = TimeCleaner::new("hora").clean_file(&input, &output).unwrap();

    assert_eq!(summary.rows, 2);
    assert_eq!(summary.cleared, 1);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "calle,hora\nSol,07:05\nPrado,\n"
    );

    let info = CsvWriter::new().get_file_info(&output).unwrap();
    assert_eq!(info.total_rows, 2);
    assert_eq!(info.columns, vec!["calle".to_string(), "hora".to_string()]);
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "traffic-correlator")]
#[command(about = "Correlates camera captures, vehicle detections and weather into a labeled dataset")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge captures, detections and weather into the final dataset
    Merge {
        #[arg(short, long, help = "Settings file (TOML) layered over the built-in defaults")]
        config: Option<PathBuf>,

        #[arg(long, help = "Capture table (fecha, hora, calle, ruta_imagen)")]
        captures: Option<PathBuf>,

        #[arg(long, help = "Detection table (foto|archivo, num_vehiculos, nivel_trafico)")]
        detections: Option<PathBuf>,

        #[arg(long, help = "Weather table (fecha, hora, temperatura, lluvia, litros_m2)")]
        weather: Option<PathBuf>,

        #[arg(short, long, help = "Output CSV path")]
        output: Option<PathBuf>,

        #[arg(long, help = "Maximum capture/weather time difference in minutes")]
        tolerance_minutes: Option<u32>,

        #[arg(long, help = "Also write the merge report as JSON")]
        report_json: Option<PathBuf>,
    },

    /// Rewrite a time column of any CSV to canonical HH:MM
    CleanTime {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,

        #[arg(short, long, help = "Output CSV path [default: <input stem>_limpio.csv]")]
        output: Option<PathBuf>,

        #[arg(long, default_value = "hora")]
        column: String,
    },

    /// Display information about a CSV file
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, default_value = "5")]
        sample: usize,
    },
}

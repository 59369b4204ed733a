use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::processors::{DatasetAssembler, TimeCleaner};
use crate::settings::{Settings, SettingsOverrides};
use crate::utils::filename::cleaned_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::CsvWriter;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Merge {
            config,
            captures,
            detections,
            weather,
            output,
            tolerance_minutes,
            report_json,
        } => {
            let settings = Settings::load(config.as_deref())?.with_overrides(SettingsOverrides {
                captures,
                detections,
                weather,
                output,
                tolerance_minutes,
            })?;
            settings.log_settings();

            let progress = ProgressReporter::new_spinner("Merging datasets...", cli.verbose);

            let assembler = DatasetAssembler::from_settings(&settings);
            let report = assembler.run()?;

            progress.finish_with_message(&format!("Merged {} rows", report.output_rows));

            println!("\n{}", report.generate_summary());
            println!("Output file: {}", assembler.inputs().output.display());

            if let Some(path) = report_json {
                report.write_json(&path)?;
                println!("Report written to: {}", path.display());
            }
        }

        Commands::CleanTime {
            input,
            output,
            column,
        } => {
            let output = output.unwrap_or_else(|| cleaned_filename(&input));
            println!("Cleaning column '{}' in {}", column, input.display());

            let summary = TimeCleaner::new(&column).clean_file(&input, &output)?;

            println!(
                "Cleaned {} rows ({} unparsable values cleared)",
                summary.rows, summary.cleared
            );
            println!("Output file: {}", output.display());
        }

        Commands::Info { file, sample } => {
            println!("Analyzing CSV file: {}", file.display());

            let writer = CsvWriter::new();
            let file_info = writer.get_file_info(&file)?;
            println!("\n{}", file_info.summary());

            if sample > 0 {
                println!("\nSample Records (showing up to {} records):", sample);
                for (i, row) in writer.read_sample_rows(&file, sample)?.iter().enumerate() {
                    println!("{}. {}", i + 1, row.iter().collect::<Vec<_>>().join(" | "));
                }
            }
        }
    }

    Ok(())
}

//! CLI entry point for the cohort analyzer.
//!
//! Provides subcommands for summarizing patient CSVs by BMI cohort and for
//! cleaning raw patient JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cohort_analyzer::analyzers::analyzer::analyze_file;
use cohort_analyzer::cleaner::{clean_patients, load_patients};
use cohort_analyzer::output::{
    print_json, print_pretty, render_table, write_csv, write_csv_to, write_json,
};
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "cohort_analyzer")]
#[command(about = "Summarize patient records by BMI cohort", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a CSV of patient records (BMI, Glucose, Age) by BMI range
    Analyze {
        /// CSV file, optionally gzip-compressed (.gz)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// How to present the summary
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Optional: file to write the summary to (JSON for --format json, CSV otherwise)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Normalize names and ages, keep adults, and drop duplicate patients
    Clean {
        /// JSON array of patient objects
        #[arg(value_name = "INPUT", default_value = "data/raw/patients.json")]
        input: PathBuf,

        /// Optional: file to write cleaned patients to as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/cohort_analyzer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("cohort_analyzer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            format,
            output,
        } => {
            let report = analyze_file(&input)?;
            print_pretty(&report);

            match format {
                Format::Table => print!("{}", render_table(&report)),
                Format::Json => print_json(&report)?,
                Format::Csv => write_csv_to(std::io::stdout(), &report.cohorts)?,
            }

            if let Some(path) = output {
                match format {
                    Format::Json => write_json(&path, &report)?,
                    Format::Table | Format::Csv => write_csv(&path, &report.cohorts)?,
                }
                info!(path = %path.display(), "Summary written");
            }
        }
        Commands::Clean { input, output } => {
            let patients = load_patients(&input)?;
            let cleaned = clean_patients(patients);

            if cleaned.is_empty() {
                println!("No cleaned patient data found");
            } else {
                println!("Cleaned Patient Data:");
                for patient in &cleaned {
                    println!("{patient}");
                }
            }

            if let Some(path) = output {
                let file = File::create(&path)
                    .with_context(|| format!("creating {}", path.display()))?;
                serde_json::to_writer_pretty(BufWriter::new(file), &cleaned)?;
                info!(path = %path.display(), count = cleaned.len(), "Cleaned patients written");
            }
        }
    }

    Ok(())
}

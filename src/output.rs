//! Output formatting and persistence for cohort reports.
//!
//! Supports a console table, pretty-printing, JSON and CSV.

use anyhow::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::analyzers::types::CohortSummary;
use crate::stats::CohortReport;
use csv::WriterBuilder;

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &CohortReport) {
    debug!("{:#?}", report);
}

/// Logs the report as pretty-printed JSON.
pub fn print_json(report: &CohortReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Renders the cohort summaries as a fixed-width table.
pub fn render_table(report: &CohortReport) -> String {
    let mut out = format!(
        "{:<12} {:>12} {:>14} {:>8} {:>8}\n",
        "bmi_range", "avg_glucose", "patient_count", "share%", "avg_age"
    );
    out.push_str(&"-".repeat(58));
    out.push('\n');

    for s in &report.cohorts {
        out.push_str(&format!(
            "{:<12} {:>12.2} {:>14} {:>8.1} {:>8.2}\n",
            s.label.as_str(),
            s.avg_glucose,
            s.patient_count,
            report.share_pct(s),
            s.avg_age
        ));
    }

    out.push_str(&format!(
        "{} of {} records in BMI range, {} excluded\n",
        report.filtered_records, report.total_records, report.excluded_records
    ));

    out
}

/// Writes the full report as pretty JSON, replacing any existing file.
pub fn write_json(path: &Path, report: &CohortReport) -> Result<()> {
    debug!(path = %path.display(), "Writing JSON report");
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

/// Writes one CSV row per cohort, with headers, to any writer.
pub fn write_csv_to<W: Write>(writer: W, cohorts: &[CohortSummary]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);
    for summary in cohorts {
        writer.serialize(summary)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes the cohort CSV to `path`, replacing any existing file.
pub fn write_csv(path: &Path, cohorts: &[CohortSummary]) -> Result<()> {
    debug!(path = %path.display(), rows = cohorts.len(), "Writing CSV report");
    write_csv_to(File::create(path)?, cohorts)
}

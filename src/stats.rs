use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyzers::analyzer::analyze_cohorts;
use crate::analyzers::types::{CohortSummary, Record};
use crate::error::CohortError;

/// Result of one analysis run, with enough context to explain the counts.
#[derive(Debug, Serialize)]
pub struct CohortReport {
    pub generated_at: DateTime<Utc>,
    pub source: Option<String>,
    pub total_records: usize,
    pub filtered_records: usize,
    pub excluded_records: usize,
    pub cohorts: Vec<CohortSummary>,
}

impl CohortReport {
    pub fn from_records(records: &[Record]) -> Result<Self, CohortError> {
        let cohorts = analyze_cohorts(records)?;
        // every kept record lands in exactly one cohort
        let filtered_records: usize = cohorts.iter().map(|s| s.patient_count).sum();

        Ok(CohortReport {
            generated_at: Utc::now(),
            source: None,
            total_records: records.len(),
            filtered_records,
            excluded_records: records.len() - filtered_records,
            cohorts,
        })
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    /// Share of the filtered population that falls into `summary`'s cohort.
    pub fn share_pct(&self, summary: &CohortSummary) -> f64 {
        Self::pct(summary.patient_count, self.filtered_records)
    }

    /// Set the input the report was built from
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }
}

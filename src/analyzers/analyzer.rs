use crate::analyzers::aggregate::aggregate_cohorts;
use crate::analyzers::classify::classify;
use crate::analyzers::filter::filter_records;
use crate::analyzers::types::{CohortSummary, Record};
use crate::error::CohortError;
use crate::loader::load_records;
use crate::stats::CohortReport;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

/// Checks every record up front so a bad row anywhere aborts the run before
/// anything is aggregated.
pub fn validate_records(records: &[Record]) -> Result<(), CohortError> {
    records
        .iter()
        .enumerate()
        .try_for_each(|(index, record)| record.validate(index))
}

/// Runs filter → classify → aggregate over an in-memory table.
///
/// # Errors
///
/// Returns [`CohortError::NonFinite`] for the first record carrying a NaN or
/// infinite field. No partial summary is produced in that case.
pub fn analyze_cohorts(records: &[Record]) -> Result<Vec<CohortSummary>, CohortError> {
    validate_records(records)?;

    let filtered = filter_records(records);
    debug!(
        total = records.len(),
        kept = filtered.len(),
        "BMI range filter applied"
    );

    let labelled = filtered.iter().map(|r| (r, classify(r.bmi)));
    Ok(aggregate_cohorts(labelled))
}

/// Loads a CSV (optionally gzip-compressed) and builds a [`CohortReport`] for it.
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn analyze_file(path: &Path) -> Result<CohortReport> {
    let records =
        load_records(path).with_context(|| format!("loading records from {}", path.display()))?;

    let report = CohortReport::from_records(&records)?.with_source(&path.display().to_string());

    info!(
        total = report.total_records,
        filtered = report.filtered_records,
        cohorts = report.cohorts.len(),
        "Cohort analysis complete"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::{CohortLabel, Field};

    #[test]
    fn test_analyze_empty_input() {
        assert!(analyze_cohorts(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_analyze_all_filtered_out() {
        let records = vec![Record::new(5.0, 80.0, 25.0), Record::new(75.0, 80.0, 25.0)];
        assert!(analyze_cohorts(&records).unwrap().is_empty());
    }

    #[test]
    fn test_analyze_identical_bmi_single_group() {
        let records: Vec<_> = (0..9).map(|i| Record::new(27.0, 100.0 + i as f64, 50.0)).collect();
        let out = analyze_cohorts(&records).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].label, CohortLabel::Overweight);
        assert_eq!(out[0].patient_count, 9);
        assert_eq!(out[0].avg_glucose, 104.0);
    }

    #[test]
    fn test_analyze_rejects_non_finite_even_when_filtered() {
        let records = vec![
            Record::new(22.0, 90.0, 30.0),
            Record::new(f64::NAN, 90.0, 30.0),
        ];
        let err = analyze_cohorts(&records).unwrap_err();
        assert_eq!(err.index(), Some(1));
        assert_eq!(err.field(), Some(Field::Bmi));
    }

    #[test]
    fn test_counts_equal_filtered_records() {
        let records: Vec<_> = (0..200)
            .map(|i| Record::new(i as f64 * 0.4, 90.0, 40.0))
            .collect();
        let filtered = filter_records(&records).len();
        let out = analyze_cohorts(&records).unwrap();
        let total: usize = out.iter().map(|s| s.patient_count).sum();
        assert_eq!(total, filtered);
        assert!(out.iter().all(|s| s.patient_count >= 1));
    }
}

use crate::analyzers::types::{CohortLabel, CohortSummary, Record};
use std::collections::BTreeMap;

/// Running sums for one cohort.
///
/// Only ever created from a record, so `count` is at least 1 and the means
/// computed in [`CohortAccumulator::finish`] never divide by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CohortAccumulator {
    count: usize,
    glucose_sum: f64,
    age_sum: f64,
}

impl CohortAccumulator {
    fn from_record(record: &Record) -> Self {
        CohortAccumulator {
            count: 1,
            glucose_sum: record.glucose,
            age_sum: record.age,
        }
    }

    fn push(&mut self, record: &Record) {
        self.count += 1;
        self.glucose_sum += record.glucose;
        self.age_sum += record.age;
    }

    fn merge(&mut self, other: &CohortAccumulator) {
        self.count += other.count;
        self.glucose_sum += other.glucose_sum;
        self.age_sum += other.age_sum;
    }

    fn finish(&self, label: CohortLabel) -> CohortSummary {
        let n = self.count as f64;
        CohortSummary {
            label,
            avg_glucose: self.glucose_sum / n,
            patient_count: self.count,
            avg_age: self.age_sum / n,
        }
    }
}

/// Single-pass grouped reduction keyed by [`CohortLabel`].
///
/// Partial aggregators built over disjoint partitions can be combined with
/// [`CohortAggregator::merge`]; counts and sums add, so the result does not
/// depend on how the input was split.
#[derive(Debug, Clone, Default)]
pub struct CohortAggregator {
    groups: BTreeMap<CohortLabel, CohortAccumulator>,
}

impl CohortAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: CohortLabel, record: &Record) {
        self.groups
            .entry(label)
            .and_modify(|acc| acc.push(record))
            .or_insert_with(|| CohortAccumulator::from_record(record));
    }

    pub fn merge(&mut self, other: &CohortAggregator) {
        for (label, theirs) in &other.groups {
            self.groups
                .entry(*label)
                .and_modify(|acc| acc.merge(theirs))
                .or_insert(*theirs);
        }
    }

    /// Number of records accumulated so far.
    pub fn len(&self) -> usize {
        self.groups.values().map(|acc| acc.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Produces one summary per cohort seen, in ascending band order.
    pub fn finish(&self) -> Vec<CohortSummary> {
        self.groups
            .iter()
            .map(|(label, acc)| acc.finish(*label))
            .collect()
    }
}

/// Aggregates labelled records into per-cohort summaries.
///
/// Returns an empty vector for empty input.
pub fn aggregate_cohorts<'a, I>(pairs: I) -> Vec<CohortSummary>
where
    I: IntoIterator<Item = (&'a Record, CohortLabel)>,
{
    let mut aggregator = CohortAggregator::new();
    for (record, label) in pairs {
        aggregator.push(label, record);
    }
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::classify::classify;

    fn labelled(records: &[Record]) -> Vec<(&Record, CohortLabel)> {
        records.iter().map(|r| (r, classify(r.bmi))).collect()
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate_cohorts(Vec::<(&Record, CohortLabel)>::new()).is_empty());
        assert!(CohortAggregator::new().finish().is_empty());
    }

    #[test]
    fn test_aggregate_means_and_counts() {
        let records = vec![
            Record::new(17.0, 90.0, 20.0),
            Record::new(22.0, 110.0, 30.0),
            Record::new(22.0, 130.0, 40.0),
        ];
        let out = aggregate_cohorts(labelled(&records));

        assert_eq!(
            out,
            vec![
                CohortSummary {
                    label: CohortLabel::Underweight,
                    avg_glucose: 90.0,
                    patient_count: 1,
                    avg_age: 20.0,
                },
                CohortSummary {
                    label: CohortLabel::Normal,
                    avg_glucose: 120.0,
                    patient_count: 2,
                    avg_age: 35.0,
                },
            ]
        );
    }

    #[test]
    fn test_output_in_band_order_regardless_of_input_order() {
        let records = vec![
            Record::new(45.0, 100.0, 50.0),
            Record::new(26.0, 100.0, 50.0),
            Record::new(12.0, 100.0, 50.0),
            Record::new(20.0, 100.0, 50.0),
        ];
        let labels: Vec<_> = aggregate_cohorts(labelled(&records))
            .into_iter()
            .map(|s| s.label)
            .collect();
        assert_eq!(labels, CohortLabel::ALL.to_vec());
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let records: Vec<Record> = (0..40)
            .map(|i| Record::new(10.0 + i as f64, 80.0 + i as f64, 20.0 + (i % 7) as f64))
            .collect();

        let whole = aggregate_cohorts(labelled(&records));

        let (left, right) = records.split_at(17);
        let mut a = CohortAggregator::new();
        for (r, l) in labelled(left) {
            a.push(l, r);
        }
        let mut b = CohortAggregator::new();
        for (r, l) in labelled(right) {
            b.push(l, r);
        }
        a.merge(&b);

        let merged = a.finish();
        assert_eq!(merged.len(), whole.len());
        for (m, w) in merged.iter().zip(&whole) {
            assert_eq!(m.label, w.label);
            assert_eq!(m.patient_count, w.patient_count);
            assert!((m.avg_glucose - w.avg_glucose).abs() < 1e-9);
            assert!((m.avg_age - w.avg_age).abs() < 1e-9);
        }
        assert_eq!(a.len(), records.len());
    }

    #[test]
    fn test_merge_into_empty() {
        let records = vec![Record::new(31.0, 140.0, 60.0)];
        let mut src = CohortAggregator::new();
        for (r, l) in labelled(&records) {
            src.push(l, r);
        }
        let mut dst = CohortAggregator::new();
        dst.merge(&src);
        assert_eq!(dst.finish(), src.finish());
    }
}

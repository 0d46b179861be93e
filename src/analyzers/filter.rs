use super::types::{Field, Record};

/// Inclusive numeric bound `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidRange {
    pub min: f64,
    pub max: f64,
}

/// Physiologically plausible BMI values. Rows outside are treated as entry errors.
pub const BMI_RANGE: ValidRange = ValidRange::new(10.0, 60.0);

impl ValidRange {
    pub const fn new(min: f64, max: f64) -> Self {
        ValidRange { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Returns the records whose `field` lies inside `range`, in input order.
pub fn filter_by(records: &[Record], field: Field, range: &ValidRange) -> Vec<Record> {
    records
        .iter()
        .filter(|r| range.contains(r.get(field)))
        .copied()
        .collect()
}

/// Keeps the records with a BMI inside [`BMI_RANGE`].
pub fn filter_records(records: &[Record]) -> Vec<Record> {
    filter_by(records, Field::Bmi, &BMI_RANGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_is_inclusive() {
        assert!(BMI_RANGE.contains(10.0));
        assert!(BMI_RANGE.contains(60.0));
        assert!(!BMI_RANGE.contains(9.99));
        assert!(!BMI_RANGE.contains(60.01));
    }

    #[test]
    fn test_filter_empty() {
        assert!(filter_records(&[]).is_empty());
    }

    #[test]
    fn test_filter_keeps_order_and_fields() {
        let records = vec![
            Record::new(5.0, 80.0, 25.0),
            Record::new(60.0, 150.0, 61.0),
            Record::new(61.0, 90.0, 30.0),
            Record::new(10.0, 99.0, 44.0),
        ];
        let kept = filter_records(&records);
        assert_eq!(
            kept,
            vec![Record::new(60.0, 150.0, 61.0), Record::new(10.0, 99.0, 44.0)]
        );
        // input untouched
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn test_filter_by_other_field() {
        let records = vec![Record::new(22.0, 80.0, 17.0), Record::new(22.0, 80.0, 18.0)];
        let adults = filter_by(&records, Field::Age, &ValidRange::new(18.0, 120.0));
        assert_eq!(adults, vec![Record::new(22.0, 80.0, 18.0)]);
    }
}

use super::types::CohortLabel;

/// Ordered BMI rules: the first band whose exclusive upper bound exceeds the
/// value wins. Anything past the last bound is [`CohortLabel::Obese`].
///
/// | Range            | Label       |
/// |------------------|-------------|
/// | < 18.5           | Underweight |
/// | 18.5 <= x < 25   | Normal      |
/// | 25 <= x < 30     | Overweight  |
/// | >= 30            | Obese       |
pub static BMI_RULES: &[(f64, CohortLabel)] = &[
    (18.5, CohortLabel::Underweight),
    (25.0, CohortLabel::Normal),
    (30.0, CohortLabel::Overweight),
];

const CATCH_ALL: CohortLabel = CohortLabel::Obese;

/// Maps a BMI value onto its cohort.
pub fn classify(bmi: f64) -> CohortLabel {
    BMI_RULES
        .iter()
        .find(|(upper, _)| bmi < *upper)
        .map(|(_, label)| *label)
        .unwrap_or(CATCH_ALL)
}

impl CohortLabel {
    /// Inclusive lower bound of the band, `None` for the lowest band.
    pub fn lower_bound(self) -> Option<f64> {
        let pos = BMI_RULES.iter().position(|(_, l)| *l == self);
        match pos {
            Some(0) => None,
            Some(i) => Some(BMI_RULES[i - 1].0),
            None => BMI_RULES.last().map(|(upper, _)| *upper),
        }
    }

    /// Exclusive upper bound of the band, `None` for the catch-all band.
    pub fn upper_bound(self) -> Option<f64> {
        BMI_RULES
            .iter()
            .find(|(_, l)| *l == self)
            .map(|(upper, _)| *upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::filter::BMI_RANGE;

    #[test]
    fn test_classify_boundaries_go_up() {
        assert_eq!(classify(18.49), CohortLabel::Underweight);
        assert_eq!(classify(18.5), CohortLabel::Normal);
        assert_eq!(classify(24.99), CohortLabel::Normal);
        assert_eq!(classify(25.0), CohortLabel::Overweight);
        assert_eq!(classify(29.99), CohortLabel::Overweight);
        assert_eq!(classify(30.0), CohortLabel::Obese);
    }

    #[test]
    fn test_classify_range_edges() {
        assert_eq!(classify(BMI_RANGE.min), CohortLabel::Underweight);
        assert_eq!(classify(BMI_RANGE.max), CohortLabel::Obese);
    }

    #[test]
    fn test_classify_total_over_valid_range() {
        // 10.0, 10.1, ..., 60.0
        for step in 0..=500 {
            let bmi = 10.0 + step as f64 / 10.0;
            let label = classify(bmi);
            if let Some(lo) = label.lower_bound() {
                assert!(bmi >= lo, "{bmi} below {label} lower bound {lo}");
            }
            if let Some(hi) = label.upper_bound() {
                assert!(bmi < hi, "{bmi} not below {label} upper bound {hi}");
            }
        }
    }

    #[test]
    fn test_bands_are_contiguous() {
        assert_eq!(CohortLabel::Underweight.lower_bound(), None);
        assert_eq!(CohortLabel::Underweight.upper_bound(), Some(18.5));
        assert_eq!(CohortLabel::Normal.lower_bound(), Some(18.5));
        assert_eq!(CohortLabel::Normal.upper_bound(), Some(25.0));
        assert_eq!(CohortLabel::Overweight.lower_bound(), Some(25.0));
        assert_eq!(CohortLabel::Overweight.upper_bound(), Some(30.0));
        assert_eq!(CohortLabel::Obese.lower_bound(), Some(30.0));
        assert_eq!(CohortLabel::Obese.upper_bound(), None);
    }

    #[test]
    fn test_rules_are_ascending() {
        assert!(BMI_RULES.windows(2).all(|w| w[0].0 < w[1].0));
    }
}

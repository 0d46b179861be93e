//! Data types used by the cohort pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CohortError;

/// Numeric fields carried by a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Bmi,
    Glucose,
    Age,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Bmi, Field::Glucose, Field::Age];

    /// Field name as used in error messages and logs.
    pub fn name(self) -> &'static str {
        match self {
            Field::Bmi => "bmi",
            Field::Glucose => "glucose",
            Field::Age => "age",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single CSV row before validation. Unknown columns are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "BMI", alias = "bmi", default)]
    pub(crate) bmi: Option<String>,
    #[serde(rename = "Glucose", alias = "glucose", default)]
    pub(crate) glucose: Option<String>,
    #[serde(rename = "Age", alias = "age", default)]
    pub(crate) age: Option<String>,
}

impl RawRecord {
    fn cell(&self, field: Field) -> Option<&str> {
        let cell = match field {
            Field::Bmi => &self.bmi,
            Field::Glucose => &self.glucose,
            Field::Age => &self.age,
        };
        cell.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// One patient observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Record {
    pub bmi: f64,
    pub glucose: f64,
    pub age: f64,
}

impl Record {
    pub fn new(bmi: f64, glucose: f64, age: f64) -> Self {
        Record { bmi, glucose, age }
    }

    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Bmi => self.bmi,
            Field::Glucose => self.glucose,
            Field::Age => self.age,
        }
    }

    /// Converts a raw CSV row into a validated record.
    ///
    /// # Errors
    ///
    /// Fails on the first blank, unparsable or non-finite cell, naming the
    /// field and `index`.
    pub fn from_raw(index: usize, raw: &RawRecord) -> Result<Self, CohortError> {
        let parse = |field: Field| -> Result<f64, CohortError> {
            let text = raw
                .cell(field)
                .ok_or(CohortError::MissingField { index, field })?;
            text.parse::<f64>()
                .map_err(|_| CohortError::InvalidNumber {
                    index,
                    field,
                    value: text.to_string(),
                })
        };

        let record = Record {
            bmi: parse(Field::Bmi)?,
            glucose: parse(Field::Glucose)?,
            age: parse(Field::Age)?,
        };
        record.validate(index)?;
        Ok(record)
    }

    /// Checks that every numeric field is finite.
    pub fn validate(&self, index: usize) -> Result<(), CohortError> {
        for field in Field::ALL {
            let value = self.get(field);
            if !value.is_finite() {
                return Err(CohortError::NonFinite {
                    index,
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// BMI band a record falls into, ordered from lowest to highest band.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CohortLabel {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl CohortLabel {
    pub const ALL: [CohortLabel; 4] = [
        CohortLabel::Underweight,
        CohortLabel::Normal,
        CohortLabel::Overweight,
        CohortLabel::Obese,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CohortLabel::Underweight => "Underweight",
            CohortLabel::Normal => "Normal",
            CohortLabel::Overweight => "Overweight",
            CohortLabel::Obese => "Obese",
        }
    }
}

impl fmt::Display for CohortLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-cohort statistics. `patient_count` is always at least 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSummary {
    #[serde(rename = "bmi_range")]
    pub label: CohortLabel,
    pub avg_glucose: f64,
    pub patient_count: usize,
    pub avg_age: f64,
}

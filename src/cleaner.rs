//! Patient record cleaning.
//!
//! Normalizes names and ages, keeps adults only, and drops exact duplicates.
//! The adult filter here is independent of the BMI range applied by the
//! cohort pipeline.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

pub const ADULT_AGE: i64 = 18;

/// A patient as read from JSON. `age` is kept raw until cleaning.
#[derive(Debug, Clone, Deserialize)]
pub struct Patient {
    pub name: String,
    #[serde(default)]
    pub age: Value,
    #[serde(default)]
    pub gender: Option<Value>,
    #[serde(default)]
    pub diagnosis: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A normalized adult patient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanPatient {
    pub name: String,
    pub age: i64,
    pub gender: Option<Value>,
    pub diagnosis: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl fmt::Display for CleanPatient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Age: {}, Diagnosis: {}",
            self.name,
            self.age,
            self.diagnosis.as_ref().map_or_else(|| "-".to_string(), value_text)
        )
    }
}

/// Strings print without quotes; any other value prints as JSON.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Reads a JSON array of patients.
pub fn load_patients(path: &Path) -> Result<Vec<Patient>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading patient file {}", path.display()))?;
    let patients: Vec<Patient> = serde_json::from_str(&text)
        .with_context(|| format!("parsing patient file {}", path.display()))?;
    debug!(path = %path.display(), count = patients.len(), "Patients loaded");
    Ok(patients)
}

/// Capitalizes the first letter of every alphabetic run and lower-cases the rest.
///
/// `"john o'neil"` becomes `"John O'Neil"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

/// Interprets a raw age as whole years. Anything unusable becomes 0.
pub fn coerce_age(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        Value::Bool(b) => i64::from(*b),
        _ => 0,
    }
}

/// Cleans a batch of patients, preserving input order.
pub fn clean_patients(patients: Vec<Patient>) -> Vec<CleanPatient> {
    let total = patients.len();
    // diagnosis compared by its canonical JSON text
    let mut seen: HashSet<(String, i64, Option<String>)> = HashSet::new();
    let mut cleaned = Vec::new();

    for patient in patients {
        let name = title_case(&patient.name);
        let age = coerce_age(&patient.age);

        if age < ADULT_AGE {
            debug!(name = %name, age, "Dropping minor");
            continue;
        }

        let diagnosis_key = patient.diagnosis.as_ref().map(Value::to_string);
        if !seen.insert((name.clone(), age, diagnosis_key)) {
            debug!(name = %name, age, "Dropping duplicate");
            continue;
        }

        cleaned.push(CleanPatient {
            name,
            age,
            gender: patient.gender,
            diagnosis: patient.diagnosis,
            extra: patient.extra,
        });
    }

    info!(total, kept = cleaned.len(), "Patient records cleaned");
    cleaned
}

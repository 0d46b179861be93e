//! Error type shared by the parser, loader and cohort pipeline.

use thiserror::Error;

use crate::analyzers::types::Field;

/// Failures that abort a pipeline invocation.
///
/// `index` is the 0-based position of the offending record in the input
/// sequence (for CSV input, the data row, not counting the header).
#[derive(Debug, Error)]
pub enum CohortError {
    #[error("record {index}: missing required field '{field}'")]
    MissingField { index: usize, field: Field },

    #[error("record {index}: field '{field}' is not a number: {value:?}")]
    InvalidNumber {
        index: usize,
        field: Field,
        value: String,
    },

    #[error("record {index}: field '{field}' is not finite: {value}")]
    NonFinite {
        index: usize,
        field: Field,
        value: f64,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CohortError {
    /// The field a record-level error points at, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            CohortError::MissingField { field, .. }
            | CohortError::InvalidNumber { field, .. }
            | CohortError::NonFinite { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// The record index a record-level error points at, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            CohortError::MissingField { index, .. }
            | CohortError::InvalidNumber { index, .. }
            | CohortError::NonFinite { index, .. } => Some(*index),
            _ => None,
        }
    }
}

//! BMI cohort analysis for tabular patient records.
//!
//! Records are loaded from CSV, restricted to a plausible BMI range, bucketed
//! into BMI bands and summarized per band (patient count, mean glucose, mean
//! age). A separate [`cleaner`] normalizes raw patient JSON.

pub mod analyzers;
pub mod cleaner;
pub mod error;
pub mod loader;
pub mod output;
pub mod parser;
pub mod stats;

pub use analyzers::analyzer::analyze_cohorts;
pub use analyzers::types::{CohortLabel, CohortSummary, Field, Record};
pub use error::CohortError;

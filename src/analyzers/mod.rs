//! Cohort aggregation pipeline.
//!
//! Records are range-filtered on BMI, labelled with a BMI band, and reduced
//! into one [`types::CohortSummary`] per band present.
//!
//! ```text
//!   &[Record] ──▶ filter ──▶ classify ──▶ aggregate ──▶ Vec<CohortSummary>
//! ```

pub mod aggregate;
pub mod analyzer;
pub mod classify;
pub mod filter;
pub mod types;

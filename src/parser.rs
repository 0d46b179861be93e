//! CSV parser for patient records.

use std::io::Read;

use crate::analyzers::types::{RawRecord, Record};
use crate::error::CohortError;

/// Parses CSV rows with `BMI`, `Glucose` and `Age` columns into records.
///
/// Column order does not matter and extra columns are ignored.
///
/// # Errors
///
/// Fails on malformed CSV, or on the first row with a missing, unparsable or
/// non-finite numeric cell.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<Record>, CohortError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, result) in rdr.deserialize::<RawRecord>().enumerate() {
        let raw = result?;
        records.push(Record::from_raw(index, &raw)?);
    }

    Ok(records)
}

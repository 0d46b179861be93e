//! Opens record files from disk.

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

use crate::analyzers::types::Record;
use crate::error::CohortError;
use crate::parser::parse_records;

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"))
}

/// Opens `path` for reading, decompressing `*.gz` files on the fly.
pub fn open_input(path: &Path) -> Result<Box<dyn Read>, CohortError> {
    let file = BufReader::new(File::open(path)?);
    let gzip = is_gzip(path);
    debug!(path = %path.display(), gzip, "Opening input");

    if gzip {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// Reads and parses every record in a CSV file.
pub fn load_records(path: &Path) -> Result<Vec<Record>, CohortError> {
    let records = parse_records(open_input(path)?)?;
    debug!(path = %path.display(), rows = records.len(), "Records loaded");
    Ok(records)
}

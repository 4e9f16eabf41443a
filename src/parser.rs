use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::model::ImportRecord;

pub const REQUIRED_COLUMNS: [&str; 5] =
    ["word", "phonetic", "translation", "exchange", "definition"];

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("cannot read import file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("import source is missing the {0:?} column")]
    MissingColumn(&'static str),
}

/// Reads the tabular import source into insertable records. A header row
/// is required and column order is free; escape sequences in text fields
/// are kept verbatim for render-time resolution.
pub fn read_csv(path: &Path) -> Result<Vec<ImportRecord>, ParseError> {
    let file = File::open(path)?;
    read_records(file)
}

pub fn read_records<R: Read>(reader: R) -> Result<Vec<ImportRecord>, ParseError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ParseError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    for result in reader.deserialize() {
        records.push(result?);
    }
    Ok(records)
}

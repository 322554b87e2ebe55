//! Error types for the data-loader crate.
//!
//! Only table-level problems surface as errors. Per-field decode failures
//! never reach this type; see [`crate::fields`].

use crate::types::MovieId;
use thiserror::Error;

/// Errors that can occur while loading the item and contributor tables
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// The CSV reader rejected the file (read failure, bad quoting, ragged rows, bad UTF-8)
    #[error("CSV error in {file}: {source}")]
    CsvError {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// A column the loader cannot do without is absent from the header row
    #[error("Missing column `{column}` in {file}")]
    MissingColumn { file: String, column: String },

    /// Line in data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// The item table must hold each identifier exactly once
    #[error("Duplicate id {id} in {file}")]
    DuplicateId { file: String, id: MovieId },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;

//! Error types for locating and reading current files.

use std::path::PathBuf;

use secs_common::PlotError;
use thiserror::Error;

/// Result type for data access operations.
pub type DataResult<T> = Result<T, DataError>;

#[derive(Error, Debug)]
pub enum DataError {
    /// No file exists for the requested time
    #[error("No {system} file found for {time} (looked for {searched:?})")]
    NotFound {
        system: String,
        time: String,
        searched: Vec<PathBuf>,
    },

    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data row has the wrong number of columns or a non-numeric field
    #[error("Malformed row at {path}:{line}: {message}")]
    MalformedRow {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Files were read but held no samples
    #[error("No samples in {0}")]
    Empty(String),
}

impl From<DataError> for PlotError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::NotFound { .. } => PlotError::DataNotAvailable(err.to_string()),
            DataError::Io { .. } | DataError::MalformedRow { .. } => PlotError::DataReadError(err.to_string()),
            DataError::Empty(_) => PlotError::EmptyDataset(err.to_string()),
        }
    }
}

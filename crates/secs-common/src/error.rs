//! Error types for the plotting pipeline.

use thiserror::Error;

/// Result type alias using PlotError.
pub type PlotResult<T> = Result<T, PlotError>;

/// Primary error type for a plot invocation.
#[derive(Debug, Error)]
pub enum PlotError {
    // === Request Errors ===
    #[error("Invalid time specification: {0}")]
    InvalidTime(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Unknown current system: {0}")]
    UnknownSystem(String),

    // === Data Errors ===
    #[error("Data not available for time: {0}")]
    DataNotAvailable(String),

    #[error("Failed to read data: {0}")]
    DataReadError(String),

    #[error("Dataset is empty: {0}")]
    EmptyDataset(String),

    // === Rendering Errors ===
    #[error("Rendering failed: {0}")]
    RenderError(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    // === Infrastructure Errors ===
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlotError {
    /// True for errors caused by the caller's arguments rather than data or I/O.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            PlotError::InvalidTime(_)
                | PlotError::InvalidParameter { .. }
                | PlotError::UnknownSystem(_)
        )
    }
}

impl From<crate::time::TimeParseError> for PlotError {
    fn from(err: crate::time::TimeParseError) -> Self {
        PlotError::InvalidTime(err.to_string())
    }
}

impl From<serde_yaml::Error> for PlotError {
    fn from(err: serde_yaml::Error) -> Self {
        PlotError::ConfigError(format!("YAML error: {}", err))
    }
}

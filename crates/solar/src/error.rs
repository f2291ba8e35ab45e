//! Error types for solar geometry.

use thiserror::Error;

pub type GeometryResult<T> = Result<T, GeometryError>;

#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("Angular step must be a positive finite number of degrees, got {0}")]
    InvalidStep(f64),

    #[error("Longitude range is empty: {min} > {max}")]
    EmptyRange { min: f64, max: f64 },

    #[error(transparent)]
    Time(#[from] secs_common::TimeParseError),
}

impl From<GeometryError> for secs_common::PlotError {
    fn from(err: GeometryError) -> Self {
        match err {
            GeometryError::Time(e) => secs_common::PlotError::InvalidTime(e.to_string()),
            other => secs_common::PlotError::InvalidParameter {
                param: "delta".to_string(),
                message: other.to_string(),
            },
        }
    }
}

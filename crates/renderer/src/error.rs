use thiserror::Error;

use crate::norm::NormError;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Normalization failed: {0}")]
    Norm(#[from] NormError),

    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;

impl From<RenderError> for secs_common::PlotError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Encode(_) => secs_common::PlotError::EncodeError(err.to_string()),
            RenderError::Io(io) => secs_common::PlotError::Io(io),
            _ => secs_common::PlotError::RenderError(err.to_string()),
        }
    }
}

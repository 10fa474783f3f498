use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Failure taxonomy for the offer chart core.
///
/// The engine performs no I/O, so everything that can go wrong is either a
/// degenerate rendering surface or numerically invalid chart input.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

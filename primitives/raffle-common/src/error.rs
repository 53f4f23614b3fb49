use crate::{DirectoryError, SamplingError};
use thiserror::Error;

/// Any failure after a session has been established.
#[derive(Debug, Error)]
pub enum RaffleError {
    /// Channel lookup or member listing failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Winners could not be drawn.
    #[error(transparent)]
    Sampling(#[from] SamplingError),

    /// The report could not be written.
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

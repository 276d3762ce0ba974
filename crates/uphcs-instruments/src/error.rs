use thiserror::Error;

use crate::scoring::ValidationError;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{instrument} score {score} exceeds the maximum of {max}")]
    ScoreOutOfRange {
        instrument: String,
        score: u8,
        max: u8,
    },
}

use shared_types::ScoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RatingError {
    #[error("Unknown rating level: {0}")]
    UnknownLevel(i64),

    #[error("Invalid assessment scores: {0}")]
    InvalidScores(#[from] ScoreError),

    #[error("Society name must not be empty")]
    EmptyName,
}

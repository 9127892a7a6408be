use rating_engine::RatingError;
use shared_types::ScoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unknown rating level: {0}")]
    UnknownLevel(i64),

    #[error("Invalid assessment scores: {0}")]
    InvalidScores(#[from] ScoreError),

    #[error("Invalid society record: {0}")]
    InvalidSociety(String),

    #[error("Invalid watermark image: {0}")]
    InvalidImage(String),

    #[error("Output file name is not a plain file name: {0:?}")]
    InvalidFileName(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RatingError> for RenderError {
    fn from(err: RatingError) -> Self {
        match err {
            RatingError::UnknownLevel(level) => RenderError::UnknownLevel(level),
            RatingError::InvalidScores(source) => RenderError::InvalidScores(source),
            other => RenderError::InvalidSociety(other.to_string()),
        }
    }
}

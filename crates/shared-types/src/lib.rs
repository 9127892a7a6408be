pub mod catalog;
pub mod scores;
pub mod types;

pub use catalog::{
    find_certificate, CertificateSpec, RatingLevel, CERTIFICATE_CATALOG, RATING_LEVELS,
};
pub use scores::{AssessmentScores, ScoreCategory, ScoreError};
pub use types::{CertStatus, ComplianceCert, Society};

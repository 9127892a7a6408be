//! Society rating and compliance reconciliation
//!
//! - [`rating`]: maturity level and LEED score derived from category scores
//! - [`registry`]: recorded certificates matched against the master catalog
//! - [`portfolio`]: aggregate statistics, search and new assessments

pub mod error;
pub mod portfolio;
pub mod rating;
pub mod registry;

pub use error::RatingError;
pub use portfolio::{assess, search, PortfolioStats, SocietyDraft};
pub use rating::{compute_leed_score, compute_overall_level, derive, level_info, Rating};
pub use registry::{
    certifiable_entries, reconcile, reconcile_with, ComplianceSummary, DisplayStatus,
    ReconciledCert, ReconciledRow,
};

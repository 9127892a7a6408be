use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::scores::AssessmentScores;

/// A rated cooperative housing society.
///
/// `overall_level` and `leed_score` are cached copies of values derived from
/// `scores`. They are kept as received so that externally supplied records
/// render exactly what they claim, even when stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Society {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub total_units: u32,
    pub year_built: i32,
    pub overall_level: i64,
    pub scores: AssessmentScores,
    #[serde(default)]
    pub compliance: Vec<ComplianceCert>,
    pub leed_score: u8,
    pub last_assessed: NaiveDate,
}

/// A certificate recorded against a society by an assessor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceCert {
    pub id: String,
    pub name: String,
    pub status: CertStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    pub mandatory: bool,
    pub category: String,
}

/// Lifecycle status of a recorded certificate.
///
/// Unrecognized strings are kept verbatim in [`CertStatus::Other`] instead
/// of failing deserialization; renderers show them in the fallback color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CertStatus {
    Valid,
    Expired,
    Pending,
    NotApplicable,
    Other(String),
}

impl CertStatus {
    pub fn as_str(&self) -> &str {
        match self {
            CertStatus::Valid => "valid",
            CertStatus::Expired => "expired",
            CertStatus::Pending => "pending",
            CertStatus::NotApplicable => "not_applicable",
            CertStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for CertStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "valid" => CertStatus::Valid,
            "expired" => CertStatus::Expired,
            "pending" => CertStatus::Pending,
            "not_applicable" => CertStatus::NotApplicable,
            _ => CertStatus::Other(value),
        }
    }
}

impl From<&str> for CertStatus {
    fn from(value: &str) -> Self {
        CertStatus::from(value.to_string())
    }
}

impl From<CertStatus> for String {
    fn from(value: CertStatus) -> Self {
        match value {
            CertStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for CertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

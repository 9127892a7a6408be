//! Operations over a collection of societies

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared_types::{AssessmentScores, CertStatus, Society};
use uuid::Uuid;

use crate::error::RatingError;
use crate::rating;

/// Headline numbers for a set of societies
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    pub total: usize,
    /// Mean cached overall level, rounded to one decimal
    pub average_level: f64,
    /// Mean cached LEED score, rounded to a whole number
    pub average_leed: u32,
    /// Recorded certificates whose status is `expired`
    pub expired_certs: usize,
}

impl PortfolioStats {
    pub fn from_societies(societies: &[Society]) -> Self {
        if societies.is_empty() {
            return Self::default();
        }

        let count = societies.len() as f64;
        let level_sum: f64 = societies.iter().map(|s| s.overall_level as f64).sum();
        let leed_sum: u32 = societies.iter().map(|s| u32::from(s.leed_score)).sum();
        let expired_certs = societies
            .iter()
            .flat_map(|s| s.compliance.iter())
            .filter(|c| c.status == CertStatus::Expired)
            .count();

        Self {
            total: societies.len(),
            average_level: round_half_up(level_sum / count * 10.0) / 10.0,
            average_leed: round_half_up(f64::from(leed_sum) / count) as u32,
            expired_certs,
        }
    }
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Case-insensitive substring match on name or city, in input order
pub fn search<'a>(societies: &'a [Society], query: &str) -> Vec<&'a Society> {
    let needle = query.trim().to_lowercase();
    societies
        .iter()
        .filter(|s| {
            needle.is_empty()
                || s.name.to_lowercase().contains(&needle)
                || s.city.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Identity fields entered for a new assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocietyDraft {
    pub name: String,
    pub address: String,
    pub city: String,
    pub total_units: u32,
    pub year_built: i32,
}

/// Build a freshly assessed society with derived level and LEED score
pub fn assess(
    draft: SocietyDraft,
    scores: AssessmentScores,
    assessed_on: NaiveDate,
) -> Result<Society, RatingError> {
    if draft.name.trim().is_empty() {
        return Err(RatingError::EmptyName);
    }
    let rating = rating::derive(&scores)?;
    tracing::debug!(
        society = %draft.name,
        level = rating.level,
        leed = rating.leed_score,
        "Assessed new society"
    );

    Ok(Society {
        id: Uuid::new_v4().to_string(),
        name: draft.name,
        address: draft.address,
        city: draft.city,
        total_units: draft.total_units,
        year_built: draft.year_built,
        overall_level: i64::from(rating.level),
        scores,
        compliance: Vec::new(),
        leed_score: rating.leed_score,
        last_assessed: assessed_on,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{ComplianceCert, ScoreCategory};

    fn draft(name: &str) -> SocietyDraft {
        SocietyDraft {
            name: name.to_string(),
            address: "22 Carter Road".to_string(),
            city: "Mumbai".to_string(),
            total_units: 50,
            year_built: 2020,
        }
    }

    fn on(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn rated(name: &str, city: &str, level: i64, leed: u8, expired: usize) -> Society {
        let mut society = assess(draft(name), AssessmentScores::uniform(3), on(1)).unwrap();
        society.city = city.to_string();
        society.overall_level = level;
        society.leed_score = leed;
        society.compliance = (0..expired)
            .map(|i| ComplianceCert {
                id: format!("e{}", i),
                name: "Fire Safety NOC".to_string(),
                status: CertStatus::Expired,
                issued_date: None,
                expiry_date: None,
                mandatory: true,
                category: "Fire Safety".to_string(),
            })
            .collect();
        society
    }

    #[test]
    fn test_assess_derives_values() {
        let scores = AssessmentScores::uniform(5).with(ScoreCategory::Governance, 1);
        let society = assess(draft("Palm Grove"), scores, on(5)).unwrap();
        assert_eq!(society.overall_level, 5);
        assert_eq!(society.leed_score, 92);
        assert!(society.compliance.is_empty());
        assert_eq!(society.last_assessed, on(5));
        assert!(Uuid::parse_str(&society.id).is_ok());
    }

    #[test]
    fn test_assess_rejects_blank_name() {
        let result = assess(draft("   "), AssessmentScores::default(), on(1));
        assert_eq!(result, Err(RatingError::EmptyName));
    }

    #[test]
    fn test_assess_rejects_invalid_scores() {
        let scores = AssessmentScores::uniform(3).with(ScoreCategory::FireSafety, 0);
        assert!(matches!(
            assess(draft("Palm Grove"), scores, on(1)),
            Err(RatingError::InvalidScores(_))
        ));
    }

    #[test]
    fn test_stats_over_societies() {
        let societies = vec![
            rated("A", "Pune", 4, 80, 1),
            rated("B", "Pune", 3, 61, 0),
            rated("C", "Nashik", 4, 70, 2),
        ];
        let stats = PortfolioStats::from_societies(&societies);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.average_level, 3.7);
        assert_eq!(stats.average_leed, 70);
        assert_eq!(stats.expired_certs, 3);
    }

    #[test]
    fn test_stats_tolerates_out_of_range_levels() {
        let societies = vec![
            rated("A", "Pune", i64::MAX, 50, 0),
            rated("B", "Pune", i64::MAX, 50, 0),
        ];
        let stats = PortfolioStats::from_societies(&societies);
        assert_eq!(stats.total, 2);
        assert!(stats.average_level.is_finite());
        assert!(stats.average_level > 1e18);
        assert_eq!(stats.average_leed, 50);
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(PortfolioStats::from_societies(&[]), PortfolioStats::default());
    }

    #[test]
    fn test_search_name_or_city_case_insensitive() {
        let societies = vec![
            rated("Green Valley", "Pune", 4, 80, 0),
            rated("Blue Ridge", "Mumbai", 3, 60, 0),
            rated("Valley View", "Thane", 2, 40, 0),
        ];
        let names = |hits: Vec<&Society>| hits.iter().map(|s| s.name.clone()).collect::<Vec<_>>();
        assert_eq!(
            names(search(&societies, "VALLEY")),
            vec!["Green Valley", "Valley View"]
        );
        assert_eq!(names(search(&societies, "mum")), vec!["Blue Ridge"]);
        assert_eq!(search(&societies, "").len(), 3);
        assert!(search(&societies, "delhi").is_empty());
    }
}

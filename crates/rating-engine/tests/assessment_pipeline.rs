//! Society JSON in, ratings and compliance views out

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rating_engine::{
    assess, certifiable_entries, derive, reconcile, search, ComplianceSummary, PortfolioStats,
    RatingError, ReconciledRow, SocietyDraft,
};
use shared_types::{AssessmentScores, ScoreCategory, Society};

const SOCIETIES: &str = r#"[
  {
    "id": "a1",
    "name": "Green Valley CHS",
    "address": "12 Link Road",
    "city": "Pune",
    "totalUnits": 120,
    "yearBuilt": 2004,
    "overallLevel": 4,
    "scores": {
      "structuralSafety": 4, "fireSafety": 5, "waterManagement": 4,
      "electricalSystems": 4, "wasteManagement": 3, "greenBuilding": 4,
      "accessibility": 3, "securitySystems": 4,
      "commonAreaMaintenance": 4, "governance": 4
    },
    "compliance": [
      {"id": "c1", "name": "Fire Safety NOC", "status": "valid", "mandatory": true,
       "category": "Fire Safety", "issuedDate": "2024-01-10", "expiryDate": "2026-01-10"},
      {"id": "c2", "name": "Occupancy Certificate", "status": "expired", "mandatory": true,
       "category": "Legal"},
      {"id": "c3", "name": "Fire Safety NOC", "status": "expired", "mandatory": true,
       "category": "Fire Safety"},
      {"id": "c4", "name": "Solar Panel Installation Certificate", "status": "renewal_due",
       "mandatory": false, "category": "Environmental"}
    ],
    "leedScore": 78,
    "lastAssessed": "2025-01-15"
  },
  {
    "id": "b2",
    "name": "Sea View Towers",
    "address": "4 Marine Drive",
    "city": "Mumbai",
    "totalUnits": 64,
    "yearBuilt": 1998,
    "overallLevel": 2,
    "scores": {
      "structuralSafety": 2, "fireSafety": 2, "waterManagement": 2,
      "electricalSystems": 2, "wasteManagement": 2, "greenBuilding": 1,
      "accessibility": 2, "securitySystems": 3,
      "commonAreaMaintenance": 2, "governance": 2
    },
    "leedScore": 40,
    "lastAssessed": "2024-11-02"
  }
]"#;

fn societies() -> Vec<Society> {
    serde_json::from_str(SOCIETIES).unwrap()
}

#[test]
fn cached_values_match_derived_rating() {
    for society in societies() {
        let rating = derive(&society.scores).unwrap();
        assert_eq!(i64::from(rating.level), society.overall_level);
        assert_eq!(rating.leed_score, society.leed_score);
    }
}

#[test]
fn reconciled_view_covers_whole_catalog() {
    let societies = societies();
    let entries = reconcile(&societies[0]);
    assert_eq!(entries.len(), 20);

    let rows: Vec<ReconciledRow> = entries.iter().map(ReconciledRow::from).collect();
    let fire = rows.iter().find(|row| row.name == "Fire Safety NOC").unwrap();
    // first recorded entry wins over the later expired duplicate
    assert_eq!(fire.status, "valid");
    assert_eq!(fire.expiry_date, NaiveDate::from_ymd_opt(2026, 1, 10));

    let solar = rows
        .iter()
        .find(|row| row.name == "Solar Panel Installation Certificate")
        .unwrap();
    assert_eq!(solar.status, "renewal_due");

    let summary = ComplianceSummary::from_reconciled(&entries);
    assert_eq!(summary.valid, 1);
    assert_eq!(summary.expired, 1);
    assert_eq!(summary.unrecognized, 1);
    assert_eq!(summary.not_recorded, 17);
    assert_eq!(
        summary.missing_mandatory.len(),
        certifiable_entries().count() - 2
    );
}

#[test]
fn reconcile_leaves_society_untouched() {
    let societies = societies();
    let before = societies[0].clone();
    let _ = reconcile(&societies[0]);
    assert_eq!(societies[0], before);
}

#[test]
fn portfolio_stats_and_search() {
    let societies = societies();
    let stats = PortfolioStats::from_societies(&societies);
    assert_eq!(stats.total, 2);
    assert_eq!(stats.average_level, 3.0);
    assert_eq!(stats.average_leed, 59);
    assert_eq!(stats.expired_certs, 2);

    let hits = search(&societies, "mumbai");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "b2");
    assert_eq!(search(&societies, "").len(), 2);
}

#[test]
fn assessed_society_round_trips_through_json() {
    let draft = SocietyDraft {
        name: "Lake Shore CHS".to_string(),
        address: "9 Lake Road".to_string(),
        city: "Nagpur".to_string(),
        total_units: 48,
        year_built: 2012,
    };
    let scores = AssessmentScores::uniform(5).with(ScoreCategory::Accessibility, 4);
    let assessed_on = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

    let society = assess(draft, scores, assessed_on).unwrap();
    assert_eq!(society.overall_level, 5);
    assert_eq!(society.leed_score, 98);

    let json = serde_json::to_string(&society).unwrap();
    let back: Society = serde_json::from_str(&json).unwrap();
    assert_eq!(back, society);
}

#[test]
fn corrupt_scores_are_rejected_at_the_boundary() {
    let json = SOCIETIES.replacen(r#""fireSafety": 5"#, r#""fireSafety": 5.5"#, 1);
    assert!(serde_json::from_str::<Vec<Society>>(&json).is_err());

    let mut scores = AssessmentScores::uniform(3);
    scores.set(ScoreCategory::Governance, 0);
    assert!(matches!(derive(&scores), Err(RatingError::InvalidScores(_))));
}

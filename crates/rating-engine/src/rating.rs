//! Maturity level and LEED score derivation
//!
//! Both values are pure functions of the ten category scores. Rounding is
//! half-up throughout: a mean of exactly 2.5 rates as level 3, 1.5 as
//! level 2. All arithmetic stays in integers so the boundary is exact.

use shared_types::scores::MAX_SCORE;
use shared_types::{AssessmentScores, RatingLevel, ScoreCategory, RATING_LEVELS};

use crate::error::RatingError;

const CATEGORY_COUNT: u32 = ScoreCategory::ALL.len() as u32;

/// Mean of the ten scores, rounded half-up and clamped to 1-5
pub fn compute_overall_level(scores: &AssessmentScores) -> u8 {
    let sum = scores.sum();
    // floor(sum / n + 1/2) == floor((2 * sum + n) / (2 * n))
    let rounded = (2 * sum + CATEGORY_COUNT) / (2 * CATEGORY_COUNT);
    rounded.clamp(1, 5) as u8
}

/// Sum of the ten scores as a share of the 50-point maximum, scaled to 100
pub fn compute_leed_score(scores: &AssessmentScores) -> u8 {
    let max_total = CATEGORY_COUNT * u32::from(MAX_SCORE);
    let rounded = (2 * scores.sum() * 100 + max_total) / (2 * max_total);
    rounded.min(100) as u8
}

/// Catalog entry for a level, rejecting anything outside 1-5
pub fn level_info(level: i64) -> Result<&'static RatingLevel, RatingError> {
    RATING_LEVELS
        .iter()
        .find(|r| i64::from(r.level) == level)
        .ok_or(RatingError::UnknownLevel(level))
}

/// Everything derived from a set of scores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating {
    pub level: u8,
    pub leed_score: u8,
    pub info: &'static RatingLevel,
}

/// Validate the scores, then derive level, LEED score and level info
pub fn derive(scores: &AssessmentScores) -> Result<Rating, RatingError> {
    scores.validate()?;
    let level = compute_overall_level(scores);
    Ok(Rating {
        level,
        leed_score: compute_leed_score(scores),
        info: level_info(i64::from(level))?,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn scores_strategy() -> impl Strategy<Value = AssessmentScores> {
        prop::array::uniform10(1u8..=5).prop_map(|values| {
            let mut scores = AssessmentScores::default();
            for (category, value) in ScoreCategory::ALL.iter().zip(values) {
                scores.set(*category, value);
            }
            scores
        })
    }

    proptest! {
        /// Property: the level is always 1-5 and equals the half-up rounded mean
        #[test]
        fn overall_level_is_rounded_mean(scores in scores_strategy()) {
            let level = compute_overall_level(&scores);
            prop_assert!((1..=5).contains(&level));
            let mean = f64::from(scores.sum()) / 10.0;
            prop_assert_eq!(f64::from(level), (mean + 0.5).floor());
        }

        /// Property: LEED score stays within 0-100 and is twice the sum
        #[test]
        fn leed_score_in_range(scores in scores_strategy()) {
            let leed = compute_leed_score(&scores);
            prop_assert!(leed <= 100);
            prop_assert_eq!(u32::from(leed), scores.sum() * 2);
        }

        /// Property: raising any single category never lowers the LEED score
        #[test]
        fn leed_score_is_monotonic(
            scores in scores_strategy(),
            index in 0usize..10,
        ) {
            let category = ScoreCategory::ALL[index];
            let current = scores.get(category);
            prop_assume!(current < 5);
            let raised = scores.with(category, current + 1);
            prop_assert!(compute_leed_score(&raised) >= compute_leed_score(&scores));
            prop_assert!(compute_overall_level(&raised) >= compute_overall_level(&scores));
        }

        /// Property: derived info always matches the derived level
        #[test]
        fn derive_is_consistent(scores in scores_strategy()) {
            let rating = derive(&scores).unwrap();
            prop_assert_eq!(rating.info.level, rating.level);
        }
    }
}

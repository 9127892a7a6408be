//! The ten assessment categories and their scores

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

/// Assessment category, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScoreCategory {
    StructuralSafety,
    FireSafety,
    WaterManagement,
    ElectricalSystems,
    WasteManagement,
    GreenBuilding,
    Accessibility,
    SecuritySystems,
    CommonAreaMaintenance,
    Governance,
}

impl ScoreCategory {
    pub const ALL: [ScoreCategory; 10] = [
        ScoreCategory::StructuralSafety,
        ScoreCategory::FireSafety,
        ScoreCategory::WaterManagement,
        ScoreCategory::ElectricalSystems,
        ScoreCategory::WasteManagement,
        ScoreCategory::GreenBuilding,
        ScoreCategory::Accessibility,
        ScoreCategory::SecuritySystems,
        ScoreCategory::CommonAreaMaintenance,
        ScoreCategory::Governance,
    ];

    /// Key used in serialized score maps
    pub fn key(&self) -> &'static str {
        match self {
            ScoreCategory::StructuralSafety => "structuralSafety",
            ScoreCategory::FireSafety => "fireSafety",
            ScoreCategory::WaterManagement => "waterManagement",
            ScoreCategory::ElectricalSystems => "electricalSystems",
            ScoreCategory::WasteManagement => "wasteManagement",
            ScoreCategory::GreenBuilding => "greenBuilding",
            ScoreCategory::Accessibility => "accessibility",
            ScoreCategory::SecuritySystems => "securitySystems",
            ScoreCategory::CommonAreaMaintenance => "commonAreaMaintenance",
            ScoreCategory::Governance => "governance",
        }
    }

    /// Human-readable label printed in reports
    pub fn label(&self) -> &'static str {
        match self {
            ScoreCategory::StructuralSafety => "Structural Safety",
            ScoreCategory::FireSafety => "Fire Safety",
            ScoreCategory::WaterManagement => "Water Management",
            ScoreCategory::ElectricalSystems => "Electrical Systems",
            ScoreCategory::WasteManagement => "Waste Management",
            ScoreCategory::GreenBuilding => "Green Building",
            ScoreCategory::Accessibility => "Accessibility",
            ScoreCategory::SecuritySystems => "Security Systems",
            ScoreCategory::CommonAreaMaintenance => "Common Area Maintenance",
            ScoreCategory::Governance => "Governance & Compliance",
        }
    }
}

impl std::fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Why a score map was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    #[error("missing score for category '{0}'")]
    MissingCategory(ScoreCategory),

    #[error("score for '{category}' is not a finite number: {value}")]
    NonFinite { category: ScoreCategory, value: f64 },

    #[error("score for '{category}' is not a whole number: {value}")]
    NotIntegral { category: ScoreCategory, value: f64 },

    #[error("score for '{category}' is outside 1-5: {value}")]
    OutOfRange { category: ScoreCategory, value: f64 },
}

/// Scores for all ten categories.
///
/// Deserializing goes through a key -> number map so that an omitted
/// category is reported as [`ScoreError::MissingCategory`] rather than a
/// generic serde message. Values built in code are not range-checked until
/// [`AssessmentScores::validate`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", try_from = "BTreeMap<String, f64>")]
pub struct AssessmentScores {
    pub structural_safety: u8,
    pub fire_safety: u8,
    pub water_management: u8,
    pub electrical_systems: u8,
    pub waste_management: u8,
    pub green_building: u8,
    pub accessibility: u8,
    pub security_systems: u8,
    pub common_area_maintenance: u8,
    pub governance: u8,
}

impl AssessmentScores {
    /// Every category set to the same value
    pub fn uniform(value: u8) -> Self {
        Self {
            structural_safety: value,
            fire_safety: value,
            water_management: value,
            electrical_systems: value,
            waste_management: value,
            green_building: value,
            accessibility: value,
            security_systems: value,
            common_area_maintenance: value,
            governance: value,
        }
    }

    pub fn get(&self, category: ScoreCategory) -> u8 {
        match category {
            ScoreCategory::StructuralSafety => self.structural_safety,
            ScoreCategory::FireSafety => self.fire_safety,
            ScoreCategory::WaterManagement => self.water_management,
            ScoreCategory::ElectricalSystems => self.electrical_systems,
            ScoreCategory::WasteManagement => self.waste_management,
            ScoreCategory::GreenBuilding => self.green_building,
            ScoreCategory::Accessibility => self.accessibility,
            ScoreCategory::SecuritySystems => self.security_systems,
            ScoreCategory::CommonAreaMaintenance => self.common_area_maintenance,
            ScoreCategory::Governance => self.governance,
        }
    }

    pub fn set(&mut self, category: ScoreCategory, value: u8) {
        let slot = match category {
            ScoreCategory::StructuralSafety => &mut self.structural_safety,
            ScoreCategory::FireSafety => &mut self.fire_safety,
            ScoreCategory::WaterManagement => &mut self.water_management,
            ScoreCategory::ElectricalSystems => &mut self.electrical_systems,
            ScoreCategory::WasteManagement => &mut self.waste_management,
            ScoreCategory::GreenBuilding => &mut self.green_building,
            ScoreCategory::Accessibility => &mut self.accessibility,
            ScoreCategory::SecuritySystems => &mut self.security_systems,
            ScoreCategory::CommonAreaMaintenance => &mut self.common_area_maintenance,
            ScoreCategory::Governance => &mut self.governance,
        };
        *slot = value;
    }

    /// Builder-style variant of [`AssessmentScores::set`]
    pub fn with(mut self, category: ScoreCategory, value: u8) -> Self {
        self.set(category, value);
        self
    }

    /// Scores in report order
    pub fn iter(&self) -> impl Iterator<Item = (ScoreCategory, u8)> + '_ {
        ScoreCategory::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    pub fn sum(&self) -> u32 {
        self.iter().map(|(_, v)| u32::from(v)).sum()
    }

    /// Check every category lies in 1-5
    pub fn validate(&self) -> Result<(), ScoreError> {
        for (category, value) in self.iter() {
            if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
                return Err(ScoreError::OutOfRange {
                    category,
                    value: f64::from(value),
                });
            }
        }
        Ok(())
    }
}

impl Default for AssessmentScores {
    fn default() -> Self {
        Self::uniform(3)
    }
}

impl TryFrom<BTreeMap<String, f64>> for AssessmentScores {
    type Error = ScoreError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let mut scores = AssessmentScores::uniform(MIN_SCORE);
        for category in ScoreCategory::ALL {
            let value = *map
                .get(category.key())
                .ok_or(ScoreError::MissingCategory(category))?;
            if !value.is_finite() {
                return Err(ScoreError::NonFinite { category, value });
            }
            if value.fract() != 0.0 {
                return Err(ScoreError::NotIntegral { category, value });
            }
            if value < f64::from(MIN_SCORE) || value > f64::from(MAX_SCORE) {
                return Err(ScoreError::OutOfRange { category, value });
            }
            scores.set(category, value as u8);
        }
        Ok(scores)
    }
}

//! Domain types shared by the comparison and simulation engines.
//!
//! All output types serialize with camelCase field names so route handlers can
//! return them to the web client as-is.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Interest categories a user can track. The set is fixed; free-text
/// specialization goes in [`Interest::subcategory`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Music,
    Sports,
    Math,
    Science,
    Technical,
    Reading,
    Writing,
    Art,
    Gaming,
    Fitness,
    Social,
    Cooking,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Music,
        Category::Sports,
        Category::Math,
        Category::Science,
        Category::Technical,
        Category::Reading,
        Category::Writing,
        Category::Art,
        Category::Gaming,
        Category::Fitness,
        Category::Social,
        Category::Cooking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Music => "music",
            Category::Sports => "sports",
            Category::Math => "math",
            Category::Science => "science",
            Category::Technical => "technical",
            Category::Reading => "reading",
            Category::Writing => "writing",
            Category::Art => "art",
            Category::Gaming => "gaming",
            Category::Fitness => "fitness",
            Category::Social => "social",
            Category::Cooking => "cooking",
        }
    }
}

/// Self-rated skill level, ordinal 1 (Novice) through 4 (Expert).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Novice,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 4] = [
        SkillLevel::Novice,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
        SkillLevel::Expert,
    ];

    /// Ordinal rank in [1, 4].
    pub fn rank(self) -> u8 {
        match self {
            SkillLevel::Novice => 1,
            SkillLevel::Intermediate => 2,
            SkillLevel::Advanced => 3,
            SkillLevel::Expert => 4,
        }
    }

    pub fn from_rank(rank: u8) -> Result<Self, LevelParseError> {
        match rank {
            1 => Ok(SkillLevel::Novice),
            2 => Ok(SkillLevel::Intermediate),
            3 => Ok(SkillLevel::Advanced),
            4 => Ok(SkillLevel::Expert),
            other => Err(LevelParseError(other)),
        }
    }
}

#[derive(Debug, Error)]
#[error("skill level rank must be in 1..=4, got {0}")]
pub struct LevelParseError(pub u8);

/// How committed the user is to an interest. Defines cohort membership and
/// scales simulated growth.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum IntentLevel {
    Casual,
    Average,
    Invested,
    Competitive,
}

impl IntentLevel {
    pub const ALL: [IntentLevel; 4] = [
        IntentLevel::Casual,
        IntentLevel::Average,
        IntentLevel::Invested,
        IntentLevel::Competitive,
    ];
}

/// Pre-bucketed age range. Buckets are owned upstream; cohort matching treats
/// the range as an opaque equality key, never as a numeric overlap test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

impl AgeRange {
    pub fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Parses a bucket label such as `"13-17"`.
    pub fn parse(label: &str) -> Result<Self, AgeRangeParseError> {
        let (min, max) = label
            .split_once('-')
            .ok_or_else(|| AgeRangeParseError(label.to_string()))?;
        let min = min
            .trim()
            .parse::<u8>()
            .map_err(|_| AgeRangeParseError(label.to_string()))?;
        let max = max
            .trim()
            .parse::<u8>()
            .map_err(|_| AgeRangeParseError(label.to_string()))?;
        if min > max {
            return Err(AgeRangeParseError(label.to_string()));
        }
        Ok(Self { min, max })
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.min, self.max)
    }
}

#[derive(Debug, Error)]
#[error("invalid age range label: {0}")]
pub struct AgeRangeParseError(pub String);

/// One user's engagement with one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interest {
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub current_level: SkillLevel,
    pub intent_level: IntentLevel,
}

impl Interest {
    pub fn new(category: Category, current_level: SkillLevel, intent_level: IntentLevel) -> Self {
        Self {
            category,
            subcategory: None,
            current_level,
            intent_level,
        }
    }
}

/// The slice of one user's profile the engines consume: an opaque id, the
/// pre-bucketed age range, and the declared interests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInterests {
    pub user_id: String,
    pub age_range: AgeRange,
    pub interests: Vec<Interest>,
}

/// Cohort standing for one interest category, computed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortComparison {
    pub interest: Category,
    pub intent_level: IntentLevel,
    pub age_range: AgeRange,
    /// Peers in the cohort, excluding the subject. Always at least 1; empty
    /// cohorts produce no comparison at all.
    pub cohort_size: u32,
    /// Rank within the cohort, 0..=100.
    pub percentile: u8,
    pub encouraging_message: String,
}

/// Projected outcome for one category under a hypothetical effort plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// In [currentLevel, 4.0], rounded to 1 decimal.
    pub projected_level: f64,
    /// Effective annualized growth rate, rounded to 2 decimals.
    pub growth_rate: f64,
    /// Fractional boost from related interests, in [0, 0.5], 2 decimals.
    pub synergy_bonus: f64,
    /// Growth per unit of effort invested; 0 when effort is 0. 2 decimals.
    pub effort_efficiency: f64,
}

/// A saved what-if plan: an effort allocation, a horizon, and the forecast it
/// produced. Immutable once created except for the one-way goal-conversion
/// flag, which an external workflow flips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationScenario {
    pub id: String,
    pub user_id: String,
    /// Category -> percent (0-100). Need not sum to 100.
    pub effort_allocation: HashMap<Category, f64>,
    pub timeframe_weeks: u32,
    pub forecasted_results: BTreeMap<Category, SimulationResult>,
    pub is_converted_to_goals: bool,
    pub created_at: String,
}

impl SimulationScenario {
    /// One-way: a scenario never reverts to unconverted.
    pub fn convert_to_goals(&mut self) {
        self.is_converted_to_goals = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_level_rank_round_trip() {
        for level in SkillLevel::ALL {
            assert_eq!(SkillLevel::from_rank(level.rank()).unwrap(), level);
        }
        assert!(SkillLevel::from_rank(0).is_err());
        assert!(SkillLevel::from_rank(5).is_err());
    }

    #[test]
    fn test_age_range_parse() {
        assert_eq!(AgeRange::parse("13-17").unwrap(), AgeRange::new(13, 17));
        assert_eq!(AgeRange::parse(" 18 - 24 ").unwrap(), AgeRange::new(18, 24));
        assert!(AgeRange::parse("adult").is_err());
        assert!(AgeRange::parse("24-18").is_err());
        assert_eq!(AgeRange::new(13, 17).label(), "13-17");
    }

    #[test]
    fn test_camel_case_serialization() {
        let interest = Interest::new(
            Category::Math,
            SkillLevel::Intermediate,
            IntentLevel::Invested,
        );
        let json = serde_json::to_value(&interest).unwrap();
        assert_eq!(json["category"], "math");
        assert_eq!(json["currentLevel"], "intermediate");
        assert_eq!(json["intentLevel"], "invested");
        assert!(json.get("subcategory").is_none());
    }

    #[test]
    fn test_convert_to_goals_is_one_way() {
        let mut scenario = SimulationScenario {
            id: "s1".to_string(),
            user_id: "u1".to_string(),
            effort_allocation: HashMap::new(),
            timeframe_weeks: 12,
            forecasted_results: BTreeMap::new(),
            is_converted_to_goals: false,
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
        };
        scenario.convert_to_goals();
        assert!(scenario.is_converted_to_goals);
        scenario.convert_to_goals();
        assert!(scenario.is_converted_to_goals);
    }
}

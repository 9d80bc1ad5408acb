//! Deterministic growth forecasting.
//!
//! Each interest is projected independently under a hypothetical effort
//! allocation: base growth scales with current level and invested effort, gets
//! multiplied by commitment and diminishing returns, and picks up a synergy
//! bonus from effort poured into related categories. Same inputs always yield
//! the same outputs, which is what makes the results cacheable.

use std::collections::{BTreeMap, HashMap};

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use crate::types::{
    Category, Interest, IntentLevel, SimulationResult, SimulationScenario, SkillLevel,
};

const WEEKS_PER_YEAR: f64 = 52.0;
/// Effort is rewarded roughly linearly with a 20% overdrive allowance, then
/// capped at 100%.
const EFFORT_OVERDRIVE: f64 = 1.2;
const MAX_SYNERGY_BONUS: f64 = 0.5;
const MAX_LEVEL: f64 = 4.0;

/// Projects every interest under `effort_allocation` over `timeframe_weeks`.
///
/// Allocation entries for categories the user has no interest in produce no
/// result entry, but their effort still feeds the synergy bonus of categories
/// that reference them. Negative or NaN percentages count as zero effort.
pub fn simulate(
    interests: &[Interest],
    effort_allocation: &HashMap<Category, f64>,
    timeframe_weeks: u32,
) -> BTreeMap<Category, SimulationResult> {
    interests
        .iter()
        .map(|interest| {
            (
                interest.category,
                simulate_interest(interest, effort_allocation, timeframe_weeks),
            )
        })
        .collect()
}

fn simulate_interest(
    interest: &Interest,
    effort_allocation: &HashMap<Category, f64>,
    timeframe_weeks: u32,
) -> SimulationResult {
    let effort = allocated_effort(effort_allocation, interest.category);
    let base_growth_rate = level_multiplier(interest.current_level) * effort_multiplier(effort);
    let synergy = synergy_bonus(interest.category, effort_allocation);
    let total_growth_rate = base_growth_rate
        * commitment_multiplier(interest.intent_level)
        * diminishing_returns(interest.current_level)
        * (1.0 + synergy);
    let growth_amount = total_growth_rate * f64::from(timeframe_weeks) / WEEKS_PER_YEAR;
    let projected_level = (f64::from(interest.current_level.rank()) + growth_amount).min(MAX_LEVEL);
    let effort_efficiency = if effort > 0.0 {
        growth_amount / (effort / 100.0)
    } else {
        0.0
    };

    SimulationResult {
        projected_level: round_1dp(projected_level),
        growth_rate: round_2dp(total_growth_rate),
        synergy_bonus: round_2dp(synergy),
        effort_efficiency: round_2dp(effort_efficiency),
    }
}

/// Normalizes a raw allocation percentage: negative or non-finite values
/// count as zero effort rather than erroring, since callers may send sparse
/// or partially malformed plans.
pub fn sanitize_percent(raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 {
        raw
    } else {
        0.0
    }
}

fn allocated_effort(effort_allocation: &HashMap<Category, f64>, category: Category) -> f64 {
    sanitize_percent(effort_allocation.get(&category).copied().unwrap_or(0.0))
}

/// Lower current skill grows faster.
fn level_multiplier(level: SkillLevel) -> f64 {
    match level {
        SkillLevel::Novice => 1.0,
        SkillLevel::Intermediate => 0.8,
        SkillLevel::Advanced => 0.6,
        SkillLevel::Expert => 0.4,
    }
}

fn effort_multiplier(effort: f64) -> f64 {
    (effort / 100.0 * EFFORT_OVERDRIVE).min(1.0)
}

fn commitment_multiplier(intent: IntentLevel) -> f64 {
    match intent {
        IntentLevel::Casual => 0.8,
        IntentLevel::Average => 1.0,
        IntentLevel::Invested => 1.2,
        IntentLevel::Competitive => 1.4,
    }
}

/// Progress slows as skill rises.
fn diminishing_returns(level: SkillLevel) -> f64 {
    match level {
        SkillLevel::Novice => 1.0,
        SkillLevel::Intermediate => 0.9,
        SkillLevel::Advanced => 0.7,
        SkillLevel::Expert => 0.5,
    }
}

/// Directional synergy table. Deliberately not symmetric: Gaming draws from
/// Technical effort but nothing draws from Gaming.
pub fn synergy_partners(category: Category) -> &'static [(Category, f64)] {
    use Category::*;
    match category {
        Math => &[(Technical, 0.3), (Science, 0.2)],
        Science => &[(Math, 0.3), (Technical, 0.2)],
        Technical => &[(Math, 0.2), (Science, 0.2)],
        Reading => &[(Writing, 0.4)],
        Writing => &[(Reading, 0.4)],
        Music => &[(Art, 0.3)],
        Art => &[(Music, 0.3), (Writing, 0.2)],
        Gaming => &[(Technical, 0.2)],
        Sports => &[(Fitness, 0.4)],
        Fitness => &[(Sports, 0.4)],
        Social | Cooking => &[],
    }
}

/// Sum of `relatedEffort/100 * strength` over the category's synergy
/// partners, clamped to [0, 0.5].
fn synergy_bonus(category: Category, effort_allocation: &HashMap<Category, f64>) -> f64 {
    let total: f64 = synergy_partners(category)
        .iter()
        .map(|&(related, strength)| allocated_effort(effort_allocation, related) / 100.0 * strength)
        .sum();
    total.clamp(0.0, MAX_SYNERGY_BONUS)
}

fn round_1dp(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl SimulationScenario {
    /// Runs the simulator over `interests` and captures the plan plus its
    /// forecast as an owned, persistable record.
    pub fn new(
        user_id: impl Into<String>,
        interests: &[Interest],
        effort_allocation: HashMap<Category, f64>,
        timeframe_weeks: u32,
    ) -> Self {
        let forecasted_results = simulate(interests, &effort_allocation, timeframe_weeks);
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            effort_allocation,
            timeframe_weeks,
            forecasted_results,
            is_converted_to_goals: false,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

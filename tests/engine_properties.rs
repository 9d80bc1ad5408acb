//! Property-based tests for the comparison and simulation engines.
//!
//! Invariants covered:
//! - Percentile stays in [0, 100] and never decreases with subject level
//! - Projected level stays in [current level, 4.0]
//! - More effort never projects a lower level
//! - Zero effort always yields zero efficiency
//! - Simulation is deterministic for identical inputs
//! - Allocation fingerprints ignore map insertion order

use std::collections::HashMap;

use proptest::prelude::*;

use leveling_engine::cache::keys::allocation_fingerprint;
use leveling_engine::services::cohort::percentile_rank;
use leveling_engine::services::simulation::simulate;
use leveling_engine::types::{Category, IntentLevel, Interest, SkillLevel};

// ============================================================================
// Generators
// ============================================================================

fn arb_level() -> impl Strategy<Value = SkillLevel> {
    (1u8..=4).prop_map(|rank| SkillLevel::from_rank(rank).unwrap())
}

fn arb_intent() -> impl Strategy<Value = IntentLevel> {
    proptest::sample::select(IntentLevel::ALL.to_vec())
}

fn arb_category() -> impl Strategy<Value = Category> {
    proptest::sample::select(Category::ALL.to_vec())
}

fn arb_interest() -> impl Strategy<Value = Interest> {
    (arb_category(), arb_level(), arb_intent())
        .prop_map(|(category, level, intent)| Interest::new(category, level, intent))
}

fn arb_allocation() -> impl Strategy<Value = HashMap<Category, f64>> {
    proptest::collection::hash_map(arb_category(), 0.0f64..=100.0, 0..8)
}

fn arb_peer_levels() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(1u8..=4, 1..40)
}

// ============================================================================
// Cohort properties
// ============================================================================

proptest! {
    #[test]
    fn percentile_stays_in_bounds(level in arb_level(), peers in arb_peer_levels()) {
        let percentile = percentile_rank(level, &peers);
        prop_assert!(percentile <= 100);
    }

    #[test]
    fn percentile_monotone_in_subject_level(
        peers in arb_peer_levels(),
        lower in arb_level(),
        higher in arb_level(),
    ) {
        prop_assume!(lower.rank() <= higher.rank());
        prop_assert!(percentile_rank(lower, &peers) <= percentile_rank(higher, &peers));
    }
}

// ============================================================================
// Simulation properties
// ============================================================================

proptest! {
    #[test]
    fn projection_bounded_by_current_level_and_expert(
        interest in arb_interest(),
        allocation in arb_allocation(),
        weeks in 0u32..=104,
    ) {
        let interests = [interest.clone()];
        let results = simulate(&interests, &allocation, weeks);
        let result = &results[&interest.category];
        prop_assert!(result.projected_level >= f64::from(interest.current_level.rank()));
        prop_assert!(result.projected_level <= 4.0);
        prop_assert!(result.growth_rate.is_finite());
        prop_assert!(result.effort_efficiency.is_finite());
        prop_assert!(result.synergy_bonus >= 0.0 && result.synergy_bonus <= 0.5);
    }

    #[test]
    fn more_effort_never_projects_lower(
        interest in arb_interest(),
        low in 0.0f64..=100.0,
        high in 0.0f64..=100.0,
        weeks in 1u32..=104,
    ) {
        prop_assume!(low <= high);
        let interests = [interest.clone()];
        let low_plan: HashMap<Category, f64> = [(interest.category, low)].into_iter().collect();
        let high_plan: HashMap<Category, f64> = [(interest.category, high)].into_iter().collect();
        let low_result = simulate(&interests, &low_plan, weeks);
        let high_result = simulate(&interests, &high_plan, weeks);
        prop_assert!(
            high_result[&interest.category].projected_level
                >= low_result[&interest.category].projected_level
        );
    }

    #[test]
    fn zero_effort_means_zero_efficiency(
        interest in arb_interest(),
        weeks in 0u32..=104,
    ) {
        let interests = [interest.clone()];
        let results = simulate(&interests, &HashMap::new(), weeks);
        prop_assert_eq!(results[&interest.category].effort_efficiency, 0.0);
    }

    #[test]
    fn simulation_is_idempotent(
        interests in proptest::collection::vec(arb_interest(), 0..6),
        allocation in arb_allocation(),
        weeks in 0u32..=104,
    ) {
        let first = simulate(&interests, &allocation, weeks);
        let second = simulate(&interests, &allocation, weeks);
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// Cache-key properties
// ============================================================================

proptest! {
    #[test]
    fn fingerprint_ignores_insertion_order(allocation in arb_allocation()) {
        let entries: Vec<(Category, f64)> = allocation.iter().map(|(c, v)| (*c, *v)).collect();
        let forward: HashMap<Category, f64> = entries.iter().copied().collect();
        let reversed: HashMap<Category, f64> = entries.iter().rev().copied().collect();
        prop_assert_eq!(allocation_fingerprint(&forward), allocation_fingerprint(&reversed));
    }
}

//! Cache key derivation and TTL policy.
//!
//! Simulation keys embed a content hash of the effort allocation, so two maps
//! with the same entries in any iteration order share one cache slot.
//! Comparison results are keyed by subject alone; population churn is expected
//! to age out via TTL rather than explicit invalidation.

use std::collections::HashMap;
use std::time::Duration;

use sha2::{Digest, Sha256};

use crate::services::simulation::sanitize_percent;
use crate::types::Category;

pub const SIMULATION_TTL: Duration = Duration::from_secs(60 * 60);
pub const COMPARISON_TTL: Duration = Duration::from_secs(15 * 60);

pub fn simulation_key(user_id: &str, effort_allocation: &HashMap<Category, f64>) -> String {
    format!(
        "simulation:{}:{}",
        user_id,
        allocation_fingerprint(effort_allocation)
    )
}

pub fn comparison_key(user_id: &str) -> String {
    format!("comparison:{}", user_id)
}

/// SHA-256 hex over the sorted `category:percent` pairs. Percentages pass
/// through the same sanitizer the simulator applies, so allocations the model
/// treats identically fingerprint identically.
pub fn allocation_fingerprint(effort_allocation: &HashMap<Category, f64>) -> String {
    let mut pairs: Vec<(Category, f64)> = effort_allocation
        .iter()
        .map(|(category, percent)| (*category, sanitize_percent(*percent)))
        .collect();
    pairs.sort_by_key(|(category, _)| *category);

    let canonical = pairs
        .iter()
        .map(|(category, percent)| format!("{}:{}", category.as_str(), percent))
        .collect::<Vec<_>>()
        .join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_ignores_insertion_order() {
        let mut forward = HashMap::new();
        forward.insert(Category::Math, 10.0);
        forward.insert(Category::Music, 20.0);
        let mut reversed = HashMap::new();
        reversed.insert(Category::Music, 20.0);
        reversed.insert(Category::Math, 10.0);
        assert_eq!(
            allocation_fingerprint(&forward),
            allocation_fingerprint(&reversed)
        );
    }

    #[test]
    fn test_fingerprint_distinguishes_allocations() {
        let a: HashMap<Category, f64> = [(Category::Math, 10.0)].into_iter().collect();
        let b: HashMap<Category, f64> = [(Category::Math, 15.0)].into_iter().collect();
        assert_ne!(allocation_fingerprint(&a), allocation_fingerprint(&b));
    }

    #[test]
    fn test_fingerprint_normalizes_invalid_percents() {
        let negative: HashMap<Category, f64> = [(Category::Art, -5.0)].into_iter().collect();
        let nan: HashMap<Category, f64> = [(Category::Art, f64::NAN)].into_iter().collect();
        let zero: HashMap<Category, f64> = [(Category::Art, 0.0)].into_iter().collect();
        assert_eq!(
            allocation_fingerprint(&negative),
            allocation_fingerprint(&zero)
        );
        assert_eq!(allocation_fingerprint(&nan), allocation_fingerprint(&zero));
    }

    #[test]
    fn test_keys_are_namespaced_per_user() {
        let plan: HashMap<Category, f64> = [(Category::Math, 50.0)].into_iter().collect();
        assert_ne!(simulation_key("u1", &plan), simulation_key("u2", &plan));
        assert_eq!(comparison_key("u1"), "comparison:u1");
    }
}

//! Cache-aside front door over the pure services.
//!
//! The cache is an optional collaborator: when it is absent or unhealthy the
//! engine silently recomputes. Results are a deterministic function of the
//! inputs, so serving a cached entry and recomputing are interchangeable.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::cache::{keys, RedisCache};
use crate::config::EngineConfig;
use crate::services::{cohort, simulation};
use crate::types::{Category, CohortComparison, Interest, SimulationResult, UserInterests};

pub struct LevelingEngine {
    cache: Option<RedisCache>,
    simulation_ttl: Duration,
    comparison_ttl: Duration,
}

impl LevelingEngine {
    pub fn new(cache: Option<RedisCache>) -> Self {
        Self {
            cache,
            simulation_ttl: keys::SIMULATION_TTL,
            comparison_ttl: keys::COMPARISON_TTL,
        }
    }

    /// Builds the engine from config, connecting to Redis when a URL is set.
    /// An unreachable cache downgrades to uncached operation with a warning.
    pub async fn from_config(config: &EngineConfig) -> Self {
        let cache = match config.redis_url.as_deref() {
            Some(url) => match RedisCache::connect(url).await {
                Ok(cache) => Some(cache),
                Err(err) => {
                    tracing::warn!(error = %err, "redis cache not initialized, running uncached");
                    None
                }
            },
            None => None,
        };
        Self {
            cache,
            simulation_ttl: config.simulation_ttl,
            comparison_ttl: config.comparison_ttl,
        }
    }

    pub async fn from_env() -> Self {
        Self::from_config(&EngineConfig::from_env()).await
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// [`simulation::simulate`] behind a per-(user, allocation) cache slot.
    pub async fn simulate_for_user(
        &self,
        user_id: &str,
        interests: &[Interest],
        effort_allocation: &HashMap<Category, f64>,
        timeframe_weeks: u32,
    ) -> BTreeMap<Category, SimulationResult> {
        let key = keys::simulation_key(user_id, effort_allocation);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get::<BTreeMap<Category, SimulationResult>>(&key).await {
                tracing::debug!(user_id, "simulation cache hit");
                return hit;
            }
        }

        let results = simulation::simulate(interests, effort_allocation, timeframe_weeks);
        if let Some(cache) = &self.cache {
            cache.set(&key, &results, self.simulation_ttl).await;
        }
        results
    }

    /// [`cohort::compare`] behind a per-subject cache slot. The caller's
    /// opt-in precondition documented on [`cohort::compare`] applies here
    /// unchanged.
    pub async fn compare_for_user(
        &self,
        subject: &UserInterests,
        population: &[UserInterests],
    ) -> Vec<CohortComparison> {
        let key = keys::comparison_key(&subject.user_id);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get::<Vec<CohortComparison>>(&key).await {
                tracing::debug!(user_id = %subject.user_id, "comparison cache hit");
                return hit;
            }
        }

        let results = cohort::compare(subject, population);
        if let Some(cache) = &self.cache {
            cache.set(&key, &results, self.comparison_ttl).await;
        }
        results
    }

    /// Drops the subject's cached comparison, e.g. after a skill-level update.
    pub async fn invalidate_comparison(&self, user_id: &str) {
        if let Some(cache) = &self.cache {
            cache.delete(&keys::comparison_key(user_id)).await;
        }
    }

    /// Drops one cached simulation slot for an exact allocation.
    pub async fn invalidate_simulation(
        &self,
        user_id: &str,
        effort_allocation: &HashMap<Category, f64>,
    ) {
        if let Some(cache) = &self.cache {
            cache
                .delete(&keys::simulation_key(user_id, effort_allocation))
                .await;
        }
    }
}

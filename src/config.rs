use std::time::Duration;

use crate::cache::keys;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Absent means the engine runs uncached.
    pub redis_url: Option<String>,
    pub simulation_ttl: Duration,
    pub comparison_ttl: Duration,
    pub log_level: String,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let redis_url = std::env::var("REDIS_URL").ok().filter(|v| !v.is_empty());

        let simulation_ttl = ttl_from_env("SIMULATION_CACHE_TTL_SECS", keys::SIMULATION_TTL);
        let comparison_ttl = ttl_from_env("COMPARISON_CACHE_TTL_SECS", keys::COMPARISON_TTL);

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            redis_url,
            simulation_ttl,
            comparison_ttl,
            log_level,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            simulation_ttl: keys::SIMULATION_TTL,
            comparison_ttl: keys::COMPARISON_TTL,
            log_level: "info".to_string(),
        }
    }
}

fn ttl_from_env(name: &str, default: Duration) -> Duration {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

//! Best-effort JSON cache over Redis.
//!
//! Every operation is fail-open: connection or serialization problems become
//! cache misses (or dropped writes) and are never surfaced to callers. The
//! engines must return correct results regardless of cache health.

pub mod keys;

use std::time::Duration;

use rand::Rng;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;

// Jitter spreads out expiry so identical requests don't repopulate in a herd.
const TTL_JITTER_RATIO: f64 = 0.1;

#[derive(Clone)]
pub struct RedisCache {
    connection: MultiplexedConnection,
}

impl RedisCache {
    pub fn new(connection: MultiplexedConnection) -> Self {
        Self { connection }
    }

    pub async fn connect(redis_url: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(redis_url)?;
        let connection = client.get_multiplexed_tokio_connection().await?;
        Ok(Self::new(connection))
    }

    /// Returns the cached value, or `None` on miss, connection failure, or a
    /// corrupt payload.
    pub async fn get<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let mut conn = self.connection.clone();
        let payload: Option<String> = match conn.get(key).await {
            Ok(payload) => payload,
            Err(err) => {
                tracing::debug!(error = %err, key, "cache read failed, treating as miss");
                return None;
            }
        };
        payload.and_then(|p| serde_json::from_str(&p).ok())
    }

    /// Best-effort write with a jittered TTL. A zero TTL stores without
    /// expiry.
    pub async fn set<T>(&self, key: &str, value: &T, ttl: Duration)
    where
        T: Serialize,
    {
        let payload = match serde_json::to_string(value) {
            Ok(p) => p,
            Err(err) => {
                tracing::warn!(error = %err, key, "cache payload not serializable, skipping write");
                return;
            }
        };
        let mut conn = self.connection.clone();

        let result: Result<(), _> = if ttl.is_zero() {
            conn.set(key, payload).await
        } else {
            let ttl_secs = apply_ttl_jitter(ttl).as_secs().max(1);
            conn.set_ex(key, payload, ttl_secs).await
        };
        if let Err(err) = result {
            tracing::debug!(error = %err, key, "cache write failed");
        }
    }

    pub async fn delete(&self, key: &str) {
        let mut conn = self.connection.clone();
        let _: Result<u64, _> = conn.del(key).await;
    }

    pub async fn is_connected(&self) -> bool {
        let mut conn = self.connection.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .is_ok()
    }
}

fn apply_ttl_jitter(ttl: Duration) -> Duration {
    let base_ms = ttl.as_millis() as f64;
    let mut rng = rand::rng();
    let factor = rng.random_range(1.0 - TTL_JITTER_RATIO..=1.0 + TTL_JITTER_RATIO);
    let jittered_ms = (base_ms * factor).round().max(1.0);
    Duration::from_millis(jittered_ms as u64)
}

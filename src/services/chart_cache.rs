// src/services/chart_cache.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use super::chart::ChartData;

pub const CHART_KEY_PREFIX: &str = "mati:chart:";

/// Lifetime of a cached chart, in seconds (24 hours).
pub const CHART_TTL_SECS: u64 = 86_400;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("could not serialize chart: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Key-value store with per-entry expiry.
#[async_trait]
pub trait ChartCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), CacheError>;
}

pub fn chart_cache_key(session_id: &str) -> String {
    format!("{CHART_KEY_PREFIX}{session_id}")
}

/// Read and decode the chart stored under `key`.
///
/// Entries that are not a versioned chart, or were written under another
/// schema version, count as a miss and get overwritten by the refetch.
pub async fn load_chart(cache: &dyn ChartCache, key: &str) -> Result<Option<ChartData>, CacheError> {
    let Some(raw) = cache.get(key).await? else {
        return Ok(None);
    };
    let chart: ChartData = match serde_json::from_str(&raw) {
        Ok(chart) => chart,
        Err(err) => {
            tracing::warn!(key, error = %err, "ignoring cached entry that is not a versioned chart");
            return Ok(None);
        }
    };
    if !chart.is_current() {
        tracing::debug!(key, version = chart.schema_version, "ignoring chart with stale schema");
        return Ok(None);
    }
    Ok(Some(chart))
}

pub async fn store_chart(cache: &dyn ChartCache, key: &str, chart: &ChartData) -> Result<(), CacheError> {
    let value = serde_json::to_string(chart)?;
    cache.set(key, value, CHART_TTL_SECS).await
}

#[derive(Clone, Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-process cache with the same expiry contract as Redis `SETEX`. Test double.
#[derive(Clone, Default)]
pub struct InMemoryChartCache {
    inner: Arc<RwLock<HashMap<String, Entry>>>,
}

impl Debug for InMemoryChartCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryChartCache").finish_non_exhaustive()
    }
}

impl InMemoryChartCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with a sub-second lifetime. Used to exercise expiry.
    pub async fn set_with_ttl(&self, key: &str, value: String, ttl: Duration) {
        let mut guard = self.inner.write().await;
        guard.insert(key.to_string(), Entry { value, expires_at: Instant::now() + ttl });
    }
}

#[async_trait]
impl ChartCache for InMemoryChartCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let guard = self.inner.read().await;
        Ok(guard
            .get(key)
            .filter(|e| e.expires_at > Instant::now())
            .map(|e| e.value.clone()))
    }

    async fn set(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), CacheError> {
        self.set_with_ttl(key, value, Duration::from_secs(ttl_secs)).await;
        Ok(())
    }
}

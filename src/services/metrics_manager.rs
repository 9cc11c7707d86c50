use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsData {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub fetch_failures: u64,
    pub questions_answered: u64,
}

#[derive(Debug, Clone)]
pub struct MetricsManager {
    inner: Arc<RwLock<MetricsData>>,
}

impl Default for MetricsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsData::default())),
        }
    }

    pub async fn record_cache_hit(&self) {
        self.inner.write().await.cache_hits += 1;
    }

    pub async fn record_cache_miss(&self) {
        self.inner.write().await.cache_misses += 1;
    }

    pub async fn record_fetch_failure(&self) {
        self.inner.write().await.fetch_failures += 1;
    }

    pub async fn record_answer(&self) {
        self.inner.write().await.questions_answered += 1;
    }

    pub async fn get_metrics(&self) -> MetricsData {
        self.inner.read().await.clone()
    }
}

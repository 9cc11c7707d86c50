// src/state.rs
use std::sync::Arc;

use crate::services::answerer::QuestionAnswerer;
use crate::services::chart_cache::ChartCache;
use crate::services::chart_fetcher::ChartFetcher;
use crate::services::metrics_manager::MetricsManager;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub cache: Arc<dyn ChartCache>,
    pub fetcher: Arc<dyn ChartFetcher>,
    pub answerer: Arc<dyn QuestionAnswerer>,
    pub metrics: MetricsManager,
}

impl AppState {
    pub fn new(
        cache: Arc<dyn ChartCache>,
        fetcher: Arc<dyn ChartFetcher>,
        answerer: Arc<dyn QuestionAnswerer>,
    ) -> Self {
        Self {
            cache,
            fetcher,
            answerer,
            metrics: MetricsManager::new(),
        }
    }
}

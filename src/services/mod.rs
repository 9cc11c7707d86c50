pub mod answerer;
pub mod chart;
pub mod chart_cache;
pub mod chart_fetcher;
pub mod metrics_manager;
pub mod redis_cache;

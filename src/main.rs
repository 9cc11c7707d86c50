use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;

use mati_backend::{
    config::{BIND_ADDR, Config},
    routes,
    services::{
        answerer::MistralAnswerer, chart_fetcher::HttpChartFetcher,
        redis_cache::RedisChartCache,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mati_backend=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    let cache = RedisChartCache::new(&config.redis_host, config.redis_port)
        .context("parsing redis address")?;
    let fetcher = HttpChartFetcher::remote()?;
    let answerer = MistralAnswerer::new(config.mistral_api_key.clone())?;

    let state = Arc::new(AppState::new(Arc::new(cache), Arc::new(fetcher), Arc::new(answerer)));

    let app = routes::create_router()
        .with_state(state)
        .layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(BIND_ADDR)
        .await
        .with_context(|| format!("binding {BIND_ADDR}"))?;

    tracing::info!("mati backend listening on {}", BIND_ADDR);
    axum::serve(listener, app).await?;
    Ok(())
}

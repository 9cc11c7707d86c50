// src/routes/mod.rs
pub mod chat;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::{chat_handler, get_metrics_handler};
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/metrics", get(get_metrics_handler))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
}

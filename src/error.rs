// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::answerer::AnswerError;
use crate::services::chart_cache::CacheError;
use crate::services::chart_fetcher::FetchError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Answer(#[from] AnswerError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Fetch(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            AppError::Cache(err) => {
                tracing::error!(error = %err, "chart cache failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
            AppError::Answer(err) => {
                tracing::error!(error = %err, "answering engine failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

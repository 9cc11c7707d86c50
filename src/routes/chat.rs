use axum::{Json, extract::State};

use crate::{
    error::AppError,
    message::{BirthInput, ChatRequest, ChatResponse},
    services::{
        chart::{ChartData, adapt_chart_if_needed},
        chart_cache::{chart_cache_key, load_chart, store_chart},
        metrics_manager::MetricsData,
    },
    state::{AppState, SharedState},
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let answer = chat(&state, &payload.session_id, &payload.birth_input, &payload.question).await?;
    Ok(Json(ChatResponse { answer }))
}

/// Answer `question` against the session's chart, fetching it on a cache miss.
pub async fn chat(
    state: &AppState,
    session_id: &str,
    birth_input: &BirthInput,
    question: &str,
) -> Result<String, AppError> {
    if session_id.trim().is_empty() {
        return Err(AppError::BadRequest("session_id cannot be empty".to_string()));
    }

    let chart = resolve_chart(state, session_id, birth_input).await?;

    let answer = state.answerer.answer_life_question(question, &chart).await?;
    state.metrics.record_answer().await;
    Ok(answer)
}

async fn resolve_chart(
    state: &AppState,
    session_id: &str,
    birth_input: &BirthInput,
) -> Result<ChartData, AppError> {
    let key = chart_cache_key(session_id);

    if let Some(chart) = load_chart(state.cache.as_ref(), &key).await? {
        tracing::debug!(session_id, "chart cache hit");
        state.metrics.record_cache_hit().await;
        return Ok(chart);
    }

    tracing::debug!(session_id, "chart cache miss, fetching");
    state.metrics.record_cache_miss().await;

    let raw = match state.fetcher.fetch(birth_input).await {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(session_id, error = %err, "chart fetch failed");
            state.metrics.record_fetch_failure().await;
            return Err(err.into());
        }
    };

    let chart = adapt_chart_if_needed(raw);
    store_chart(state.cache.as_ref(), &key, &chart).await?;
    tracing::info!(session_id, key = %key, "chart cached");
    Ok(chart)
}

pub async fn get_metrics_handler(State(state): State<SharedState>) -> Json<MetricsData> {
    Json(state.metrics.get_metrics().await)
}

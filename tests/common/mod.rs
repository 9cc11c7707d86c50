#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use mati_backend::message::BirthInput;
use mati_backend::services::answerer::{AnswerError, QuestionAnswerer};
use mati_backend::services::chart::ChartData;
use mati_backend::services::chart_cache::{CacheError, ChartCache, InMemoryChartCache};
use mati_backend::services::chart_fetcher::{ChartFetcher, FetchError};
use mati_backend::state::AppState;
use reqwest::StatusCode;
use serde_json::{Value, json};

pub fn birth_input() -> BirthInput {
    serde_json::from_value(birth_input_json()).unwrap()
}

pub fn birth_input_json() -> Value {
    json!({
        "name": "Asha",
        "gender": "female",
        "birth_date": { "year": 1992, "month": 3, "day": 14 },
        "birth_time": { "hour": 6, "minute": 45 },
        "place_of_birth": "Pune, India"
    })
}

pub fn chat_body(session_id: &str, question: &str) -> String {
    json!({
        "session_id": session_id,
        "birth_input": birth_input_json(),
        "question": question,
    })
    .to_string()
}

/// Wraps the in-memory cache and records every write.
#[derive(Default)]
pub struct RecordingCache {
    pub inner: InMemoryChartCache,
    pub writes: Mutex<Vec<(String, String, u64)>>,
}

impl RecordingCache {
    pub fn writes(&self) -> Vec<(String, String, u64)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChartCache for RecordingCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), CacheError> {
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), value.clone(), ttl_secs));
        self.inner.set(key, value, ttl_secs).await
    }
}

pub enum FetchOutcome {
    Chart(Value),
    Status(StatusCode),
}

pub struct FakeFetcher {
    outcome: FetchOutcome,
    calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn returning(chart: Value) -> Self {
        Self { outcome: FetchOutcome::Chart(chart), calls: AtomicUsize::new(0) }
    }

    pub fn failing(status: StatusCode) -> Self {
        Self { outcome: FetchOutcome::Status(status), calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChartFetcher for FakeFetcher {
    async fn fetch(&self, _input: &BirthInput) -> Result<Value, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            FetchOutcome::Chart(chart) => Ok(chart.clone()),
            FetchOutcome::Status(status) => Err(FetchError::Status {
                status: *status,
                url: "https://charts.test/api/v1/chart".to_string(),
            }),
        }
    }
}

/// Answers with the question and the chart it was given, and keeps the charts.
#[derive(Default)]
pub struct EchoAnswerer {
    pub seen: Mutex<Vec<ChartData>>,
}

impl EchoAnswerer {
    pub fn seen(&self) -> Vec<ChartData> {
        self.seen.lock().unwrap().clone()
    }
}

pub fn echo(question: &str, chart: &ChartData) -> String {
    format!("{question} | {}", Value::Object(chart.chart.clone()))
}

#[async_trait]
impl QuestionAnswerer for EchoAnswerer {
    async fn answer_life_question(&self, question: &str, chart: &ChartData) -> Result<String, AnswerError> {
        self.seen.lock().unwrap().push(chart.clone());
        Ok(echo(question, chart))
    }
}

pub struct Harness {
    pub cache: Arc<RecordingCache>,
    pub fetcher: Arc<FakeFetcher>,
    pub answerer: Arc<EchoAnswerer>,
    pub state: Arc<AppState>,
}

pub fn harness(fetcher: FakeFetcher) -> Harness {
    let cache = Arc::new(RecordingCache::default());
    let fetcher = Arc::new(fetcher);
    let answerer = Arc::new(EchoAnswerer::default());
    let state = Arc::new(AppState::new(cache.clone(), fetcher.clone(), answerer.clone()));
    Harness { cache, fetcher, answerer, state }
}

/// Cache whose every call fails as if Redis were unreachable.
pub struct UnreachableCache;

#[async_trait]
impl ChartCache for UnreachableCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(redis::RedisError::from((redis::ErrorKind::IoError, "connection refused")).into())
    }

    async fn set(&self, _key: &str, _value: String, _ttl_secs: u64) -> Result<(), CacheError> {
        Err(redis::RedisError::from((redis::ErrorKind::IoError, "connection refused")).into())
    }
}

pub struct FailingAnswerer;

#[async_trait]
impl QuestionAnswerer for FailingAnswerer {
    async fn answer_life_question(&self, _question: &str, _chart: &ChartData) -> Result<String, AnswerError> {
        Err(AnswerError::Empty)
    }
}

// src/services/chart_fetcher.rs
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::message::BirthInput;

pub const CHART_API_URL: &str = "https://astro-nexus-backend-9u1s.onrender.com/api/v1/chart";
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{status} error from chart service for url: {url}")]
    Status { status: StatusCode, url: String },
    #[error("chart service timed out after {}s: {url}", .timeout.as_secs())]
    Timeout { url: String, timeout: Duration },
    #[error("{0}")]
    Request(#[from] reqwest::Error),
}

#[async_trait]
pub trait ChartFetcher: Send + Sync {
    async fn fetch(&self, input: &BirthInput) -> Result<Value, FetchError>;
}

/// Posts birth details to the remote chart service.
#[derive(Debug, Clone)]
pub struct HttpChartFetcher {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpChartFetcher {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url: url.into(), timeout })
    }

    pub fn remote() -> Result<Self, FetchError> {
        Self::new(CHART_API_URL, FETCH_TIMEOUT)
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout { url: self.url.clone(), timeout: self.timeout }
        } else {
            FetchError::Request(err)
        }
    }
}

#[async_trait]
impl ChartFetcher for HttpChartFetcher {
    async fn fetch(&self, input: &BirthInput) -> Result<Value, FetchError> {
        let resp = self
            .client
            .post(&self.url)
            .json(input)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { status, url: self.url.clone() });
        }

        resp.json::<Value>().await.map_err(|e| self.classify(e))
    }
}

// src/services/answerer.rs
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::chart::ChartData;

const MISTRAL_URL: &str = "https://api.mistral.ai/v1/chat/completions";
const MISTRAL_MODEL: &str = "mistral-small-latest";
const ANSWER_TIMEOUT: Duration = Duration::from_secs(60);

const SYSTEM_PROMPT: &str = "You are Mati, a warm and careful Vedic astrology guide. \
Answer the user's life question using only the birth chart provided as JSON. \
Keep the answer short and practical, and say so when the chart does not cover the question.";

#[derive(Debug, Error)]
pub enum AnswerError {
    #[error("answering engine request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("answering engine returned no choices")]
    Empty,
    #[error("could not encode chart: {0}")]
    Encode(#[from] serde_json::Error),
}

#[async_trait]
pub trait QuestionAnswerer: Send + Sync {
    async fn answer_life_question(&self, question: &str, chart: &ChartData) -> Result<String, AnswerError>;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<CompletionMessage>,
}

#[derive(Serialize, Deserialize)]
struct CompletionMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: CompletionMessage,
}

/// Answers questions through the Mistral chat completions API.
#[derive(Debug, Clone)]
pub struct MistralAnswerer {
    client: reqwest::Client,
    api_key: String,
    url: String,
}

impl MistralAnswerer {
    pub fn new(api_key: impl Into<String>) -> Result<Self, AnswerError> {
        Self::with_url(api_key, MISTRAL_URL)
    }

    pub fn with_url(api_key: impl Into<String>, url: impl Into<String>) -> Result<Self, AnswerError> {
        let client = reqwest::Client::builder().timeout(ANSWER_TIMEOUT).build()?;
        Ok(Self { client, api_key: api_key.into(), url: url.into() })
    }
}

#[async_trait]
impl QuestionAnswerer for MistralAnswerer {
    async fn answer_life_question(&self, question: &str, chart: &ChartData) -> Result<String, AnswerError> {
        let body = CompletionRequest {
            model: MISTRAL_MODEL,
            messages: vec![
                CompletionMessage {
                    role: "system".to_string(),
                    content: format!("{SYSTEM_PROMPT}\n\nBirth chart:\n{}", serde_json::to_string(&chart.chart)?),
                },
                CompletionMessage { role: "user".to_string(), content: question.to_string() },
            ],
        };

        let resp: CompletionResponse = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        resp.choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or(AnswerError::Empty)
    }
}

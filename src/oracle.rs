//! Completion model client used by the CV screening workflow.
//!
//! The screening core only depends on the [`CompletionOracle`] trait so tests can
//! substitute deterministic fakes; `HttpCompletionOracle` is the production
//! implementation talking to an OpenAI-compatible chat completions endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::OracleConfig;

/// Failure modes for a completion round trip. A timeout is reported separately
/// from other transport failures so callers can distinguish the two.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("model oracle timed out")]
    Timeout,
    #[error("model oracle unavailable: {0}")]
    Unavailable(String),
    #[error("model oracle rejected the request (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("model oracle returned no completion text")]
    EmptyCompletion,
}

/// External model oracle: one prompt in, one raw completion out.
#[async_trait]
pub trait CompletionOracle: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, OracleError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Blocking-per-invocation HTTP client for the screening model.
#[derive(Clone)]
pub struct HttpCompletionOracle {
    client: reqwest::Client,
    config: OracleConfig,
}

impl HttpCompletionOracle {
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| OracleError::Unavailable(err.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl CompletionOracle for HttpCompletionOracle {
    async fn complete(&self, prompt: &str) -> Result<String, OracleError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    OracleError::Timeout
                } else {
                    OracleError::Unavailable(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OracleError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response.json().await.map_err(|err| {
            if err.is_timeout() {
                OracleError::Timeout
            } else {
                OracleError::Unavailable(err.to_string())
            }
        })?;

        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(OracleError::EmptyCompletion)?;

        debug!(chars = text.len(), "completion received from model oracle");
        Ok(text)
    }
}

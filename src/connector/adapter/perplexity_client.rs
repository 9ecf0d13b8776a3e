use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error};

use crate::application::ChatClient;
use crate::domain::DomainError;

pub const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai";
const COMPLETIONS_PATH: &str = "/chat/completions";
pub const DEFAULT_MODEL: &str = "sonar";
const TEMPERATURE: f32 = 0.4;
const MAX_TOKENS: u32 = 1024;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal subset of the chat completions envelope we read.
#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// HTTP client for the Perplexity chat completions API.
///
/// One request per call, bounded by a 30 second timeout, never retried. Any
/// envelope without `choices[0].message.content` is reported as a malformed
/// response rather than an empty answer.
pub struct PerplexityClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl PerplexityClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Self::with_timeout(api_key, model, base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Pull the first choice's content out of a raw response body.
    fn parse_content(body: &str) -> Result<String, DomainError> {
        let response: ApiResponse = serde_json::from_str(body).map_err(|e| {
            DomainError::malformed_response(format!("failed to parse response: {e}"))
        })?;

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| DomainError::malformed_response("response contained no choices"))
    }
}

#[async_trait]
impl ChatClient for PerplexityClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, DomainError> {
        let request = ApiRequest {
            model: &self.model,
            messages: vec![
                ApiMessage {
                    role: "system",
                    content: system,
                },
                ApiMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stream: false,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("PerplexityClient: request failed: {e}");
                DomainError::completion_transport(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("PerplexityClient: failed to read response body: {e}");
            DomainError::completion_transport(format!("failed to read response body: {e}"))
        })?;

        if !status.is_success() {
            error!("PerplexityClient: API returned {status}: {body}");
            return Err(DomainError::completion_status(status.as_u16(), body));
        }

        debug!("PerplexityClient: received {} bytes", body.len());

        Self::parse_content(&body).map_err(|e| {
            error!("PerplexityClient: {e}; body: {body}");
            e
        })
    }
}

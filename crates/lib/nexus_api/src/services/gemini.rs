// @awa-component: CHAT-GeminiProvider
//
//! Gemini provider: speaks the `generateContent` wire format.
//!
//! The API key travels as the `key` query parameter. Every call is bounded
//! by the client-wide timeout from [`GeminiConfig`].

use std::time::Duration;

use async_trait::async_trait;
use nexus_core::relay::{ChatProvider, ProviderError, ProviderRequest};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::config::GeminiConfig;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
    top_p: f64,
    top_k: u32,
}

impl<'a> From<&'a ProviderRequest> for GenerateContentRequest<'a> {
    fn from(request: &'a ProviderRequest) -> Self {
        let g = &request.generation;
        Self {
            contents: request
                .turns
                .iter()
                .map(|turn| Content {
                    role: turn.role.as_str(),
                    parts: [TextPart { text: &turn.text }],
                })
                .collect(),
            generation_config: GenerationConfig {
                temperature: g.temperature,
                max_output_tokens: g.max_output_tokens,
                top_p: g.top_p,
                top_k: g.top_k,
            },
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, all parts joined. `None` when empty.
    pub(crate) fn into_reply(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.is_empty()).then_some(text)
    }
}

/// Errors building a [`GeminiClient`].
#[derive(Debug, thiserror::Error)]
pub enum GeminiSetupError {
    #[error("Invalid Gemini endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// [`ChatProvider`] backed by the Gemini REST API.
///
/// Not `Debug`: it holds the API key.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiSetupError> {
        let endpoint = Url::parse(&format!(
            "{}/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        ))?;
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
            timeout: config.timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn classify(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.timeout)
        } else {
            // Drop the URL: it carries the API key.
            ProviderError::Transport(e.without_url().to_string())
        }
    }
}

#[async_trait]
impl ChatProvider for GeminiClient {
    async fn generate(&self, request: &ProviderRequest) -> Result<Option<String>, ProviderError> {
        let body = GenerateContentRequest::from(request);

        let response = self
            .client
            .post(self.endpoint.clone())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.map_err(|e| self.classify(e))?;
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(self.timeout)
            } else {
                ProviderError::Malformed(e.without_url().to_string())
            }
        })?;

        let reply = parsed.into_reply();
        debug!(has_text = reply.is_some(), "gemini responded");
        Ok(reply)
    }
}

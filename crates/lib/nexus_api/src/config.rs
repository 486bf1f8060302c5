//! API server configuration.

use std::time::Duration;

use axum::http::HeaderValue;
use thiserror::Error;

/// Default CORS origin: the Vite dev server hosting the chat UI.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
/// Upper bound on a single provider call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration errors detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid CORS origin '{0}'")]
    InvalidOrigin(String),
}

/// Which browser origins may call the API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllowedOrigin {
    /// Any origin (`*`).
    Any,
    /// Exactly one origin, e.g. `https://chat.example.com`.
    Exact(HeaderValue),
}

impl AllowedOrigin {
    /// `*` allows everything; anything else must be a valid header value.
    pub fn parse(origin: &str) -> Result<Self, ConfigError> {
        let origin = origin.trim();
        if origin == "*" {
            return Ok(Self::Any);
        }
        if origin.is_empty() {
            return Err(ConfigError::InvalidOrigin(origin.to_string()));
        }
        HeaderValue::from_str(origin)
            .map(Self::Exact)
            .map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
    }
}

/// Provider connection settings.
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    /// API root, without the `/models/...` suffix.
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.into(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:3001").
    pub bind_addr: String,
    /// CORS policy for browser callers.
    pub allowed_origin: AllowedOrigin,
    pub gemini: GeminiConfig,
}

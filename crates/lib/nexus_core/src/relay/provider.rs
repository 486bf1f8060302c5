// @awa-component: CHAT-ProviderSeam
//
//! Provider abstraction: the one outbound dependency of the relay.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::persona::GenerationParams;
use crate::turn::Turn;

/// A fully assembled request, ready for a provider to serialize.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    /// Persona prompt first, then the history window, then the new message.
    pub turns: Vec<Turn>,
    pub generation: GenerationParams,
}

/// Failures surfaced by a provider call.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider rate limit exceeded")]
    RateLimited,

    #[error("Provider did not respond within {0:?}")]
    Timeout(Duration),

    #[error("Provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Provider request failed: {0}")]
    Transport(String),

    #[error("Malformed provider response: {0}")]
    Malformed(String),
}

/// A generative-language backend.
///
/// Implementations own their own timeout. `Ok(None)` means the provider
/// answered but produced no extractable text.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn generate(&self, request: &ProviderRequest) -> Result<Option<String>, ProviderError>;
}

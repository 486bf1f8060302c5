//! # nexus_api
//!
//! HTTP chat relay for Nexus.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::http::{Method, header};
use axum::routing::{get, post};
use nexus_core::persona::PersonaRegistry;
use nexus_core::relay::{ChatProvider, ChatRelay};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{AllowedOrigin, ApiConfig};
use crate::handlers::{chat, fallback, health};
use crate::services::gemini::{GeminiClient, GeminiSetupError};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Persona-aware relay to the generative-language provider.
    pub relay: Arc<ChatRelay>,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// State backed by the Gemini provider described in `config`.
    pub fn new(config: ApiConfig) -> Result<Self, GeminiSetupError> {
        let provider = Arc::new(GeminiClient::new(&config.gemini)?);
        Ok(Self::with_provider(config, provider))
    }

    /// State backed by an arbitrary provider.
    pub fn with_provider(config: ApiConfig, provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            relay: Arc::new(ChatRelay::new(PersonaRegistry::standard(), provider)),
            config,
        }
    }
}

/// CORS layer for the configured origin: `GET`/`POST` with `Content-Type`.
pub fn cors_layer(origin: &AllowedOrigin) -> CorsLayer {
    let allow_origin = match origin {
        AllowedOrigin::Any => AllowOrigin::any(),
        AllowedOrigin::Exact(value) => AllowOrigin::exact(value.clone()),
    };
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origin);

    Router::new()
        .route(routes::POST_API_CHAT, post(chat::chat_handler))
        .route(routes::GET_HEALTH, get(health::health_handler))
        .fallback(fallback::not_found_handler)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

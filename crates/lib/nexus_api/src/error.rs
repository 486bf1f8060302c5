//! Application error types.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use nexus_core::relay::{ProviderError, RelayError};
use nexus_core::wire::ErrorResponse;
use thiserror::Error;
use tracing::{error, warn};

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Provider rate limited")]
    RateLimited,

    #[error("Provider timed out: {0}")]
    Timeout(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::RateLimited => {
                warn!("provider rate limited the request");
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "rate_limited",
                    "Too many requests. Please try again shortly.",
                )
            }
            AppError::Timeout(detail) => {
                warn!(%detail, "provider timed out");
                (
                    StatusCode::REQUEST_TIMEOUT,
                    "timeout",
                    "The AI took too long to respond. Please try again.",
                )
            }
            AppError::Internal(detail) => {
                error!(%detail, "chat relay failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Failed to get a response from the AI provider.",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        match e {
            RelayError::UnknownMode(_) | RelayError::EmptyMessage => {
                AppError::Validation(e.to_string())
            }
            RelayError::Provider(ProviderError::RateLimited) => AppError::RateLimited,
            RelayError::Provider(e @ ProviderError::Timeout(_)) => AppError::Timeout(e.to_string()),
            RelayError::Provider(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

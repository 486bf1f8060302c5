//! Fallback for unmatched routes.

use axum::Json;
use axum::http::{Method, StatusCode, Uri};
use nexus_core::wire::NotFoundResponse;

use crate::routes::ENDPOINTS;

/// Any unmatched route: 404 with the list of available endpoints.
pub async fn not_found_handler(
    method: Method,
    uri: Uri,
) -> (StatusCode, Json<NotFoundResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            error: "not_found".into(),
            message: format!("No route for {method} {}", uri.path()),
            endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
        }),
    )
}

// @awa-component: CHAT-ChatHandler
//
//! Chat request handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use nexus_core::turn::Turn;
use nexus_core::wire::{ChatRequest, ChatResponse};

use crate::AppState;
use crate::error::AppResult;

/// `POST /api/chat`: relay one user message to the selected persona.
///
/// Decode failures are reported as validation errors so every outcome is a
/// JSON body.
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(body) = payload?;
    let history: Vec<Turn> = body.history.iter().map(Turn::from).collect();

    let reply = state
        .relay
        .submit_turn(&body.message, &body.mode, &history)
        .await?;

    Ok(Json(ChatResponse { reply }))
}

//! Chat handler

use axum::extract::State;
use axum::Json;
use tracing::info;

use super::ApiResult;
use super::AppState;
use crate::api::types::ChatRequest;
use crate::api::types::ChatResponse;
use crate::llm::prompts::ASSISTANT_NAME;
use crate::KhetGuruError;

/// Answer a farmer's message (POST /api/chat)
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<ChatResponse> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(KhetGuruError::InvalidInput("message must not be empty".to_string()).into());
    }
    info!("POST /api/chat ({} history turns)", req.history.len());

    let reply = state.composer.reply(message, &req.history).await;

    Ok(Json(ChatResponse {
        reply,
        timestamp: chrono::Utc::now().to_rfc3339(),
        assistant: ASSISTANT_NAME.to_string(),
    }))
}

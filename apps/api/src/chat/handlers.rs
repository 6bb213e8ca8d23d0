//! Axum route handlers for the recruiter chat.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat::pipeline::{list_chat_messages, send_chat_message};
use crate::errors::AppError;
use crate::models::chat::ChatMessageRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendChatMessageRequest {
    pub job_id: Uuid,
    pub user_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SendChatMessageResponse {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatHistoryQuery {
    pub job_id: Uuid,
    pub user_id: String,
}

/// POST /api/v1/chat
///
/// Runs the chat pipeline synchronously and returns the assistant reply.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Json(request): Json<SendChatMessageRequest>,
) -> Result<Json<SendChatMessageResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let content = send_chat_message(
        &state.db,
        &state.llm,
        request.job_id,
        &request.user_id,
        &request.message,
    )
    .await?;

    Ok(Json(SendChatMessageResponse { content }))
}

/// GET /api/v1/chat?job_id=&user_id=
///
/// The (job, user) transcript, oldest first.
pub async fn handle_list_messages(
    State(state): State<AppState>,
    Query(params): Query<ChatHistoryQuery>,
) -> Result<Json<Vec<ChatMessageRow>>, AppError> {
    let messages = list_chat_messages(&state.db, params.job_id, &params.user_id).await?;
    Ok(Json(messages))
}

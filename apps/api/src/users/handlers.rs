//! Axum route handlers for user sync.

use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SyncUserRequest {
    pub name: String,
    pub email: String,
    pub auth_id: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// POST /api/v1/users/sync
///
/// Upserts the signed-in user by external auth id. The frontend calls this
/// on every sign-in; repeat calls refresh name, email and avatar.
pub async fn handle_sync_user(
    State(state): State<AppState>,
    Json(request): Json<SyncUserRequest>,
) -> Result<Json<UserRow>, AppError> {
    if request.auth_id.trim().is_empty() {
        return Err(AppError::Validation("auth_id cannot be empty".to_string()));
    }

    let user = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (id, name, email, auth_id, avatar_url)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (auth_id)
        DO UPDATE SET name = EXCLUDED.name, email = EXCLUDED.email, avatar_url = EXCLUDED.avatar_url
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&request.name)
    .bind(&request.email)
    .bind(&request.auth_id)
    .bind(&request.avatar_url)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(user))
}

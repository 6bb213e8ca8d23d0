//! Axum route handlers for manual question management. The public intake
//! page reads questions through the same listing endpoint, so none of
//! these carry an owner gate.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::access::require_job_exists;
use crate::models::question::QuestionRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub job_id: Uuid,
    pub question: String,
    #[serde(rename = "type", default)]
    pub question_type: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct CreateQuestionResponse {
    pub question_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuestionRequest {
    pub question: String,
}

/// GET /api/v1/jobs/:id/questions
///
/// Questions in creation order; empty when the job has none (or no longer
/// exists).
pub async fn handle_list_questions(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Vec<QuestionRow>>, AppError> {
    let questions = sqlx::query_as::<_, QuestionRow>(
        "SELECT * FROM questions WHERE job_id = $1 ORDER BY created_at",
    )
    .bind(job_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(questions))
}

/// POST /api/v1/questions
///
/// Manual single insert, the recruiter-authored counterpart to generated
/// questions. `type` defaults to "text".
pub async fn handle_create_question(
    State(state): State<AppState>,
    Json(request): Json<CreateQuestionRequest>,
) -> Result<Json<CreateQuestionResponse>, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }
    require_job_exists(&state.db, request.job_id).await?;

    let question_id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO questions (id, job_id, question, type, options) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(question_id)
    .bind(request.job_id)
    .bind(&request.question)
    .bind(request.question_type.as_deref().unwrap_or("text"))
    .bind(&request.options)
    .execute(&state.db)
    .await?;

    Ok(Json(CreateQuestionResponse { question_id }))
}

/// PATCH /api/v1/questions/:id
pub async fn handle_update_question(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    Json(request): Json<UpdateQuestionRequest>,
) -> Result<StatusCode, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let result = sqlx::query("UPDATE questions SET question = $1 WHERE id = $2")
        .bind(&request.question)
        .bind(question_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Question {question_id} not found"
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/questions/:id
pub async fn handle_delete_question(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM questions WHERE id = $1")
        .bind(question_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Question {question_id} not found"
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

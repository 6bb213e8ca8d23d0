//! Axum route handlers for candidates and their answers. Candidate intake
//! comes through the public application link, so creation and answer
//! submission are not owner-gated.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::pipeline::spawn_analysis;
use crate::errors::AppError;
use crate::jobs::access::require_job_exists;
use crate::models::candidate::CandidateRow;
use crate::models::question::QuestionRow;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateCandidateRequest {
    pub name: String,
    pub whatsapp: String,
    pub email: String,
    pub job_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CreateCandidateResponse {
    pub candidate_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub candidate_id: Uuid,
    pub question_id: Uuid,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitAnswerResponse {
    pub answer_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct OwnerIdQuery {
    pub owner_id: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/candidates
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    Json(request): Json<CreateCandidateRequest>,
) -> Result<Json<CreateCandidateResponse>, AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    require_job_exists(&state.db, request.job_id).await?;

    let candidate_id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO candidates (id, job_id, name, whatsapp, email) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(candidate_id)
    .bind(request.job_id)
    .bind(&request.name)
    .bind(&request.whatsapp)
    .bind(&request.email)
    .execute(&state.db)
    .await?;

    Ok(Json(CreateCandidateResponse { candidate_id }))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<Option<CandidateRow>>, AppError> {
    let candidate = sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
        .bind(candidate_id)
        .fetch_optional(&state.db)
        .await?;

    Ok(Json(candidate))
}

/// GET /api/v1/candidates?owner_id=
///
/// Candidates across all of the owner's jobs, for the cross-job database
/// view.
pub async fn handle_list_for_owner(
    State(state): State<AppState>,
    Query(params): Query<OwnerIdQuery>,
) -> Result<Json<Vec<CandidateRow>>, AppError> {
    let candidates = sqlx::query_as::<_, CandidateRow>(
        r#"
        SELECT c.* FROM candidates c
        JOIN jobs j ON j.id = c.job_id
        WHERE j.owner_id = $1
        ORDER BY c.created_at DESC
        "#,
    )
    .bind(&params.owner_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(candidates))
}

/// GET /api/v1/jobs/:id/candidates
///
/// Candidates for one job, newest first.
pub async fn handle_list_for_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Vec<CandidateRow>>, AppError> {
    let candidates = sqlx::query_as::<_, CandidateRow>(
        "SELECT * FROM candidates WHERE job_id = $1 ORDER BY created_at DESC",
    )
    .bind(job_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(candidates))
}

/// POST /api/v1/answers
///
/// Validates that the question belongs to the candidate's job, then
/// upserts by (candidate, question): re-submitting revises the answer.
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    Json(request): Json<SubmitAnswerRequest>,
) -> Result<Json<SubmitAnswerResponse>, AppError> {
    let candidate = sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
        .bind(request.candidate_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Candidate {} not found", request.candidate_id))
        })?;

    let question = sqlx::query_as::<_, QuestionRow>("SELECT * FROM questions WHERE id = $1")
        .bind(request.question_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Question {} not found", request.question_id)))?;

    if question.job_id != candidate.job_id {
        return Err(AppError::Validation(
            "question does not belong to the candidate's job".to_string(),
        ));
    }

    let answer_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO answers (id, candidate_id, question_id, answer)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (candidate_id, question_id)
        DO UPDATE SET answer = EXCLUDED.answer
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.candidate_id)
    .bind(request.question_id)
    .bind(&request.answer)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(SubmitAnswerResponse { answer_id }))
}

/// POST /api/v1/candidates/:id/analyze
///
/// Fires the analysis pipeline as a detached task and acknowledges
/// immediately. The UI observes completion by re-fetching the candidate.
pub async fn handle_analyze_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM candidates WHERE id = $1")
        .bind(candidate_id)
        .fetch_optional(&state.db)
        .await?;
    if exists.is_none() {
        return Err(AppError::NotFound(format!(
            "Candidate {candidate_id} not found"
        )));
    }

    spawn_analysis(state.db.clone(), state.llm.clone(), candidate_id);

    Ok(StatusCode::ACCEPTED)
}

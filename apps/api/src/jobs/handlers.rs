//! Axum route handlers for job postings.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::pipeline::spawn_generation;
use crate::jobs::access::{find_owned_job, require_job_owner};
use crate::jobs::status::{derive_status, GenerationStatus};
use crate::models::job::JobRow;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub company: String,
    pub description: String,
    pub skills: String,
    pub experience: String,
    pub ideal_profile: String,
    pub owner_id: String,
}

#[derive(Debug, Serialize)]
pub struct CreateJobResponse {
    pub job_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateJobRequest {
    pub title: String,
    pub company: String,
    pub description: String,
    pub skills: String,
    pub experience: String,
    pub ideal_profile: String,
    pub owner_id: String,
}

#[derive(Debug, Deserialize)]
pub struct OwnerIdQuery {
    pub owner_id: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs
///
/// Inserts the job and fires question generation as a detached task; the
/// response does not wait for it. The caller polls the generation-status
/// endpoint to observe completion.
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> Result<Json<CreateJobResponse>, AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    if request.owner_id.trim().is_empty() {
        return Err(AppError::Validation("owner_id cannot be empty".to_string()));
    }

    let job_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO jobs (id, title, company, description, skills, experience, ideal_profile, owner_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(job_id)
    .bind(&request.title)
    .bind(&request.company)
    .bind(&request.description)
    .bind(&request.skills)
    .bind(&request.experience)
    .bind(&request.ideal_profile)
    .bind(&request.owner_id)
    .execute(&state.db)
    .await?;

    spawn_generation(state.db.clone(), state.llm.clone(), job_id);

    Ok(Json(CreateJobResponse { job_id }))
}

/// PATCH /api/v1/jobs/:id
///
/// Rewrites the descriptive fields. Generation is not re-run; existing
/// questions stay as they are.
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(request): Json<UpdateJobRequest>,
) -> Result<StatusCode, AppError> {
    require_job_owner(&state.db, job_id, &request.owner_id).await?;

    sqlx::query(
        r#"
        UPDATE jobs
        SET title = $1, company = $2, description = $3, skills = $4, experience = $5, ideal_profile = $6
        WHERE id = $7
        "#,
    )
    .bind(&request.title)
    .bind(&request.company)
    .bind(&request.description)
    .bind(&request.skills)
    .bind(&request.experience)
    .bind(&request.ideal_profile)
    .bind(job_id)
    .execute(&state.db)
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/jobs/:id
///
/// Deletes the job's questions and the job itself in one transaction.
/// Candidates, answers and chat messages are intentionally left in place:
/// applications remain queryable after a posting is withdrawn.
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Query(params): Query<OwnerIdQuery>,
) -> Result<StatusCode, AppError> {
    require_job_owner(&state.db, job_id, &params.owner_id).await?;

    let mut tx = state.db.begin().await?;
    sqlx::query("DELETE FROM questions WHERE job_id = $1")
        .bind(job_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(job_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/jobs?owner_id=
///
/// The caller's jobs, newest first.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<OwnerIdQuery>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let jobs = sqlx::query_as::<_, JobRow>(
        "SELECT * FROM jobs WHERE owner_id = $1 ORDER BY created_at DESC",
    )
    .bind(&params.owner_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(jobs))
}

/// GET /api/v1/jobs/:id?owner_id=
///
/// Returns null for a job that does not exist or belongs to someone else —
/// the two cases are indistinguishable on purpose.
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Query(params): Query<OwnerIdQuery>,
) -> Result<Json<Option<JobRow>>, AppError> {
    let job = find_owned_job(&state.db, job_id, &params.owner_id).await?;
    Ok(Json(job))
}

/// GET /api/v1/jobs/:id/generation-status
pub async fn handle_generation_status(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<GenerationStatus>, AppError> {
    let job = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions WHERE job_id = $1")
        .bind(job_id)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(derive_status(
        count,
        &job.generation_status,
        job.generation_error.as_deref(),
    )))
}

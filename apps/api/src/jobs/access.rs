//! Ownership capability checks. Every job-scoped operation goes through
//! one of these instead of comparing `owner_id` inline, so no handler can
//! forget the check.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::JobRow;

/// Loads a job and verifies the caller owns it. Missing job is NotFound;
/// an owner mismatch is Forbidden. Used by the mutation paths.
pub async fn require_job_owner(
    pool: &PgPool,
    job_id: Uuid,
    owner_id: &str,
) -> Result<JobRow, AppError> {
    let job = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    if job.owner_id != owner_id {
        return Err(AppError::Forbidden);
    }

    Ok(job)
}

/// Read-path variant: folds "missing" and "not yours" into None so the
/// existence of another recruiter's job never leaks.
pub async fn find_owned_job(
    pool: &PgPool,
    job_id: Uuid,
    owner_id: &str,
) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1 AND owner_id = $2")
        .bind(job_id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await
}

/// Existence check for operations that only need the job to be present —
/// candidate intake and question management run without an owner id.
pub async fn require_job_exists(pool: &PgPool, job_id: Uuid) -> Result<JobRow, AppError> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

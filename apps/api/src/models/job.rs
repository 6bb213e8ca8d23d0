use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A recruiter-authored posting. `owner_id` is the creator's external auth
/// id and gates every job-scoped operation.
///
/// `generation_status` is written by the question-generation pipeline:
/// 'pending' until the detached task finishes, then 'succeeded' or
/// 'failed' (with `generation_error` recorded).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    pub skills: String,
    pub experience: String,
    pub ideal_profile: String,
    pub owner_id: String,
    pub generation_status: String,
    pub generation_error: Option<String>,
    pub created_at: DateTime<Utc>,
}

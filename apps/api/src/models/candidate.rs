use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An applicant to a job via the public intake link.
///
/// The four analysis fields are absent until the analysis pipeline runs,
/// and are always written together in a single update (the schema enforces
/// all-or-nothing).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub name: String,
    pub whatsapp: String,
    pub email: String,
    pub score: Option<i32>,
    pub strengths: Option<Vec<String>>,
    pub weaknesses: Option<Vec<String>>,
    pub recommendation: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A candidate's free-text answer to one question. Unique per
/// (candidate, question); re-submission revises the existing row.
/// `score` is reserved for per-answer grading and currently unused.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnswerRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub question_id: Uuid,
    pub answer: String,
    pub score: Option<i32>,
    pub created_at: DateTime<Utc>,
}

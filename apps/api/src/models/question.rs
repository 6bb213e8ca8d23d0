use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An interview question for a job, AI-generated or manually authored.
/// `question_type` is "text" today; "multiple_choice" with `options` is
/// representable but never produced by generation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub question: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub question_type: String,
    pub options: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

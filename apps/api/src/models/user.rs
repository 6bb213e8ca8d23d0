use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A recruiter account, mirrored from the external auth provider on
/// sign-in. `auth_id` is the stable external identifier; jobs store it as
/// their owner reference.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub auth_id: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

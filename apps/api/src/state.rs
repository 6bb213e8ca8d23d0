use sqlx::PgPool;

use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum
/// extractors. Detached pipeline tasks receive clones of both fields.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
}

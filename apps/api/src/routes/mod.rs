pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::candidates::handlers as candidates;
use crate::chat::handlers as chat;
use crate::jobs::handlers as jobs;
use crate::questions::handlers as questions;
use crate::state::AppState;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Users
        .route("/api/v1/users/sync", post(users::handle_sync_user))
        // Jobs
        .route(
            "/api/v1/jobs",
            post(jobs::handle_create_job).get(jobs::handle_list_jobs),
        )
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job)
                .patch(jobs::handle_update_job)
                .delete(jobs::handle_delete_job),
        )
        .route(
            "/api/v1/jobs/:id/generation-status",
            get(jobs::handle_generation_status),
        )
        .route(
            "/api/v1/jobs/:id/questions",
            get(questions::handle_list_questions),
        )
        .route(
            "/api/v1/jobs/:id/candidates",
            get(candidates::handle_list_for_job),
        )
        // Questions (manual management)
        .route("/api/v1/questions", post(questions::handle_create_question))
        .route(
            "/api/v1/questions/:id",
            patch(questions::handle_update_question).delete(questions::handle_delete_question),
        )
        // Candidates and answers
        .route(
            "/api/v1/candidates",
            post(candidates::handle_create_candidate).get(candidates::handle_list_for_owner),
        )
        .route(
            "/api/v1/candidates/:id",
            get(candidates::handle_get_candidate),
        )
        .route(
            "/api/v1/candidates/:id/analyze",
            post(candidates::handle_analyze_candidate),
        )
        .route("/api/v1/answers", post(candidates::handle_submit_answer))
        // Chat
        .route(
            "/api/v1/chat",
            post(chat::handle_send_message).get(chat::handle_list_messages),
        )
        .with_state(state)
}

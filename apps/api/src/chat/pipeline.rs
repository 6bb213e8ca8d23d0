//! Recruiter chat — answers free-text questions about a job's candidates.
//!
//! One turn: persist the user message, build a prompt grounded in the job,
//! its candidates and the conversation so far, call the model, persist the
//! reply. Runs synchronously inside the request.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::chat::prompts::{CHAT_PROMPT_TEMPLATE, CHAT_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::candidate::CandidateRow;
use crate::models::chat::ChatMessageRow;
use crate::models::job::JobRow;

/// Runs one chat turn and returns the assistant's reply.
///
/// The user message is saved before the model call, so a failed turn
/// leaves an unanswered message in the transcript. The transcript is an
/// audit log; re-sending the question is the retry path.
pub async fn send_chat_message(
    pool: &PgPool,
    llm: &LlmClient,
    job_id: Uuid,
    user_id: &str,
    message: &str,
) -> Result<String, AppError> {
    // Checked before anything is persisted: with no credential the service
    // can never answer, and the transcript should not accumulate
    // unanswerable messages.
    llm.require_credentials()?;

    insert_message(pool, job_id, user_id, "user", message).await?;

    let job = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let candidates = sqlx::query_as::<_, CandidateRow>(
        "SELECT * FROM candidates WHERE job_id = $1 ORDER BY created_at DESC",
    )
    .bind(job_id)
    .fetch_all(pool)
    .await?;

    let history = list_chat_messages(pool, job_id, user_id).await?;

    let prompt = build_chat_prompt(&job, &candidates, &history, message);

    info!("Generating chat reply for job {job_id}");
    let reply = llm.call_text(&prompt, CHAT_SYSTEM).await?;

    insert_message(pool, job_id, user_id, "assistant", &reply).await?;

    Ok(reply)
}

/// Transcript for a (job, user) pair, oldest first. The id tiebreak keeps
/// the order stable when two messages land on the same timestamp.
pub async fn list_chat_messages(
    pool: &PgPool,
    job_id: Uuid,
    user_id: &str,
) -> Result<Vec<ChatMessageRow>, sqlx::Error> {
    sqlx::query_as::<_, ChatMessageRow>(
        "SELECT * FROM chat_messages WHERE job_id = $1 AND user_id = $2 ORDER BY created_at, id",
    )
    .bind(job_id)
    .bind(user_id)
    .fetch_all(pool)
    .await
}

async fn insert_message(
    pool: &PgPool,
    job_id: Uuid,
    user_id: &str,
    role: &str,
    content: &str,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO chat_messages (id, job_id, user_id, role, content) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(id)
    .bind(job_id)
    .bind(user_id)
    .bind(role)
    .bind(content)
    .execute(pool)
    .await?;
    Ok(id)
}

fn build_chat_prompt(
    job: &JobRow,
    candidates: &[CandidateRow],
    history: &[ChatMessageRow],
    message: &str,
) -> String {
    CHAT_PROMPT_TEMPLATE
        .replace("{job_context}", &render_job_context(job))
        .replace("{candidates_context}", &render_candidates(candidates))
        .replace("{chat_history}", &render_history(history))
        .replace("{message}", message)
}

fn render_job_context(job: &JobRow) -> String {
    format!(
        "Title: {}\nCompany: {}\nDescription: {}\nTechnical skills: {}\nExperience: {}\nIdeal profile: {}",
        job.title, job.company, job.description, job.skills, job.experience, job.ideal_profile
    )
}

/// Inlines each candidate with whatever analysis fields exist, so the
/// model can compare candidates by score when asked to.
fn render_candidates(candidates: &[CandidateRow]) -> String {
    if candidates.is_empty() {
        return "There are no candidates for this job yet.".to_string();
    }

    candidates
        .iter()
        .map(|c| {
            let mut lines = format!(
                "Name: {}\nEmail: {}\nWhatsApp: {}",
                c.name, c.email, c.whatsapp
            );
            if let Some(score) = c.score {
                lines.push_str(&format!("\nScore: {score}/100"));
            }
            if let Some(strengths) = &c.strengths {
                lines.push_str(&format!("\nStrengths: {}", strengths.join(", ")));
            }
            if let Some(weaknesses) = &c.weaknesses {
                lines.push_str(&format!("\nWeaknesses: {}", weaknesses.join(", ")));
            }
            if let Some(recommendation) = &c.recommendation {
                lines.push_str(&format!("\nRecommendation: {recommendation}"));
            }
            lines
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_history(history: &[ChatMessageRow]) -> String {
    history
        .iter()
        .map(|m| {
            let speaker = if m.role == "assistant" {
                "Assistant"
            } else {
                "User"
            };
            format!("{speaker}: {}", m.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn job_fixture() -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            title: "Platform Engineer".to_string(),
            company: "Acme".to_string(),
            description: "Keep the lights on.".to_string(),
            skills: "Kubernetes".to_string(),
            experience: "Senior".to_string(),
            ideal_profile: "Calm under pressure.".to_string(),
            owner_id: "user_1".to_string(),
            generation_status: "succeeded".to_string(),
            generation_error: None,
            created_at: Utc::now(),
        }
    }

    fn candidate(name: &str) -> CandidateRow {
        CandidateRow {
            id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            name: name.to_string(),
            whatsapp: "+5511999999999".to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            score: None,
            strengths: None,
            weaknesses: None,
            recommendation: None,
            created_at: Utc::now(),
        }
    }

    fn message(role: &str, content: &str) -> ChatMessageRow {
        ChatMessageRow {
            id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            user_id: "user_1".to_string(),
            role: role.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_candidates_empty_roster() {
        assert_eq!(
            render_candidates(&[]),
            "There are no candidates for this job yet."
        );
    }

    #[test]
    fn test_render_candidates_without_analysis_omits_analysis_lines() {
        let rendered = render_candidates(&[candidate("Ada")]);
        assert!(rendered.contains("Name: Ada"));
        assert!(!rendered.contains("Score:"));
        assert!(!rendered.contains("Strengths:"));
    }

    #[test]
    fn test_render_candidates_inlines_analysis() {
        let mut analyzed = candidate("Grace");
        analyzed.score = Some(91);
        analyzed.strengths = Some(vec!["Systems thinking".to_string(), "Mentorship".to_string()]);
        analyzed.weaknesses = Some(vec!["Frontend".to_string()]);
        analyzed.recommendation = Some("Strong hire.".to_string());

        let rendered = render_candidates(&[analyzed]);
        assert!(rendered.contains("Score: 91/100"));
        assert!(rendered.contains("Strengths: Systems thinking, Mentorship"));
        assert!(rendered.contains("Weaknesses: Frontend"));
        assert!(rendered.contains("Recommendation: Strong hire."));
    }

    #[test]
    fn test_render_history_alternates_speakers() {
        let history = vec![
            message("user", "Who scored highest?"),
            message("assistant", "Grace, with 91."),
        ];
        assert_eq!(
            render_history(&history),
            "User: Who scored highest?\nAssistant: Grace, with 91."
        );
    }

    #[test]
    fn test_chat_prompt_contains_all_sections() {
        let job = job_fixture();
        let history = vec![message("user", "Hello")];
        let prompt = build_chat_prompt(&job, &[candidate("Ada")], &history, "Compare them");

        assert!(prompt.contains("JOB CONTEXT:\nTitle: Platform Engineer"));
        assert!(prompt.contains("Name: Ada"));
        assert!(prompt.contains("User: Hello"));
        assert!(prompt.contains("User question: Compare them"));
        assert!(!prompt.contains("{job_context}"));
        assert!(!prompt.contains("{message}"));
    }
}

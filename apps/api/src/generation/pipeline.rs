//! Question generation — turns a job posting into interview questions.
//!
//! Flow: load job → build prompt → LLM call → extract JSON array →
//! insert questions + mark job succeeded (one transaction).
//!
//! The pipeline runs as a detached task fired from job creation. It has no
//! completion callback; it reports only through the store, where the
//! generation-status endpoint picks the result up.

use serde::Deserialize;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::prompts::{
    QUESTION_GENERATION_PROMPT_TEMPLATE, QUESTION_GENERATION_SYSTEM,
};
use crate::llm_client::extract::{extract_array, Extraction};
use crate::llm_client::LlmClient;
use crate::models::job::JobRow;

/// One entry of the model's JSON array output. `type` is optional in the
/// wire format and defaults to "text".
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedQuestion {
    pub question: String,
    #[serde(rename = "type", default)]
    pub question_type: Option<String>,
}

impl GeneratedQuestion {
    pub fn type_or_default(&self) -> &str {
        self.question_type.as_deref().unwrap_or("text")
    }
}

/// Fires the generation pipeline as a detached task. Failures are recorded
/// on the job so the UI can distinguish "failed" from "still generating".
pub fn spawn_generation(pool: PgPool, llm: LlmClient, job_id: Uuid) {
    tokio::spawn(async move {
        if let Err(e) = generate_questions(&pool, &llm, job_id).await {
            error!("Question generation for job {job_id} failed: {e}");
            if let Err(mark_err) = mark_generation_failed(&pool, job_id, &e.to_string()).await {
                error!("Could not record generation failure for job {job_id}: {mark_err}");
            }
        }
    });
}

/// Runs the full generation pipeline for a job. Returns the parsed list;
/// persistence is the effect callers rely on.
pub async fn generate_questions(
    pool: &PgPool,
    llm: &LlmClient,
    job_id: Uuid,
) -> Result<Vec<GeneratedQuestion>, AppError> {
    let job = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let prompt = build_generation_prompt(&job);

    info!("Generating interview questions for job {job_id}");
    let content = llm
        .call_text(&prompt, QUESTION_GENERATION_SYSTEM)
        .await?;

    let questions: Vec<GeneratedQuestion> = match extract_array(&content) {
        Extraction::Parsed(questions) => questions,
        Extraction::Malformed(raw) => {
            error!("Question generation for job {job_id} returned unparsable output: {raw}");
            return Err(AppError::MalformedOutput { raw });
        }
    };

    // All questions land together with the status flip, or none do.
    let mut tx = pool.begin().await?;
    for q in &questions {
        sqlx::query("INSERT INTO questions (id, job_id, question, type) VALUES ($1, $2, $3, $4)")
            .bind(Uuid::new_v4())
            .bind(job_id)
            .bind(&q.question)
            .bind(q.type_or_default())
            .execute(&mut *tx)
            .await?;
    }
    sqlx::query(
        "UPDATE jobs SET generation_status = 'succeeded', generation_error = NULL WHERE id = $1",
    )
    .bind(job_id)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    info!("Generated {} questions for job {job_id}", questions.len());
    Ok(questions)
}

fn build_generation_prompt(job: &JobRow) -> String {
    QUESTION_GENERATION_PROMPT_TEMPLATE
        .replace("{title}", &job.title)
        .replace("{company}", &job.company)
        .replace("{description}", &job.description)
        .replace("{skills}", &job.skills)
        .replace("{experience}", &job.experience)
        .replace("{ideal_profile}", &job.ideal_profile)
}

async fn mark_generation_failed(
    pool: &PgPool,
    job_id: Uuid,
    message: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE jobs SET generation_status = 'failed', generation_error = $1 WHERE id = $2")
        .bind(message)
        .bind(job_id)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn job_fixture() -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            description: "Build and operate payment services.".to_string(),
            skills: "Rust, PostgreSQL".to_string(),
            experience: "5+ years".to_string(),
            ideal_profile: "Owns problems end to end.".to_string(),
            owner_id: "user_123".to_string(),
            generation_status: "pending".to_string(),
            generation_error: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_parses_question_list_with_type_default() {
        let raw = r#"[{"question":"Q1","type":"text"},{"question":"Q2"}]"#;
        let questions: Vec<GeneratedQuestion> = match extract_array(raw) {
            Extraction::Parsed(qs) => qs,
            Extraction::Malformed(_) => panic!("expected parse"),
        };

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question, "Q1");
        assert_eq!(questions[0].type_or_default(), "text");
        assert_eq!(questions[1].question, "Q2");
        assert_eq!(questions[1].type_or_default(), "text");
    }

    #[test]
    fn test_parses_fenced_output() {
        let raw = "```json\n[{\"question\":\"Q1\"}]\n```";
        let questions: Vec<GeneratedQuestion> = match extract_array(raw) {
            Extraction::Parsed(qs) => qs,
            Extraction::Malformed(_) => panic!("expected parse"),
        };
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn test_prose_output_is_malformed() {
        let raw = "I cannot generate questions for this job.";
        let result: Extraction<Vec<GeneratedQuestion>> = extract_array(raw);
        assert!(matches!(result, Extraction::Malformed(_)));
    }

    #[test]
    fn test_prompt_fills_all_placeholders() {
        let job = job_fixture();
        let prompt = build_generation_prompt(&job);

        assert!(prompt.contains("Title: Backend Engineer"));
        assert!(prompt.contains("Company: Acme"));
        assert!(prompt.contains("Technical skills: Rust, PostgreSQL"));
        assert!(prompt.contains("Experience: 5+ years"));
        assert!(prompt.contains("Ideal profile: Owns problems end to end."));
        assert!(!prompt.contains("{title}"));
        assert!(!prompt.contains("{ideal_profile}"));
    }

    #[test]
    fn test_prompt_keeps_json_example_braces() {
        // The template's JSON example uses literal braces; placeholder
        // replacement must leave them alone.
        let prompt = build_generation_prompt(&job_fixture());
        assert!(prompt.contains(r#"{ "question": "Question 1", "type": "text" }"#));
    }
}

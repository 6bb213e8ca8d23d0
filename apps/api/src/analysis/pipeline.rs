//! Candidate analysis — scores a candidate's answers against their job.
//!
//! Flow: load candidate + job + questions + answers → pair Q/A by
//! question id → LLM call → extract + normalize the JSON object →
//! persist the four analysis fields in one update.
//!
//! A failed analysis leaves the candidate's analysis fields absent; there
//! is no persisted failure marker, and re-triggering is the retry path.

use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::analysis::normalize::{normalize_analysis, CandidateAnalysis};
use crate::analysis::prompts::{CANDIDATE_ANALYSIS_PROMPT_TEMPLATE, CANDIDATE_ANALYSIS_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::extract::{extract_object, Extraction};
use crate::llm_client::LlmClient;
use crate::models::candidate::{AnswerRow, CandidateRow};
use crate::models::job::JobRow;
use crate::models::question::QuestionRow;

/// Placeholder for questions the candidate skipped.
const NO_ANSWER: &str = "No answer";

/// Fires the analysis pipeline as a detached task.
pub fn spawn_analysis(pool: PgPool, llm: LlmClient, candidate_id: Uuid) {
    tokio::spawn(async move {
        match analyze_candidate(&pool, &llm, candidate_id).await {
            Ok(analysis) => info!(
                "Analysis for candidate {candidate_id} complete (score {})",
                analysis.score
            ),
            Err(e) => error!("Analysis for candidate {candidate_id} failed: {e}"),
        }
    });
}

/// Runs the full analysis pipeline for one candidate.
pub async fn analyze_candidate(
    pool: &PgPool,
    llm: &LlmClient,
    candidate_id: Uuid,
) -> Result<CandidateAnalysis, AppError> {
    let candidate = sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
        .bind(candidate_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;

    let job = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(candidate.job_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", candidate.job_id)))?;

    let questions = sqlx::query_as::<_, QuestionRow>(
        "SELECT * FROM questions WHERE job_id = $1 ORDER BY created_at",
    )
    .bind(candidate.job_id)
    .fetch_all(pool)
    .await?;

    let answers = sqlx::query_as::<_, AnswerRow>("SELECT * FROM answers WHERE candidate_id = $1")
        .bind(candidate_id)
        .fetch_all(pool)
        .await?;

    let transcript = render_transcript(&questions, &answers);
    let prompt = build_analysis_prompt(&job, &candidate.name, &transcript);

    info!(
        "Analyzing candidate {candidate_id} for job {}",
        candidate.job_id
    );
    let content = llm.call_text(&prompt, CANDIDATE_ANALYSIS_SYSTEM).await?;

    let value: serde_json::Value = match extract_object(&content) {
        Extraction::Parsed(value) => value,
        Extraction::Malformed(raw) => {
            error!("Analysis for candidate {candidate_id} returned unparsable output: {raw}");
            return Err(AppError::MalformedOutput { raw });
        }
    };

    let analysis = match normalize_analysis(&value) {
        Some(analysis) => analysis,
        None => {
            error!("Analysis for candidate {candidate_id} had no usable score: {content}");
            return Err(AppError::MalformedOutput { raw: content });
        }
    };

    // All four fields in one update — never a partial analysis.
    sqlx::query(
        r#"
        UPDATE candidates
        SET score = $1, strengths = $2, weaknesses = $3, recommendation = $4
        WHERE id = $5
        "#,
    )
    .bind(analysis.score)
    .bind(&analysis.strengths)
    .bind(&analysis.weaknesses)
    .bind(&analysis.recommendation)
    .bind(candidate_id)
    .execute(pool)
    .await?;

    Ok(analysis)
}

/// Pairs each question with the candidate's answer by question id. The
/// first matching answer wins; unanswered questions get a placeholder.
fn render_transcript(questions: &[QuestionRow], answers: &[AnswerRow]) -> String {
    questions
        .iter()
        .map(|q| {
            let answer = answers
                .iter()
                .find(|a| a.question_id == q.id)
                .map(|a| a.answer.as_str())
                .unwrap_or(NO_ANSWER);
            format!("Question: {}\nAnswer: {}", q.question, answer)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn build_analysis_prompt(job: &JobRow, candidate_name: &str, transcript: &str) -> String {
    CANDIDATE_ANALYSIS_PROMPT_TEMPLATE
        .replace("{title}", &job.title)
        .replace("{company}", &job.company)
        .replace("{description}", &job.description)
        .replace("{skills}", &job.skills)
        .replace("{experience}", &job.experience)
        .replace("{ideal_profile}", &job.ideal_profile)
        .replace("{candidate_name}", candidate_name)
        .replace("{transcript}", transcript)
}

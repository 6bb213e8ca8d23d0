//! Derived generation status for a job's dashboard.

use serde::Serialize;

/// What the UI polls for while question generation runs in the background.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GenerationStatus {
    Success { count: i64 },
    Error { message: String },
    Pending,
}

/// Derives the visible status from the question count and the durable
/// status the pipeline wrote.
///
/// Persisted questions always win over a stored error: a recruiter who
/// adds questions by hand after a failed generation sees a working job,
/// not a stale failure. A 'succeeded' run that produced zero questions
/// still reports success — an empty result from the model is not the same
/// as a run that never finished.
pub fn derive_status(
    question_count: i64,
    generation_status: &str,
    generation_error: Option<&str>,
) -> GenerationStatus {
    if question_count > 0 {
        return GenerationStatus::Success {
            count: question_count,
        };
    }

    match generation_status {
        "failed" => GenerationStatus::Error {
            message: generation_error
                .unwrap_or("Question generation failed")
                .to_string(),
        },
        "succeeded" => GenerationStatus::Success { count: 0 },
        _ => GenerationStatus::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_questions_present_is_success() {
        let status = derive_status(5, "succeeded", None);
        assert_eq!(status, GenerationStatus::Success { count: 5 });
    }

    #[test]
    fn test_questions_win_over_stored_error() {
        // Manually added questions after a failed run: the stale error
        // must not surface.
        let status = derive_status(3, "failed", Some("provider outage"));
        assert_eq!(status, GenerationStatus::Success { count: 3 });
    }

    #[test]
    fn test_zero_questions_with_failure_is_error() {
        let status = derive_status(0, "failed", Some("provider outage"));
        assert_eq!(
            status,
            GenerationStatus::Error {
                message: "provider outage".to_string()
            }
        );
    }

    #[test]
    fn test_failure_without_message_gets_fallback() {
        let status = derive_status(0, "failed", None);
        assert_eq!(
            status,
            GenerationStatus::Error {
                message: "Question generation failed".to_string()
            }
        );
    }

    #[test]
    fn test_zero_questions_still_pending() {
        assert_eq!(derive_status(0, "pending", None), GenerationStatus::Pending);
    }

    #[test]
    fn test_succeeded_with_zero_questions_is_empty_success() {
        let status = derive_status(0, "succeeded", None);
        assert_eq!(status, GenerationStatus::Success { count: 0 });
    }

    #[test]
    fn test_status_serializes_with_tag() {
        let value = serde_json::to_value(GenerationStatus::Success { count: 5 }).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["count"], 5);

        let value = serde_json::to_value(GenerationStatus::Pending).unwrap();
        assert_eq!(value["status"], "pending");

        let value = serde_json::to_value(GenerationStatus::Error {
            message: "boom".to_string(),
        })
        .unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["message"], "boom");
    }
}

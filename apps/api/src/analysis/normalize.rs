//! Shape normalization for the analysis object the model returns.
//!
//! The prompt asks for `{score, strengths, weaknesses, recommendation}`,
//! but models drift: a lone strength arrives as a bare string, the
//! recommendation as a number. Coercion rules live here so the persisted
//! shape is always the same.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The persisted analysis block. All four fields land on the candidate
/// together or not at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateAnalysis {
    pub score: i32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendation: String,
}

/// Coerces the loosely-typed object the model returned into the persisted
/// shape. Returns None when `score` is missing or non-numeric — that is
/// malformed output, not a coercible shape.
pub fn normalize_analysis(value: &Value) -> Option<CandidateAnalysis> {
    let score = value.get("score")?.as_f64()? as i32;

    Some(CandidateAnalysis {
        score,
        strengths: coerce_string_list(value.get("strengths")),
        weaknesses: coerce_string_list(value.get("weaknesses")),
        recommendation: coerce_string(value.get("recommendation")),
    })
}

/// A single string becomes a one-element list; anything else that is not
/// an array becomes empty.
fn coerce_string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn coerce_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_well_formed_object_passes_through() {
        let value = json!({
            "score": 85,
            "strengths": ["Clear communicator", "Strong fundamentals"],
            "weaknesses": ["Limited production experience"],
            "recommendation": "Advance to the next round."
        });

        let analysis = normalize_analysis(&value).unwrap();
        assert_eq!(analysis.score, 85);
        assert_eq!(analysis.strengths.len(), 2);
        assert_eq!(analysis.weaknesses, vec!["Limited production experience"]);
        assert_eq!(analysis.recommendation, "Advance to the next round.");
    }

    #[test]
    fn test_string_strengths_wrapped_and_numeric_recommendation_stringified() {
        let value = json!({
            "score": 85,
            "strengths": "Good communicator",
            "weaknesses": ["Slow on algorithms"],
            "recommendation": 42
        });

        let analysis = normalize_analysis(&value).unwrap();
        assert_eq!(analysis.strengths, vec!["Good communicator"]);
        assert_eq!(analysis.weaknesses, vec!["Slow on algorithms"]);
        assert_eq!(analysis.recommendation, "42");
    }

    #[test]
    fn test_non_array_non_string_lists_become_empty() {
        let value = json!({
            "score": 50,
            "strengths": {"unexpected": "object"},
            "weaknesses": 7,
            "recommendation": "Maybe."
        });

        let analysis = normalize_analysis(&value).unwrap();
        assert!(analysis.strengths.is_empty());
        assert!(analysis.weaknesses.is_empty());
    }

    #[test]
    fn test_missing_lists_become_empty() {
        let value = json!({"score": 10, "recommendation": "Pass."});

        let analysis = normalize_analysis(&value).unwrap();
        assert!(analysis.strengths.is_empty());
        assert!(analysis.weaknesses.is_empty());
    }

    #[test]
    fn test_missing_recommendation_becomes_empty_string() {
        let value = json!({"score": 70});
        let analysis = normalize_analysis(&value).unwrap();
        assert_eq!(analysis.recommendation, "");
    }

    #[test]
    fn test_fractional_score_truncates() {
        let value = json!({"score": 87.9});
        assert_eq!(normalize_analysis(&value).unwrap().score, 87);
    }

    #[test]
    fn test_missing_score_is_none() {
        let value = json!({"strengths": ["x"], "recommendation": "y"});
        assert!(normalize_analysis(&value).is_none());
    }

    #[test]
    fn test_non_numeric_score_is_none() {
        let value = json!({"score": "eighty-five"});
        assert!(normalize_analysis(&value).is_none());
    }

    #[test]
    fn test_non_string_list_items_are_stringified() {
        let value = json!({"score": 60, "strengths": ["solid", 3]});
        let analysis = normalize_analysis(&value).unwrap();
        assert_eq!(analysis.strengths, vec!["solid".to_string(), "3".to_string()]);
    }
}

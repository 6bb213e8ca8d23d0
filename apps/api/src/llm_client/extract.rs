//! Defensive extraction of typed JSON from free-form model output.
//!
//! Models asked for "JSON only" still wrap their answer in code fences or
//! prose often enough that a bare `serde_json::from_str` is not reliable.
//! The extractors try the widest bracketed slice first, then the whole
//! text, and hand back the raw output on failure so the caller can log it.

use serde::de::DeserializeOwned;

/// Outcome of extracting typed JSON from model output.
#[derive(Debug)]
pub enum Extraction<T> {
    Parsed(T),
    /// The untouched model output, preserved for offline diagnosis.
    Malformed(String),
}

/// Extracts a top-level JSON array from `raw`.
pub fn extract_array<T: DeserializeOwned>(raw: &str) -> Extraction<T> {
    extract_delimited(raw, '[', ']')
}

/// Extracts a top-level JSON object from `raw`.
pub fn extract_object<T: DeserializeOwned>(raw: &str) -> Extraction<T> {
    extract_delimited(raw, '{', '}')
}

fn extract_delimited<T: DeserializeOwned>(raw: &str, open: char, close: char) -> Extraction<T> {
    let text = strip_json_fences(raw);

    // Widest slice between the first opening and last closing delimiter.
    if let (Some(start), Some(end)) = (text.find(open), text.rfind(close)) {
        if start < end {
            if let Ok(parsed) = serde_json::from_str(&text[start..=end]) {
                return Extraction::Parsed(parsed);
            }
        }
    }

    // Fall back to parsing the entire response.
    match serde_json::from_str(text) {
        Ok(parsed) => Extraction::Parsed(parsed),
        Err(_) => Extraction::Malformed(raw.to_string()),
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_array_clean_json() {
        let raw = r#"[{"question": "Q1", "type": "text"}]"#;
        let result: Extraction<Value> = extract_array(raw);
        assert!(matches!(result, Extraction::Parsed(_)));
    }

    #[test]
    fn test_extract_array_wrapped_in_prose() {
        let raw = "Here are the questions you asked for:\n\n[\"one\", \"two\"]\n\nGood luck!";
        let result: Extraction<Vec<String>> = extract_array(raw);
        match result {
            Extraction::Parsed(items) => assert_eq!(items, vec!["one", "two"]),
            Extraction::Malformed(_) => panic!("expected parse"),
        }
    }

    #[test]
    fn test_extract_array_inside_code_fence() {
        let raw = "```json\n[\"a\"]\n```";
        let result: Extraction<Vec<String>> = extract_array(raw);
        match result {
            Extraction::Parsed(items) => assert_eq!(items, vec!["a"]),
            Extraction::Malformed(_) => panic!("expected parse"),
        }
    }

    #[test]
    fn test_extract_object_wrapped_in_prose() {
        let raw = "Sure! Here is the analysis:\n{\"score\": 85}\nLet me know if you need more.";
        let result: Extraction<Value> = extract_object(raw);
        match result {
            Extraction::Parsed(value) => assert_eq!(value["score"], 85),
            Extraction::Malformed(_) => panic!("expected parse"),
        }
    }

    #[test]
    fn test_extract_object_whole_text_fallback() {
        // No braces at all, but the whole text is valid JSON of the target
        // type.
        let result: Extraction<Value> = extract_object("42");
        match result {
            Extraction::Parsed(value) => assert_eq!(value, 42),
            Extraction::Malformed(_) => panic!("expected parse"),
        }
    }

    #[test]
    fn test_extract_array_truncated_output_is_malformed() {
        let raw = r#"[{"question": "Q1", "type": "te"#;
        let result: Extraction<Value> = extract_array(raw);
        match result {
            Extraction::Malformed(kept) => assert_eq!(kept, raw),
            Extraction::Parsed(_) => panic!("truncated JSON must not parse"),
        }
    }

    #[test]
    fn test_extract_array_plain_prose_is_malformed() {
        let raw = "I could not produce any questions for this job.";
        let result: Extraction<Value> = extract_array(raw);
        assert!(matches!(result, Extraction::Malformed(_)));
    }

    #[test]
    fn test_extract_object_mismatched_type_is_malformed() {
        // Valid JSON, wrong shape for the requested type.
        #[derive(serde::Deserialize, Debug)]
        struct Expected {
            #[allow(dead_code)]
            score: i32,
        }
        let result: Extraction<Expected> = extract_object(r#"{"rating": "high"}"#);
        assert!(matches!(result, Extraction::Malformed(_)));
    }

    #[test]
    fn test_malformed_preserves_raw_text() {
        let raw = "```json\nnot json at all\n```";
        let result: Extraction<Value> = extract_object(raw);
        match result {
            Extraction::Malformed(kept) => assert_eq!(kept, raw),
            Extraction::Parsed(_) => panic!("expected malformed"),
        }
    }
}

//! Decoding structured model replies.
//!
//! Models often wrap JSON in a markdown fence even when told not to, so the
//! fenced block is located first and then decoded into a typed schema. Any
//! decode failure becomes `ModelError::MalformedOutput`.

use serde::de::DeserializeOwned;

use super::gateway::ModelError;

/// Returns the JSON payload inside a markdown code fence, or the trimmed text.
pub fn extract_json_block(text: &str) -> &str {
    if let Some(start) = text.find("```json") {
        let content_start = start + "```json".len();
        if let Some(end) = text[content_start..].find("```") {
            return text[content_start..content_start + end].trim();
        }
    }

    if let Some(start) = text.find("```") {
        let content_start = start + 3;
        // skip a language tag on the opening line
        let body_start = text[content_start..]
            .find('\n')
            .map(|i| content_start + i + 1)
            .unwrap_or(content_start);
        if let Some(end) = text[body_start..].find("```") {
            return text[body_start..body_start + end].trim();
        }
    }

    text.trim()
}

/// Decodes a model reply into `T`.
pub fn parse_model_json<T: DeserializeOwned>(raw: &str) -> Result<T, ModelError> {
    serde_json::from_str(extract_json_block(raw))
        .map_err(|e| ModelError::malformed(format!("invalid JSON shape: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Reply {
        items: Vec<String>,
    }

    #[test]
    fn raw_json_passes_through() {
        assert_eq!(extract_json_block("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn json_fence_is_unwrapped() {
        let text = "Here you go:\n```json\n{\"items\": [\"x\"]}\n```\nEnjoy.";
        assert_eq!(extract_json_block(text), "{\"items\": [\"x\"]}");
    }

    #[test]
    fn generic_fence_skips_language_tag() {
        let text = "```javascript\n[1, 2]\n```";
        assert_eq!(extract_json_block(text), "[1, 2]");
    }

    #[test]
    fn parses_into_typed_schema() {
        let reply: Reply = parse_model_json("```json\n{\"items\": [\"a\", \"b\"]}\n```").unwrap();
        assert_eq!(reply.items, vec!["a", "b"]);
    }

    #[test]
    fn shape_mismatch_is_malformed_output() {
        let result: Result<Reply, _> = parse_model_json("{\"items\": \"not a list\"}");
        assert!(matches!(result, Err(ModelError::MalformedOutput(_))));

        let result: Result<Reply, _> = parse_model_json("Sorry, I can't help with that.");
        assert!(matches!(result, Err(ModelError::MalformedOutput(_))));
    }
}

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::{common::entities::app_errors::CoreError, llm::entities::RawModelOutput};

const FENCE: &str = "```";

/// Isolates the JSON document inside raw model output.
///
/// The text is accepted as-is when it already starts like a JSON document.
/// Otherwise exactly one fenced block (untagged or tagged `json`) is required;
/// prose around the fence is ignored. A second fenced block makes the answer
/// ambiguous and fails closed like anything else.
pub fn extract_json_document(raw: &str) -> Result<&str, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::MalformedResponse(
            "model returned an empty response".to_string(),
        ));
    }

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Ok(trimmed);
    }

    let (block, rest) = extract_fenced_block(trimmed).ok_or_else(|| {
        CoreError::MalformedResponse(
            "response is neither a JSON document nor a fenced JSON block".to_string(),
        )
    })?;

    if rest.contains(FENCE) {
        warn!("Model output contains more than one fenced block");
        return Err(CoreError::MalformedResponse(
            "response contains more than one fenced block".to_string(),
        ));
    }

    Ok(block)
}

/// Returns the first fenced block and the text after its closing fence.
fn extract_fenced_block(text: &str) -> Option<(&str, &str)> {
    let opening = text.find(FENCE)?;
    let after_fence = &text[opening + FENCE.len()..];

    let line_end = after_fence.find('\n')?;
    let tag = after_fence[..line_end].trim();
    if !tag.is_empty() && !tag.eq_ignore_ascii_case("json") {
        return None;
    }

    let body = &after_fence[line_end + 1..];
    let closing = body.find(FENCE)?;
    let block = body[..closing].trim();
    let rest = &body[closing + FENCE.len()..];

    (!block.is_empty()).then_some((block, rest))
}

/// Parses raw output into an untyped JSON value, without salvaging partial documents.
pub fn parse_value(raw: &RawModelOutput) -> Result<serde_json::Value, CoreError> {
    let document = extract_json_document(raw.as_str())?;
    serde_json::from_str(document).map_err(|e| {
        warn!("Model output is not valid JSON: {}", e);
        CoreError::MalformedResponse(format!("invalid JSON: {}", e))
    })
}

/// Decodes a JSON value into a strictly typed document.
pub fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, CoreError> {
    serde_json::from_value(value).map_err(|e| {
        warn!("Model output does not match the expected schema: {}", e);
        CoreError::MalformedResponse(format!("schema mismatch: {}", e))
    })
}

pub fn parse_document<T: DeserializeOwned>(raw: &RawModelOutput) -> Result<T, CoreError> {
    decode(parse_value(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_document_is_accepted() {
        assert_eq!(
            extract_json_document("  {\"a\": 1}\n").unwrap(),
            "{\"a\": 1}"
        );
        assert_eq!(extract_json_document("[1, 2]").unwrap(), "[1, 2]");
    }

    #[test]
    fn test_fenced_block_with_surrounding_prose() {
        let raw = "Here is the analysis:\n```json\n{\"a\": 1}\n```\nLet me know!";
        assert_eq!(extract_json_document(raw).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_untagged_fence() {
        let raw = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json_document(raw).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_unclosed_fence_fails_closed() {
        let raw = "```json\n{\"a\": 1}";
        assert!(matches!(
            extract_json_document(raw),
            Err(CoreError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_foreign_fence_tag_fails_closed() {
        let raw = "```python\nprint('hi')\n```";
        assert!(extract_json_document(raw).is_err());
    }

    #[test]
    fn test_second_fenced_block_fails_closed() {
        let raw = "Draft:\n```json\n{\"a\": 1}\n```\nCorrection:\n```json\n{\"a\": 2}\n```";
        assert!(matches!(
            extract_json_document(raw),
            Err(CoreError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_prose_without_fence_fails_closed() {
        assert!(extract_json_document("The recipe looks safe for everyone.").is_err());
        assert!(extract_json_document("   ").is_err());
    }

    #[test]
    fn test_truncated_document_is_malformed() {
        let raw = RawModelOutput::new("{\"dish_name\": \"Rice\", \"member_verdicts\": [");
        assert!(matches!(
            parse_value(&raw),
            Err(CoreError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_same_input_same_outcome() {
        let raw = RawModelOutput::new("```json\n{\"a\": 1}\n```");
        assert_eq!(parse_value(&raw), parse_value(&raw));
    }
}

//! Structured-response extraction from free-text model output.
//!
//! Generative models wrap JSON payloads in prose, markdown fences, or both.
//! These helpers locate the first top-level bracket- or brace-delimited span
//! and deserialize it, so callers never pattern-match model text themselves.
//! Every failure surfaces as [`CoreError::UpstreamParse`].

use serde::de::DeserializeOwned;

use crate::error::CoreError;

/// Extract and deserialize the first top-level JSON array in `text`.
///
/// Surrounding prose is tolerated. Fails if no array span exists, if the
/// span is not valid JSON, or if the array is empty.
pub fn extract_json_array<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, CoreError> {
    let span = first_span(text, '[', ']')
        .ok_or_else(|| CoreError::UpstreamParse("no JSON array in model response".into()))?;

    let items: Vec<T> = serde_json::from_str(span)
        .map_err(|e| CoreError::UpstreamParse(format!("malformed JSON array: {e}")))?;

    if items.is_empty() {
        return Err(CoreError::UpstreamParse(
            "model response contained an empty array".into(),
        ));
    }

    Ok(items)
}

/// Extract and deserialize the first top-level JSON object in `text`.
pub fn extract_json_object<T: DeserializeOwned>(text: &str) -> Result<T, CoreError> {
    let span = first_span(text, '{', '}')
        .ok_or_else(|| CoreError::UpstreamParse("no JSON object in model response".into()))?;

    serde_json::from_str(span)
        .map_err(|e| CoreError::UpstreamParse(format!("malformed JSON object: {e}")))
}

/// Find the first balanced `open..close` span in `text`.
///
/// Depth-counts rather than matching greedily so trailing prose containing a
/// stray close delimiter cannot extend the span. String literals and escapes
/// are honored, since model JSON routinely contains brackets inside values.
fn first_span(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        if ch == '"' {
            in_string = true;
        } else if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                return Some(&text[start..start + offset + ch.len_utf8()]);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::Value;

    #[test]
    fn extracts_array_surrounded_by_prose() {
        let text = r#"Sure! Here are your concepts:

```json
[{"emotion": "shock"}, {"emotion": "hope"}]
```

Let me know if you need more."#;

        let items: Vec<Value> = extract_json_array(text).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["emotion"], "shock");
    }

    #[test]
    fn array_span_stops_at_balanced_close() {
        // The trailing "]" in prose must not extend the span.
        let text = r#"[{"n": 1}] and that's all [I promise"#;
        let items: Vec<Value> = extract_json_array(text).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn brackets_inside_string_values_are_ignored() {
        let text = r#"result: [{"note": "use [bold] text"}]"#;
        let items: Vec<Value> = extract_json_array(text).unwrap();
        assert_eq!(items[0]["note"], "use [bold] text");
    }

    #[test]
    fn missing_array_is_a_parse_error() {
        let err = extract_json_array::<Value>("no structured data here").unwrap_err();
        assert_matches!(err, CoreError::UpstreamParse(_));
    }

    #[test]
    fn empty_array_is_a_parse_error() {
        let err = extract_json_array::<Value>("here: []").unwrap_err();
        assert_matches!(err, CoreError::UpstreamParse(msg) if msg.contains("empty"));
    }

    #[test]
    fn malformed_span_is_a_parse_error() {
        let err = extract_json_array::<Value>("[{broken]").unwrap_err();
        assert_matches!(err, CoreError::UpstreamParse(msg) if msg.contains("malformed"));
    }

    #[test]
    fn extracts_object_with_nested_braces() {
        let text = r#"Analysis complete. {"quality_score": 0.85, "notes": "good {framing}"}"#;
        let obj: Value = extract_json_object(text).unwrap();
        assert_eq!(obj["quality_score"], 0.85);
    }

    #[test]
    fn escaped_quotes_do_not_break_string_tracking() {
        let text = r#"[{"note": "she said \"wow\" loudly"}]"#;
        let items: Vec<Value> = extract_json_array(text).unwrap();
        assert_eq!(items[0]["note"], r#"she said "wow" loudly"#);
    }
}

//! Content extraction for the several response shapes used by
//! OpenAI-compatible servers. Each shape is tried in order; the first
//! non-empty string wins, so adding another compatibility shape never
//! disturbs the existing ones.

use serde_json::Value;

/// Pull the incremental token out of one parsed streaming payload.
///
/// Shape ladder: `delta.content` (string), `delta.text`, `choices[0].text`,
/// then the first element of a `delta.content` array (a bare string or an
/// object carrying `text`). Returns `None` for role-announcement events,
/// which carry a `role` but no `content`.
pub fn extract_delta_text(payload: &Value) -> Option<String> {
    let choice = payload.get("choices")?.get(0)?;
    let delta = choice.get("delta");

    if let Some(d) = delta {
        if d.get("role").is_some() && d.get("content").is_none() {
            return None;
        }
    }

    let delta_content = delta.and_then(|d| d.get("content"));
    string_field(delta_content)
        .or_else(|| string_field(delta.and_then(|d| d.get("text"))))
        .or_else(|| string_field(choice.get("text")))
        .or_else(|| delta_content.and_then(|c| c.get(0)).and_then(element_text))
}

/// Pull the assistant text out of a full (non-streaming) completion body.
///
/// Shape ladder: `message.content` (string), `text`, the first element of
/// a `content` array, then the first element of a `message.content` array.
pub fn extract_message_text(body: &Value) -> Option<String> {
    let choice = body.get("choices")?.get(0)?;
    let message = choice.get("message");

    let message_content = message.and_then(|m| m.get("content"));
    string_field(message_content)
        .or_else(|| string_field(choice.get("text")))
        .or_else(|| choice.get("content").and_then(|c| c.get(0)).and_then(element_text))
        .or_else(|| message_content.and_then(|c| c.get(0)).and_then(element_text))
}

/// Render a response body for error reports, truncating every string field
/// to `max` characters so a huge echoed payload stays readable.
pub fn truncated_snapshot(value: &Value, max: usize) -> String {
    clip(value, max).to_string()
}

fn clip(value: &Value, max: usize) -> Value {
    match value {
        Value::String(s) if s.chars().count() > max => {
            let cut: String = s.chars().take(max).collect();
            Value::String(format!("{cut}…"))
        }
        Value::Array(items) => Value::Array(items.iter().map(|v| clip(v, max)).collect()),
        Value::Object(map) => {
            Value::Object(map.iter().map(|(k, v)| (k.clone(), clip(v, max))).collect())
        }
        other => other.clone(),
    }
}

fn string_field(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A content-array element is either a bare string or `{ "text": ... }`.
fn element_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(_) => string_field(value.get("text")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_content_wins_over_text() {
        let body = json!({"choices":[{"message":{"content":"primary"},"text":"secondary"}]});
        assert_eq!(extract_message_text(&body).as_deref(), Some("primary"));
    }

    #[test]
    fn falls_back_to_choice_text() {
        let body = json!({"choices":[{"text":"from text"}]});
        assert_eq!(extract_message_text(&body).as_deref(), Some("from text"));
    }

    #[test]
    fn empty_string_does_not_win() {
        let body = json!({"choices":[{"message":{"content":""},"text":"fallback"}]});
        assert_eq!(extract_message_text(&body).as_deref(), Some("fallback"));
    }

    #[test]
    fn content_array_of_strings() {
        let body = json!({"choices":[{"content":["piece"]}]});
        assert_eq!(extract_message_text(&body).as_deref(), Some("piece"));
    }

    #[test]
    fn message_content_array_of_objects() {
        let body = json!({"choices":[{"message":{"content":[{"type":"text","text":"block"}]}}]});
        assert_eq!(extract_message_text(&body).as_deref(), Some("block"));
    }

    #[test]
    fn no_choices_yields_none() {
        assert_eq!(extract_message_text(&json!({"choices":[]})), None);
        assert_eq!(extract_message_text(&json!({})), None);
    }

    #[test]
    fn delta_content_string() {
        let payload = json!({"choices":[{"delta":{"content":"tok"}}]});
        assert_eq!(extract_delta_text(&payload).as_deref(), Some("tok"));
    }

    #[test]
    fn delta_content_array_unwraps_text_object() {
        let payload = json!({"choices":[{"delta":{"content":[{"text":"tok"}]}}]});
        assert_eq!(extract_delta_text(&payload).as_deref(), Some("tok"));
    }

    #[test]
    fn role_with_content_still_extracts() {
        let payload = json!({"choices":[{"delta":{"role":"assistant","content":"hi"}}]});
        assert_eq!(extract_delta_text(&payload).as_deref(), Some("hi"));
    }

    #[test]
    fn role_without_content_is_none() {
        let payload = json!({"choices":[{"delta":{"role":"assistant"}}]});
        assert_eq!(extract_delta_text(&payload), None);
    }

    #[test]
    fn snapshot_truncates_long_strings() {
        let long = "x".repeat(600);
        let body = json!({"detail": long, "n": 7});
        let snapshot = truncated_snapshot(&body, 500);
        assert!(snapshot.contains(&"x".repeat(500)));
        assert!(!snapshot.contains(&"x".repeat(501)));
        assert!(snapshot.contains("…"));
        assert!(snapshot.contains("\"n\":7"));
    }

    #[test]
    fn snapshot_recurses_into_arrays() {
        let body = json!({"items": ["y".repeat(600)]});
        let snapshot = truncated_snapshot(&body, 500);
        assert!(!snapshot.contains(&"y".repeat(501)));
    }
}

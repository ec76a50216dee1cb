use std::borrow::Cow;

use serde_json::Value;
use tracing::debug;

use crate::extract::extract_delta_text;

/// One decoded outcome from an event chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeEvent {
    /// Incremental assistant text, in extraction order.
    Delta(String),
    /// Hard end-of-stream sentinel (`[DONE]`). Nothing after it counts.
    Done,
}

/// Decode one framed event chunk into zero or more events.
///
/// A chunk may carry several `data:` lines (blank-line framing) or be a
/// single line (line framing). Anything that does not look like a
/// completion payload is skipped — a malformed fragment must never abort
/// the stream. A `[DONE]` sentinel stops the whole chunk: the remainder
/// is not examined.
pub fn decode_chunk(chunk: &str) -> Vec<DecodeEvent> {
    let text: Cow<'_, str> = if chunk.contains("\r\n") {
        Cow::Owned(chunk.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(chunk)
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut events = Vec::new();
    let mut payloads: Vec<&str> = Vec::new();

    for raw in text.split('\n') {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line == "[DONE]" || line == "data: [DONE]" {
            events.push(DecodeEvent::Done);
            return events;
        }
        if let Some(rest) = line.strip_prefix("data:") {
            payloads.push(rest.trim());
        }
    }

    // Some servers push bare JSON lines without the SSE field prefix.
    if payloads.is_empty() && trimmed.starts_with('{') {
        payloads.push(trimmed);
    }

    for payload in payloads {
        if !(payload.starts_with('{') && payload.ends_with('}')) {
            continue;
        }
        let json: Value = match serde_json::from_str(payload) {
            Ok(v) => v,
            Err(err) => {
                debug!(%err, "skipping unparseable stream payload");
                continue;
            }
        };
        if let Some(token) = extract_delta_text(&json) {
            events.push(DecodeEvent::Delta(token));
        }
    }

    events
}

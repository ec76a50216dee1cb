//! Separation of inline `<think>…</think>` reasoning markup from visible
//! text in streamed tokens. Models that expose their reasoning emit it
//! inline, and a tag pair routinely spans several deltas, so the scanner
//! carries its state across calls instead of looking ahead.

const THINK_OPEN: &str = "<think>";
const THINK_CLOSE: &str = "</think>";

/// Scanner state threaded through every call for one logical stream.
///
/// `in_think` records whether an opened think span has not closed yet;
/// `think_buffer` accumulates every think-tagged character seen over the
/// whole stream. Create one per stream and discard it when the stream ends.
#[derive(Debug, Clone, Default)]
pub struct ThinkState {
    pub in_think: bool,
    pub think_buffer: String,
}

impl ThinkState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The two halves of one scanned token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThinkSplit {
    /// Text to show the user.
    pub visible: String,
    /// Think-tagged text found in this call only.
    pub think_delta: String,
}

/// Route one token through the think scanner.
///
/// Every input character lands in exactly one of `visible` or the think
/// side (both `think_delta` and the cumulative `state.think_buffer`); the
/// tags themselves are consumed. Tags match literally and case-sensitively.
/// An opening tag seen while already inside a span is ordinary think text.
pub fn separate_think_tokens(chunk: &str, state: &mut ThinkState) -> ThinkSplit {
    let mut out = ThinkSplit::default();
    let mut rest = chunk;

    while !rest.is_empty() {
        if !state.in_think {
            match rest.find(THINK_OPEN) {
                None => {
                    out.visible.push_str(rest);
                    break;
                }
                Some(start) => {
                    out.visible.push_str(&rest[..start]);
                    rest = &rest[start + THINK_OPEN.len()..];
                    state.in_think = true;
                }
            }
        } else {
            match rest.find(THINK_CLOSE) {
                None => {
                    out.think_delta.push_str(rest);
                    state.think_buffer.push_str(rest);
                    break;
                }
                Some(end) => {
                    out.think_delta.push_str(&rest[..end]);
                    state.think_buffer.push_str(&rest[..end]);
                    rest = &rest[end + THINK_CLOSE.len()..];
                    state.in_think = false;
                }
            }
        }
    }

    out
}

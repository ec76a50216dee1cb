//! Wire-format logic for OpenAI-compatible chat completion streams.
//!
//! Everything in this crate is pure — no sockets, no timers. The client
//! crate feeds transport text in and routes the decoded events out, so
//! all of the framing, decoding, and think-token scanning here can be
//! tested byte-for-byte without a server.

pub mod decode;
pub mod extract;
pub mod sse;
pub mod thinking;
pub mod types;

pub use decode::{decode_chunk, DecodeEvent};
pub use sse::SseFramer;
pub use thinking::{separate_think_tokens, ThinkSplit, ThinkState};
pub use types::{Message, Role};

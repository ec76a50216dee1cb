//! HTTP client for OpenAI-compatible chat completion APIs.
//!
//! Two modes: [`ChatClient::complete`] for single-shot requests, and
//! [`ChatClient::stream`] / [`ChatClient::stream_with_handlers`] for
//! Server-Sent-Events streaming. The wire-format logic (SSE framing,
//! payload decoding, think-token scanning) lives in `chatwire-protocol`
//! and is re-exported here for convenience.

pub mod client;
pub mod config;
pub mod error;
pub mod stream;

pub use client::ChatClient;
pub use config::ChatConfig;
pub use error::{ChatError, Result};
pub use stream::{StreamEvent, StreamHandlers};

pub use chatwire_protocol::{separate_think_tokens, Message, Role, ThinkSplit, ThinkState};

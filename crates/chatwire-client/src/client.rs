use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use chatwire_protocol::extract::{extract_message_text, truncated_snapshot};
use chatwire_protocol::{decode_chunk, DecodeEvent, Message, SseFramer};

use crate::config::ChatConfig;
use crate::error::{ChatError, Result};
use crate::stream::{StreamEvent, StreamHandlers};

/// Max characters kept per string field in error-report snapshots.
const SNAPSHOT_STRING_LIMIT: usize = 500;
/// Give other tasks a turn after this many processed event chunks.
const YIELD_INTERVAL: usize = 40;
/// Capacity of the delivery channel between the parse loop and a
/// handler-driven consumer.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Client for one OpenAI-compatible chat completion endpoint.
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    config: ChatConfig,
}

impl ChatClient {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Send a non-streaming chat request and wait for the full response
    /// text.
    pub async fn complete(&self, messages: &[Message]) -> Result<String> {
        self.config.validate()?;
        let body = build_request_body(&self.config, messages, false);
        let url = self.config.endpoint();

        debug!(model = %self.config.model, %url, "sending chat completion request");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %text, "chat completion API error");
            return Err(api_error(status, text));
        }

        let payload: Value = resp.json().await?;
        match extract_message_text(&payload) {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(ChatError::EmptyResponse {
                model: self.config.model.clone(),
                base_url: self.config.base_url().to_string(),
                snapshot: truncated_snapshot(&payload, SNAPSHOT_STRING_LIMIT),
            }),
        }
    }

    /// Stream a chat completion, sending events through `tx`.
    ///
    /// Events arrive FIFO; tokens keep their extraction order. Exactly one
    /// terminal event (`Done` or `Error`) closes the sequence, and the
    /// response body is released on every exit path. A read failure is
    /// sent as `Error` and also returned.
    pub async fn stream(&self, messages: &[Message], tx: mpsc::Sender<StreamEvent>) -> Result<()> {
        self.config.validate()?;
        let body = build_request_body(&self.config, messages, true);
        let url = self.config.endpoint();

        debug!(model = %self.config.model, %url, "sending streaming chat completion request");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header("content-type", "application/json")
            .header("accept", "text/event-stream")
            .header("cache-control", "no-cache")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %text, "streaming API error");
            return Err(api_error(status, text));
        }

        process_stream(resp, tx).await
    }

    /// Stream a chat completion, delivering events to caller-supplied
    /// callbacks. The parse loop and the callbacks run concurrently on the
    /// same task, decoupled by the delivery channel.
    pub async fn stream_with_handlers(
        &self,
        messages: &[Message],
        handlers: &mut StreamHandlers,
    ) -> Result<()> {
        let (tx, mut rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let worker = self.stream(messages, tx);
        let consumer = async {
            while let Some(event) = rx.recv().await {
                handlers.dispatch(event);
            }
        };

        let (result, ()) = tokio::join!(worker, consumer);
        result
    }
}

/// Read the SSE body, frame it, decode it, and forward events through the
/// channel. Returns once a terminal event has been sent (or the receiver
/// is gone); dropping the response releases the connection.
async fn process_stream(resp: reqwest::Response, tx: mpsc::Sender<StreamEvent>) -> Result<()> {
    use futures_util::StreamExt;

    let mut framer = SseFramer::new();
    let mut processed: usize = 0;
    let mut byte_stream = resp.bytes_stream();

    while let Some(chunk) = byte_stream.next().await {
        let bytes = match chunk {
            Ok(b) => b,
            Err(err) => {
                let _ = tx
                    .send(StreamEvent::Error {
                        message: err.to_string(),
                    })
                    .await;
                return Err(ChatError::Transport(err));
            }
        };

        let text = match std::str::from_utf8(&bytes) {
            Ok(t) => t,
            Err(_) => continue,
        };

        for event_chunk in framer.feed(text) {
            for event in decode_chunk(&event_chunk) {
                match event {
                    DecodeEvent::Delta(token) => {
                        debug!(len = token.len(), "stream text delta");
                        let sent = tx.send(StreamEvent::Delta { text: token }).await;
                        if sent.is_err() {
                            return Ok(()); // receiver dropped
                        }
                    }
                    DecodeEvent::Done => {
                        // hard termination sentinel: nothing after it counts
                        let _ = tx.send(StreamEvent::Done).await;
                        return Ok(());
                    }
                }
            }

            processed += 1;
            if processed % YIELD_INTERVAL == 0 {
                tokio::task::yield_now().await;
            }
        }
    }

    let _ = tx.send(StreamEvent::Done).await;
    Ok(())
}

fn api_error(status: reqwest::StatusCode, body: String) -> ChatError {
    ChatError::Api {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or("").to_string(),
        body,
    }
}

fn build_request_body(config: &ChatConfig, messages: &[Message], stream: bool) -> Value {
    let mut body = serde_json::json!({
        "model": config.model,
        "temperature": config.temperature,
        "messages": messages,
    });
    if stream {
        body["stream"] = Value::Bool(true);
    }
    body
}

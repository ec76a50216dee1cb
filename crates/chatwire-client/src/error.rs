use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    /// Missing credentials or endpoint. Raised before any network call.
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection or read failure reported by the transport.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status from the API.
    #[error("API error ({status} {status_text}): {body}")]
    Api {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The response parsed but carried no extractable text. The snapshot
    /// keeps enough of the raw body to diagnose an incompatible backend
    /// without re-running the request.
    #[error("empty completion from model {model} at {base_url}; raw response: {snapshot}")]
    EmptyResponse {
        model: String,
        base_url: String,
        snapshot: String,
    },
}

pub type Result<T> = std::result::Result<T, ChatError>;

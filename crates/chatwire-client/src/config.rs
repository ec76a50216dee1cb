use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{ChatError, Result};

/// Path appended to the configured base URL for chat completions.
pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";
/// Sampling temperature used when the config does not set one.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Connection settings for one OpenAI-compatible endpoint
/// (chatwire.toml + CHATWIRE_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    pub api_key: String,
    /// Endpoint root, e.g. "https://api.groq.com/openai".
    /// Trailing slashes are ignored.
    pub api_base_url: String,
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

impl ChatConfig {
    pub fn new(
        api_key: impl Into<String>,
        api_base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_base_url: api_base_url.into(),
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Load config from a TOML file with CHATWIRE_* env var overrides.
    /// Falls back to `chatwire.toml` in the working directory when no
    /// explicit path is given; a missing file is fine as long as the
    /// env vars cover the required fields.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = config_path.unwrap_or("chatwire.toml");

        let config: ChatConfig = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("CHATWIRE_"))
            .extract()
            .map_err(|e| ChatError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Both the key and the endpoint must be present before any request.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() || self.api_base_url.is_empty() {
            return Err(ChatError::Config(
                "api_key and api_base_url must both be set".to_string(),
            ));
        }
        Ok(())
    }

    /// Endpoint root with trailing slashes stripped.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    /// Full chat completions URL.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url(), COMPLETIONS_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_strips_trailing_slash() {
        let config = ChatConfig::new("key", "https://api.example.com/", "m");
        assert_eq!(config.endpoint(), "https://api.example.com/v1/chat/completions");
    }

    #[test]
    fn endpoint_without_trailing_slash() {
        let config = ChatConfig::new("key", "https://api.example.com", "m");
        assert_eq!(config.endpoint(), "https://api.example.com/v1/chat/completions");
    }

    #[test]
    fn validate_rejects_missing_key() {
        let config = ChatConfig::new("", "https://api.example.com", "m");
        assert!(matches!(config.validate(), Err(ChatError::Config(_))));
    }

    #[test]
    fn validate_rejects_missing_base_url() {
        let config = ChatConfig::new("key", "", "m");
        assert!(matches!(config.validate(), Err(ChatError::Config(_))));
    }

    #[test]
    fn validate_accepts_complete_config() {
        let config = ChatConfig::new("key", "https://api.example.com", "m");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn temperature_defaults_when_absent() {
        let config: ChatConfig = serde_json::from_str(
            r#"{"api_key":"k","api_base_url":"http://x","model":"m"}"#,
        )
        .unwrap();
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
    }
}

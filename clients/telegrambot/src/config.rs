//! Configuration types for the Telegram Bot API client.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Configuration for TelegramBot
#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramBotConfig {
    /// Bot token issued by @BotFather
    pub api_key: String,
    /// Base URL of the Bot API server, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid Telegram API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported Telegram API URL scheme: {0}")]
    UnsupportedScheme(String),
}

fn default_base_url() -> String {
    TELEGRAM_API_BASE.to_string()
}

impl TelegramBotConfig {
    /// Creates a config pointing at the public Bot API server.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
        }
    }

    /// Points the client at another Bot API server (self-hosted, or a local test responder).
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
        }
        self.base_url = url.as_str().trim_end_matches('/').to_string();
        Ok(self)
    }
}

// The token is a credential; keep it out of debug output.
impl fmt::Debug for TelegramBotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramBotConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

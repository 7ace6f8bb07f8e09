use std::fmt;
use std::path::PathBuf;

use clients_telegrambot::{ConfigError, TelegramError};
use thiserror::Error;

/// What a send operation carries; names the operation in wrapped errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    Message,
    Document,
    Photo,
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Payload::Message => "message",
            Payload::Document => "document",
            Payload::Photo => "photo",
        })
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    /// Any failure reported by the Bot API or the transport to it
    #[error("{message}")]
    RemoteApi { message: String },

    #[error("Bot token is required")]
    MissingToken,

    /// Rejected locally; no request is made for an empty destination
    #[error("Chat ID is required")]
    MissingChatId,

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The file exists but could not be read
    #[error("{0}")]
    Io(#[source] std::io::Error),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error(transparent)]
    InvalidApiUrl(#[from] ConfigError),
}

impl NotifyError {
    /// The single place remote errors are rewrapped, whatever their subtype.
    pub fn remote(payload: Payload, err: TelegramError) -> Self {
        Self::RemoteApi {
            message: format!("Failed to send {payload}: {err}"),
        }
    }
}

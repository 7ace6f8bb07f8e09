use std::error::Error as _;

use thiserror::Error;

/// Errors surfaced by the Bot API, or by the transport on the way to it.
///
/// Every variant displays the underlying text as-is, so callers can embed it
/// in their own messages without losing detail.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Request could not be sent or the response could not be read
    #[error("{}", describe(.0))]
    Http(#[source] reqwest::Error),

    /// 401: the token was rejected
    #[error("{description}")]
    Unauthorized { description: String },

    /// 403: the bot may not write to this chat
    #[error("{description}")]
    Forbidden { description: String },

    /// 400: malformed chat id, empty payload, unsupported file, ...
    #[error("{description}")]
    BadRequest { description: String },

    /// Any other error reported by the Bot API
    #[error("{description}")]
    Api { error_code: u16, description: String },

    /// Successful status but a body that is not a Bot API envelope
    #[error("{0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl TelegramError {
    /// Classifies an error envelope by its `error_code`.
    pub fn from_response(error_code: u16, description: String) -> Self {
        match error_code {
            400 => Self::BadRequest { description },
            401 => Self::Unauthorized { description },
            403 => Self::Forbidden { description },
            _ => Self::Api {
                error_code,
                description,
            },
        }
    }
}

// Request URLs embed the bot token, so they are stripped before the error
// is stored.
impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

/// reqwest keeps the interesting part (refused, timed out, ...) in the source chain.
fn describe(err: &reqwest::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

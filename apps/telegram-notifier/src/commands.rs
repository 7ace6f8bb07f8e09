//! Credential resolution, dispatch, and outcome reporting for one invocation.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use notifier::{Notify, NotifyError};
use thiserror::Error;

use crate::env;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// What to send, as parsed from the command line.
#[derive(Debug)]
pub enum Request {
    Text {
        message: String,
    },
    Document {
        path: PathBuf,
        caption: Option<String>,
    },
    Photo {
        path: PathBuf,
        caption: Option<String>,
    },
}

impl Request {
    fn dispatch<N: Notify>(&self, notifier: &N, chat_id: &str) -> Result<bool, NotifyError> {
        match self {
            Request::Text { message } => notifier.send_text(chat_id, message),
            Request::Document { path, caption } => {
                notifier.send_document(chat_id, path, caption.as_deref())
            }
            Request::Photo { path, caption } => {
                notifier.send_photo(chat_id, path, caption.as_deref())
            }
        }
    }

    fn success_line(&self) -> String {
        match self {
            Request::Text { .. } => "Message sent successfully!".to_string(),
            Request::Document { path, .. } => {
                format!("File '{}' sent successfully!", path.display())
            }
            Request::Photo { path, .. } => {
                format!("Photo '{}' sent successfully!", path.display())
            }
        }
    }

    fn failure_line(&self) -> &'static str {
        match self {
            Request::Text { .. } => "Failed to send message",
            Request::Document { .. } => "Failed to send file",
            Request::Photo { .. } => "Failed to send photo",
        }
    }
}

/// Credentials as given on the command line; either may be absent.
#[derive(Debug, Default)]
pub struct Credentials {
    pub token: Option<String>,
    pub chat_id: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Resolved {
    pub token: String,
    pub chat_id: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MissingInput {
    #[error("Bot token is required. Use --token or set TELEGRAM_BOT_TOKEN")]
    Token,
    #[error("Chat ID is required. Use --chat-id or set TELEGRAM_CHAT_ID")]
    ChatId,
}

impl Credentials {
    /// Flag first, then environment; empty strings count as absent at both steps.
    /// The token is checked before the chat id.
    pub fn resolve(
        self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Resolved, MissingInput> {
        let token =
            flag_or_env(self.token, env::BOT_TOKEN, &lookup).ok_or(MissingInput::Token)?;
        let chat_id =
            flag_or_env(self.chat_id, env::CHAT_ID, &lookup).ok_or(MissingInput::ChatId)?;
        Ok(Resolved { token, chat_id })
    }
}

fn flag_or_env(
    flag: Option<String>,
    var: &str,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Option<String> {
    flag.filter(|s| !s.is_empty())
        .or_else(|| lookup(var))
        .filter(|s| !s.is_empty())
}

/// Runs one command end to end and returns the process exit code.
///
/// `connect` is only called once credentials resolved; it builds the client
/// the single send goes through. `Err` means an output stream failed.
pub fn execute<N, C>(
    request: &Request,
    credentials: Credentials,
    lookup: impl Fn(&str) -> Option<String>,
    connect: C,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<i32>
where
    N: Notify,
    C: FnOnce(&str) -> Result<N, NotifyError>,
{
    let resolved = match credentials.resolve(lookup) {
        Ok(resolved) => resolved,
        Err(missing) => {
            writeln!(err, "Error: {missing}")?;
            return Ok(EXIT_FAILURE);
        }
    };
    tracing::debug!(chat_id = %resolved.chat_id, ?request, "dispatching");

    let outcome = connect(&resolved.token)
        .and_then(|notifier| request.dispatch(&notifier, &resolved.chat_id));

    match outcome {
        Ok(true) => {
            writeln!(out, "{}", request.success_line())?;
            Ok(EXIT_SUCCESS)
        }
        Ok(false) => {
            writeln!(err, "{}", request.failure_line())?;
            Ok(EXIT_FAILURE)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "send failed");
            writeln!(err, "{}", describe_failure(&e))?;
            Ok(EXIT_FAILURE)
        }
    }
}

pub fn describe_failure(err: &NotifyError) -> String {
    match err {
        NotifyError::RemoteApi { message } => format!("Telegram API error: {message}"),
        NotifyError::FileNotFound { .. } => format!("File error: {err}"),
        _ => format!("Unexpected error: {err}"),
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;

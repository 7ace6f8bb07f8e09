//! One-shot Telegram notifications.
//!
//! A [`Notifier`] wraps a bot token and performs exactly one outbound call
//! per send. Sends are ordinary blocking calls; the async Bot API client is
//! driven on a private current-thread runtime.

mod api;
mod client;
mod error;

use std::path::Path;

pub use api::BotApi;
pub use client::{Notifier, Notify};
pub use clients_telegrambot::{TelegramBotConfig, TelegramError};
pub use error::{NotifyError, Payload};

/// Sends one text message with a fresh client.
pub fn send_notification(
    token: &str,
    chat_id: &str,
    message: &str,
) -> Result<bool, NotifyError> {
    Notifier::new(token)?.send_text(chat_id, message)
}

/// Uploads one local file as a document with a fresh client.
pub fn send_file(
    token: &str,
    chat_id: &str,
    path: &Path,
    caption: Option<&str>,
) -> Result<bool, NotifyError> {
    Notifier::new(token)?.send_document(chat_id, path, caption)
}

/// Uploads one local image as a photo with a fresh client.
pub fn send_photo(
    token: &str,
    chat_id: &str,
    path: &Path,
    caption: Option<&str>,
) -> Result<bool, NotifyError> {
    Notifier::new(token)?.send_photo(chat_id, path, caption)
}

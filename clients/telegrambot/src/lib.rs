//! Client for the Telegram Bot HTTP API.
//!
//! Covers the three outbound calls a notifier needs: `sendMessage`,
//! `sendDocument` and `sendPhoto`.

mod bot;
mod config;
mod error;
mod types;

pub use bot::TelegramBot;
pub use config::{ConfigError, TelegramBotConfig, TELEGRAM_API_BASE};
pub use error::TelegramError;
pub use types::{InputFile, Message};

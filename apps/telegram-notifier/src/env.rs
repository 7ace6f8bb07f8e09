//! Environment variables the CLI reads.

pub const BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const CHAT_ID: &str = "TELEGRAM_CHAT_ID";
/// Overrides the Bot API server, e.g. a self-hosted `telegram-bot-api`.
pub const API_URL: &str = "TELEGRAM_API_URL";

/// Reads `name`, treating unset, empty and non-UTF-8 values alike.
pub fn lookup(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

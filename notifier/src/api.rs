use async_trait::async_trait;
use clients_telegrambot::{InputFile, TelegramBot, TelegramError};

/// The remote calls a [`crate::Notifier`] makes.
#[async_trait]
pub trait BotApi: Send + Sync {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), TelegramError>;

    async fn send_document(
        &self,
        chat_id: &str,
        document: InputFile,
        caption: Option<&str>,
    ) -> Result<(), TelegramError>;

    async fn send_photo(
        &self,
        chat_id: &str,
        photo: InputFile,
        caption: Option<&str>,
    ) -> Result<(), TelegramError>;
}

#[async_trait]
impl BotApi for TelegramBot {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), TelegramError> {
        TelegramBot::send_message(self, chat_id, text)
            .await
            .map(|_| ())
    }

    async fn send_document(
        &self,
        chat_id: &str,
        document: InputFile,
        caption: Option<&str>,
    ) -> Result<(), TelegramError> {
        TelegramBot::send_document(self, chat_id, document, caption)
            .await
            .map(|_| ())
    }

    async fn send_photo(
        &self,
        chat_id: &str,
        photo: InputFile,
        caption: Option<&str>,
    ) -> Result<(), TelegramError> {
        TelegramBot::send_photo(self, chat_id, photo, caption)
            .await
            .map(|_| ())
    }
}

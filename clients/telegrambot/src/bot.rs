use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::TelegramBotConfig;
use crate::error::TelegramError;
use crate::types::{ApiResponse, InputFile, Message, SendMessageRequest};

/// Client for sending messages and files via Telegram Bot API.
pub struct TelegramBot {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TelegramBot {
    /// Creates a new `TelegramBot` talking to the public Bot API server.
    pub fn new(api_key: String) -> Self {
        Self::from_config(TelegramBotConfig::new(api_key))
    }

    /// Creates a new `TelegramBot` with a default HTTP client.
    pub fn from_config(config: TelegramBotConfig) -> Self {
        Self::with_config(Client::new(), config)
    }

    /// Creates a new `TelegramBot` from an existing HTTP client and config.
    pub fn with_config(client: Client, config: TelegramBotConfig) -> Self {
        Self {
            client,
            api_key: config.api_key,
            base_url: config.base_url,
        }
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.api_key, method)
    }

    /// Sends a text message to `chat_id`. The text goes out untouched.
    pub async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
    ) -> Result<Message, TelegramError> {
        tracing::debug!(chat_id, chars = text.chars().count(), "sendMessage");
        let request = self
            .client
            .post(self.endpoint("sendMessage"))
            .json(&SendMessageRequest { chat_id, text });
        self.execute(request).await
    }

    /// Uploads `document` to `chat_id` as a general file.
    pub async fn send_document(
        &self,
        chat_id: &str,
        document: InputFile,
        caption: Option<&str>,
    ) -> Result<Message, TelegramError> {
        self.upload("sendDocument", "document", chat_id, document, caption)
            .await
    }

    /// Uploads `photo` to `chat_id`; Telegram recompresses it as an image.
    pub async fn send_photo(
        &self,
        chat_id: &str,
        photo: InputFile,
        caption: Option<&str>,
    ) -> Result<Message, TelegramError> {
        self.upload("sendPhoto", "photo", chat_id, photo, caption)
            .await
    }

    async fn upload(
        &self,
        method: &str,
        field: &'static str,
        chat_id: &str,
        file: InputFile,
        caption: Option<&str>,
    ) -> Result<Message, TelegramError> {
        tracing::debug!(
            method,
            chat_id,
            file_name = %file.file_name,
            bytes = file.bytes.len(),
            "uploading file"
        );
        let mut form = Form::new().text("chat_id", chat_id.to_string());
        if let Some(caption) = caption {
            form = form.text("caption", caption.to_string());
        }
        let form = form.part(field, file.into_part());
        let request = self.client.post(self.endpoint(method)).multipart(form);
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, TelegramError> {
        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        match serde_json::from_str::<ApiResponse<T>>(&body) {
            Ok(ApiResponse {
                ok: true,
                result: Some(result),
                ..
            }) => Ok(result),
            Ok(envelope) => {
                let error_code = envelope.error_code.unwrap_or(status.as_u16());
                let description = envelope.description.unwrap_or_else(|| status.to_string());
                tracing::debug!(error_code, %description, "Bot API rejected request");
                Err(TelegramError::from_response(error_code, description))
            }
            Err(_) if !status.is_success() => Err(TelegramError::from_response(
                status.as_u16(),
                status.to_string(),
            )),
            Err(err) => Err(err.into()),
        }
    }
}

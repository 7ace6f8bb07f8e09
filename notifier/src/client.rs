use std::io::ErrorKind;
use std::path::Path;

use clients_telegrambot::{InputFile, TelegramBot, TelegramBotConfig};
use tokio::runtime::{Builder, Runtime};

use crate::api::BotApi;
use crate::error::{NotifyError, Payload};

/// Blocking send operations against one chat per call.
///
/// Each call is all-or-nothing: `Ok(true)` once the Bot API acknowledged the
/// request, otherwise a [`NotifyError`]. Nothing is retried.
pub trait Notify {
    fn send_text(&self, chat_id: &str, text: &str) -> Result<bool, NotifyError>;

    fn send_document(
        &self,
        chat_id: &str,
        path: &Path,
        caption: Option<&str>,
    ) -> Result<bool, NotifyError>;

    fn send_photo(
        &self,
        chat_id: &str,
        path: &Path,
        caption: Option<&str>,
    ) -> Result<bool, NotifyError>;
}

/// A bot credential plus the runtime its sends are driven on.
pub struct Notifier<A = TelegramBot> {
    api: A,
    runtime: Runtime,
}

impl Notifier {
    /// Creates a notifier for `token` against the public Bot API server.
    pub fn new(token: &str) -> Result<Self, NotifyError> {
        require_token(token)?;
        Self::with_api(TelegramBot::new(token.to_string()))
    }

    pub fn with_config(config: TelegramBotConfig) -> Result<Self, NotifyError> {
        require_token(&config.api_key)?;
        Self::with_api(TelegramBot::from_config(config))
    }
}

impl<A: BotApi> Notifier<A> {
    pub fn with_api(api: A) -> Result<Self, NotifyError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(NotifyError::Runtime)?;
        Ok(Self { api, runtime })
    }

    fn upload(
        &self,
        kind: Upload,
        chat_id: &str,
        path: &Path,
        caption: Option<&str>,
    ) -> Result<bool, NotifyError> {
        require_chat_id(chat_id)?;
        // Checked here as well as by callers: the file may be gone by now.
        if !path.exists() {
            return Err(NotifyError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        self.runtime.block_on(async {
            let file = read_input_file(path).await?;
            let sent = match kind {
                Upload::Document => self.api.send_document(chat_id, file, caption).await,
                Upload::Photo => self.api.send_photo(chat_id, file, caption).await,
            };
            sent.map_err(|err| NotifyError::remote(kind.payload(), err))?;
            Ok::<_, NotifyError>(true)
        })
    }
}

impl<A: BotApi> Notify for Notifier<A> {
    fn send_text(&self, chat_id: &str, text: &str) -> Result<bool, NotifyError> {
        require_chat_id(chat_id)?;
        tracing::debug!(chat_id, "sending message");
        self.runtime
            .block_on(self.api.send_message(chat_id, text))
            .map_err(|err| NotifyError::remote(Payload::Message, err))?;
        Ok(true)
    }

    fn send_document(
        &self,
        chat_id: &str,
        path: &Path,
        caption: Option<&str>,
    ) -> Result<bool, NotifyError> {
        tracing::debug!(chat_id, path = %path.display(), "sending document");
        self.upload(Upload::Document, chat_id, path, caption)
    }

    fn send_photo(
        &self,
        chat_id: &str,
        path: &Path,
        caption: Option<&str>,
    ) -> Result<bool, NotifyError> {
        tracing::debug!(chat_id, path = %path.display(), "sending photo");
        self.upload(Upload::Photo, chat_id, path, caption)
    }
}

fn require_token(token: &str) -> Result<(), NotifyError> {
    if token.is_empty() {
        return Err(NotifyError::MissingToken);
    }
    Ok(())
}

fn require_chat_id(chat_id: &str) -> Result<(), NotifyError> {
    if chat_id.is_empty() {
        return Err(NotifyError::MissingChatId);
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum Upload {
    Document,
    Photo,
}

impl Upload {
    fn payload(self) -> Payload {
        match self {
            Upload::Document => Payload::Document,
            Upload::Photo => Payload::Photo,
        }
    }
}

/// Reads the whole file; the handle is closed before the upload starts.
async fn read_input_file(path: &Path) -> Result<InputFile, NotifyError> {
    let bytes = tokio::fs::read(path).await.map_err(|err| match err.kind() {
        ErrorKind::NotFound => NotifyError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => NotifyError::Io(err),
    })?;
    Ok(InputFile::new(upload_file_name(path), bytes))
}

/// Final path segment, or the whole path when there is none (`..`, `/`).
pub(crate) fn upload_file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

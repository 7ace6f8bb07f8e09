use reqwest::multipart::Part;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub(crate) struct SendMessageRequest<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
}

/// Envelope wrapped around every Bot API response.
#[derive(Deserialize)]
pub(crate) struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<u16>,
}

/// The message the Bot API created for a successful send.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
}

/// A local file already read into memory, ready to go out as one multipart part.
#[derive(Debug, Clone)]
pub struct InputFile {
    /// Name reported to Telegram; shown to the recipient for documents
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub(crate) fn into_part(self) -> Part {
        Part::bytes(self.bytes).file_name(self.file_name)
    }
}

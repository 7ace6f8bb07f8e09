//! Exercises `TelegramBot` against a loopback responder that speaks just
//! enough HTTP/1.1 to answer one request.

use clients_telegrambot::{InputFile, TelegramBot, TelegramBotConfig, TelegramError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const OK_BODY: &str = r#"{"ok":true,"result":{"message_id":42,"date":0,"chat":{"id":123,"type":"private"}}}"#;

/// Answers exactly one request with `status` and `body`; resolves to the raw request.
async fn respond_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });
    (base_url, handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .map(|v| v.trim().parse::<usize>().unwrap())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn bot(base_url: &str) -> TelegramBot {
    let client = reqwest_client();
    let config = TelegramBotConfig::new("123:ABC")
        .with_base_url(base_url)
        .unwrap();
    TelegramBot::with_config(client, config)
}

fn reqwest_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn send_message_posts_json_to_token_endpoint() {
    let (base_url, server) = respond_once("200 OK", OK_BODY).await;

    let message = bot(&base_url)
        .send_message("123", "hello 👋")
        .await
        .unwrap();
    let request = server.await.unwrap();

    assert_eq!(message.message_id, 42);
    assert!(request.starts_with("POST /bot123:ABC/sendMessage HTTP/1.1"));
    assert!(request.contains(r#""chat_id":"123""#));
    assert!(request.contains(r#""text":"hello 👋""#));
}

#[tokio::test]
async fn send_message_keeps_long_text_intact() {
    let (base_url, server) = respond_once("200 OK", OK_BODY).await;
    let text = "A".repeat(5000);

    bot(&base_url).send_message("123", &text).await.unwrap();
    let request = server.await.unwrap();

    assert!(request.contains(&format!(r#""text":"{text}""#)));
}

#[tokio::test]
async fn unauthorized_envelope_maps_to_unauthorized() {
    let (base_url, server) = respond_once(
        "401 Unauthorized",
        r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#,
    )
    .await;

    let err = bot(&base_url).send_message("123", "hi").await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, TelegramError::Unauthorized { .. }));
    assert_eq!(err.to_string(), "Unauthorized");
}

#[tokio::test]
async fn bad_request_keeps_description() {
    let (base_url, server) = respond_once(
        "400 Bad Request",
        r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
    )
    .await;

    let err = bot(&base_url).send_message("nope", "hi").await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, TelegramError::BadRequest { .. }));
    assert_eq!(err.to_string(), "Bad Request: chat not found");
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status() {
    let (base_url, server) = respond_once("502 Bad Gateway", "<html>oops</html>").await;

    let err = bot(&base_url).send_message("123", "hi").await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, TelegramError::Api { error_code: 502, .. }));
    assert_eq!(err.to_string(), "502 Bad Gateway");
}

#[tokio::test]
async fn send_document_uploads_multipart_with_file_name_and_caption() {
    let (base_url, server) = respond_once("200 OK", OK_BODY).await;
    let document = InputFile::new("report.pdf", b"%PDF-1.4 test".to_vec());

    bot(&base_url)
        .send_document("123", document, Some("Weekly report"))
        .await
        .unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("POST /bot123:ABC/sendDocument HTTP/1.1"));
    assert!(request.contains("multipart/form-data; boundary="));
    assert!(request.contains(r#"name="chat_id""#));
    assert!(request.contains(r#"name="caption""#));
    assert!(request.contains("Weekly report"));
    assert!(request.contains(r#"name="document"; filename="report.pdf""#));
    assert!(request.contains("%PDF-1.4 test"));
}

#[tokio::test]
async fn send_photo_without_caption_omits_caption_field() {
    let (base_url, server) = respond_once("200 OK", OK_BODY).await;
    let photo = InputFile::new("cat.jpg", b"fake image data".to_vec());

    bot(&base_url).send_photo("123", photo, None).await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("POST /bot123:ABC/sendPhoto HTTP/1.1"));
    assert!(request.contains(r#"name="photo"; filename="cat.jpg""#));
    assert!(!request.contains(r#"name="caption""#));
}

#[tokio::test]
async fn unreachable_server_is_http_error_without_token() {
    let err = bot("http://127.0.0.1:1")
        .send_message("123", "hi")
        .await
        .unwrap_err();

    assert!(matches!(err, TelegramError::Http(_)));
    assert!(!err.to_string().contains("123:ABC"));
}

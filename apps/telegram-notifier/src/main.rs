//! telegram-notifier - send messages, documents and photos to a Telegram chat

mod commands;
mod env;

use std::path::PathBuf;

use clap::builder::{PathBufValueParser, TypedValueParser};
use clap::{Args, Parser, Subcommand};
use notifier::{Notifier, NotifyError, TelegramBotConfig};
use tracing_subscriber::EnvFilter;

use commands::{Credentials, Request};

#[derive(Parser)]
#[command(
    name = "telegram-notifier",
    version,
    about = "Send messages to Telegram chats from the command line"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send a text message
    Send {
        #[command(flatten)]
        credentials: CredentialArgs,
        /// Message text to send
        #[arg(long)]
        message: String,
    },
    /// Send a file as a document
    SendFile(FileArgs),
    /// Send an image as a photo
    SendPhoto(FileArgs),
}

#[derive(Args)]
struct CredentialArgs {
    /// Telegram bot token (or set TELEGRAM_BOT_TOKEN env var)
    #[arg(long)]
    token: Option<String>,
    /// Target chat ID (or set TELEGRAM_CHAT_ID env var)
    #[arg(long)]
    chat_id: Option<String>,
}

#[derive(Args)]
struct FileArgs {
    #[command(flatten)]
    credentials: CredentialArgs,
    /// Path of the file to send
    #[arg(long, value_parser = PathBufValueParser::new().try_map(existing_path))]
    file: PathBuf,
    /// Optional caption shown with the file
    #[arg(long)]
    caption: Option<String>,
}

/// Paths are taken as raw OS strings, so non-UTF-8 names are accepted.
fn existing_path(path: PathBuf) -> Result<PathBuf, String> {
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("path '{}' does not exist", path.display()))
    }
}

impl From<CredentialArgs> for Credentials {
    fn from(args: CredentialArgs) -> Self {
        Credentials {
            token: args.token,
            chat_id: args.chat_id,
        }
    }
}

fn main() {
    // Silent unless RUST_LOG asks otherwise: stdout/stderr carry one result line.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (credentials, request) = match cli.command {
        Command::Send {
            credentials,
            message,
        } => (credentials, Request::Text { message }),
        Command::SendFile(args) => (
            args.credentials,
            Request::Document {
                path: args.file,
                caption: args.caption,
            },
        ),
        Command::SendPhoto(args) => (
            args.credentials,
            Request::Photo {
                path: args.file,
                caption: args.caption,
            },
        ),
    };

    let code = match commands::execute(
        &request,
        credentials.into(),
        env::lookup,
        connect,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    ) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Unexpected error: {e:#}");
            commands::EXIT_FAILURE
        }
    };
    std::process::exit(code);
}

/// Builds the one client this invocation uses.
fn connect(token: &str) -> Result<Notifier, NotifyError> {
    let mut config = TelegramBotConfig::new(token);
    if let Some(base_url) = env::lookup(env::API_URL) {
        config = config.with_base_url(&base_url)?;
    }
    Notifier::with_config(config)
}

//! Telegram Bot API delivery.
//!
//! A notice with zero or one photo becomes a single `sendPhoto` call; two or
//! more photos become one `sendMediaGroup` call whose first entry carries the
//! caption. Credentials are used exactly as configured: a missing token or
//! channel only shows up as an error answer from Telegram.

use std::time::Duration;

use async_trait::async_trait;
use folio_core::notice::NewProjectNotice;
use serde::Serialize;

use crate::error::NotifyError;
use crate::ProjectNotifier;

/// Default Bot API endpoint.
const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Default HTTP timeout for a single Bot API call.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Photo sent when a project has no images of its own.
pub const PLACEHOLDER_PHOTO_URL: &str = "https://via.placeholder.com/600";

/// Caption parse mode understood by the Bot API.
const PARSE_MODE: &str = "Markdown";

// ---------------------------------------------------------------------------
// TelegramConfig
// ---------------------------------------------------------------------------

/// Configuration for the Telegram delivery channel.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API base URL, without trailing slash.
    pub api_url: String,
    /// Bot token (`BOT_TOKEN`). Not validated.
    pub bot_token: String,
    /// Target chat or channel (`TELEGRAM_CHANNEL_ID`). Not validated.
    pub channel_id: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl TelegramConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable                | Default                    |
    /// |-------------------------|----------------------------|
    /// | `BOT_TOKEN`             | empty                      |
    /// | `TELEGRAM_CHANNEL_ID`   | empty                      |
    /// | `TELEGRAM_API_URL`      | `https://api.telegram.org` |
    /// | `TELEGRAM_TIMEOUT_SECS` | `10`                       |
    pub fn from_env() -> Self {
        let timeout_secs = std::env::var("TELEGRAM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_url: std::env::var("TELEGRAM_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            bot_token: std::env::var("BOT_TOKEN").unwrap_or_default(),
            channel_id: std::env::var("TELEGRAM_CHANNEL_ID").unwrap_or_default(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Full URL of a Bot API method for the configured bot.
    pub fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{method}",
            self.api_url.trim_end_matches('/'),
            self.bot_token
        )
    }
}

// ---------------------------------------------------------------------------
// Request shapes
// ---------------------------------------------------------------------------

/// Body of a `sendPhoto` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendPhoto {
    pub chat_id: String,
    pub photo: String,
    pub caption: String,
    pub parse_mode: &'static str,
}

/// One `photo` entry of a media group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputMediaPhoto {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub media: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
}

/// Body of a `sendMediaGroup` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendMediaGroup {
    pub chat_id: String,
    pub media: Vec<InputMediaPhoto>,
}

/// The single Bot API call made for one notice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TelegramRequest {
    SendPhoto(SendPhoto),
    SendMediaGroup(SendMediaGroup),
}

impl TelegramRequest {
    /// Choose the request shape for `notice` by photo count.
    pub fn for_notice(chat_id: &str, notice: &NewProjectNotice) -> Self {
        match notice.photo_urls.as_slice() {
            [] | [_] => {
                let photo = notice
                    .photo_urls
                    .first()
                    .cloned()
                    .unwrap_or_else(|| PLACEHOLDER_PHOTO_URL.to_string());
                Self::SendPhoto(SendPhoto {
                    chat_id: chat_id.to_string(),
                    photo,
                    caption: notice.caption.clone(),
                    parse_mode: PARSE_MODE,
                })
            }
            urls => {
                let media = urls
                    .iter()
                    .enumerate()
                    .map(|(i, url)| InputMediaPhoto {
                        kind: "photo",
                        media: url.clone(),
                        caption: (i == 0).then(|| notice.caption.clone()),
                        parse_mode: (i == 0).then_some(PARSE_MODE),
                    })
                    .collect();
                Self::SendMediaGroup(SendMediaGroup {
                    chat_id: chat_id.to_string(),
                    media,
                })
            }
        }
    }

    /// Bot API method name.
    pub fn method(&self) -> &'static str {
        match self {
            Self::SendPhoto(_) => "sendPhoto",
            Self::SendMediaGroup(_) => "sendMediaGroup",
        }
    }

    fn photo_count(&self) -> usize {
        match self {
            Self::SendPhoto(_) => 1,
            Self::SendMediaGroup(group) => group.media.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// TelegramNotifier
// ---------------------------------------------------------------------------

/// Publishes project notices to a Telegram channel.
pub struct TelegramNotifier {
    client: reqwest::Client,
    config: TelegramConfig,
}

impl TelegramNotifier {
    /// Create a notifier with an HTTP client bound to the configured timeout.
    pub fn new(config: TelegramConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Execute one Bot API call and check the response status.
    async fn send(&self, request: &TelegramRequest) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(self.config.method_url(request.method()))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::HttpStatus {
                status: status.as_u16(),
                description: error_description(&body),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectNotifier for TelegramNotifier {
    async fn notify(&self, notice: &NewProjectNotice) -> Result<(), NotifyError> {
        let request = TelegramRequest::for_notice(&self.config.channel_id, notice);
        self.send(&request).await?;
        tracing::info!(
            method = request.method(),
            photos = request.photo_count(),
            "Project notice delivered"
        );
        Ok(())
    }
}

/// Pull `description` out of a Bot API error body, falling back to the raw text.
fn error_description(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("description")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Telegram sales-team alerts via the Bot API.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::DeliveryError;

/// Upper bound on a notification call. The pipeline never waits on
/// notifications, but a stuck call shouldn't pin a task forever either.
const NOTIFY_TIMEOUT: Duration = Duration::from_secs(5);

/// Telegram configuration, built from environment variables.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

impl TelegramConfig {
    /// Build config from environment variables.
    /// Returns `None` unless both `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`
    /// are set (notifications disabled).
    pub fn from_env() -> Option<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN").ok()?;
        let chat_id = std::env::var("TELEGRAM_CHAT_ID").ok()?;
        Some(Self { bot_token, chat_id })
    }
}

/// Best-effort alert delivery. The core never observes the result.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str);
}

/// Notifier backed by the Telegram Bot API.
pub struct TelegramNotifier {
    config: TelegramConfig,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(NOTIFY_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    fn api_url(&self, method: &str) -> String {
        format!(
            "https://api.telegram.org/bot{}/{}",
            self.config.bot_token, method
        )
    }

    async fn send_message(&self, text: &str) -> Result<(), DeliveryError> {
        let body = serde_json::json!({
            "chat_id": self.config.chat_id,
            "text": text,
        });

        let resp = self
            .client
            .post(self.api_url("sendMessage"))
            .json(&body)
            .send()
            .await
            .map_err(|e| DeliveryError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let err = resp.text().await.unwrap_or_default();
            return Err(DeliveryError::Http(format!(
                "sendMessage failed ({status}): {err}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) {
        if let Err(e) = self.send_message(text).await {
            tracing::warn!(error = %e, "Telegram notification failed");
        }
    }
}

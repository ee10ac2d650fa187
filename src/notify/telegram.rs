use super::Notifier;
use crate::api::REQUEST_TIMEOUT_SECS;
use crate::config::TelegramSettings;
use crate::error::NotifyError;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Telegram Bot API client bound to one chat
#[derive(Clone)]
pub struct TelegramNotifier {
    client: Client,
    base_url: String,
    bot_token: String,
    chat_id: String,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
    disable_notification: bool,
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(
        base_url: impl Into<String>,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        })
    }

    pub fn from_settings(settings: &TelegramSettings) -> Result<Self, NotifyError> {
        let bot_token = settings
            .bot_token
            .as_deref()
            .ok_or(NotifyError::MissingCredentials("TELEGRAM_BOT_TOKEN"))?;
        let chat_id = settings
            .chat_id
            .as_deref()
            .ok_or(NotifyError::MissingCredentials("TELEGRAM_CHAT_ID"))?;

        Self::new(settings.base_url.as_str(), bot_token, chat_id)
    }

    async fn post(&self, text: &str, silent: bool) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.bot_token);
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
            parse_mode: "HTML",
            disable_notification: silent,
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let parsed: Option<TelegramResponse> = serde_json::from_str(&body).ok();
        match parsed {
            Some(TelegramResponse { ok: true, .. }) if status.is_success() => {
                tracing::debug!("Telegram message delivered ({} chars)", text.len());
                Ok(())
            }
            Some(TelegramResponse { description, .. }) => Err(NotifyError::Rejected {
                status: status.as_u16(),
                description: description.unwrap_or_else(|| "no description".to_string()),
            }),
            None => Err(NotifyError::Rejected {
                status: status.as_u16(),
                description: body,
            }),
        }
    }
}

impl Notifier for TelegramNotifier {
    async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        self.post(text, false).await
    }

    async fn send_test_message(&self, text: &str) -> Result<(), NotifyError> {
        self.post(&format!("[TEST] {}", text), true).await
    }
}

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::Notifier;

/// Posts to the Telegram Bot API `sendMessage` endpoint. Bot token and
/// chat id come from configuration, never from literals.
pub struct TelegramNotifier {
    bot_token: String,
    chat_id: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self {
            bot_token,
            chat_id,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    result: Option<TelegramMessage>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct TelegramMessage {
    message_id: Option<i64>,
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, message: &str) -> anyhow::Result<Option<i64>> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);

        let body: TelegramResponse = self
            .client
            .post(&url)
            .json(&json!({
                "chat_id": self.chat_id,
                "text": message,
                "parse_mode": "HTML",
            }))
            .send()
            .await
            .context("failed to reach Telegram API")?
            .json()
            .await
            .context("invalid Telegram API response")?;

        if !body.ok {
            anyhow::bail!(
                "{}",
                body.description
                    .unwrap_or_else(|| "Telegram API error".to_string())
            );
        }

        Ok(body.result.and_then(|m| m.message_id))
    }
}

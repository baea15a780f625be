use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub kv_rest_api_url: String,
    pub kv_rest_api_token: String,
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            kv_rest_api_url: env::var("KV_REST_API_URL").unwrap_or_default(),
            kv_rest_api_token: env::var("KV_REST_API_TOKEN").unwrap_or_default(),
            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default(),
            telegram_chat_id: env::var("TELEGRAM_CHAT_ID").unwrap_or_default(),
        }
    }

    /// Both values must be present for the durable KV backend to be used.
    pub fn kv_configured(&self) -> bool {
        !self.kv_rest_api_url.is_empty() && !self.kv_rest_api_token.is_empty()
    }
}

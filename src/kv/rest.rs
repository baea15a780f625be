use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::KvBackend;

/// Upstash-style REST key-value client. Values are stored as JSON text:
/// `GET {base}/get/{key}` returns `{"result": <string|null>}` and
/// `POST {base}/set/{key}` takes the serialized value as the body.
pub struct RestKv {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl RestKv {
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct KvResult {
    result: Option<String>,
}

#[async_trait]
impl KvBackend for RestKv {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Value>> {
        let url = format!("{}/get/{}", self.base_url, key);

        let body: KvResult = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .context("failed to reach KV store")?
            .error_for_status()
            .context("KV store returned error")?
            .json()
            .await
            .context("invalid KV store response")?;

        match body.result {
            Some(raw) => {
                let value = serde_json::from_str(&raw).context("stored value is not valid JSON")?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: Value) -> anyhow::Result<()> {
        let url = format!("{}/set/{}", self.base_url, key);

        self.client
            .post(&url)
            .bearer_auth(&self.token)
            .body(value.to_string())
            .send()
            .await
            .context("failed to reach KV store")?
            .error_for_status()
            .context("KV store returned error")?;

        Ok(())
    }
}

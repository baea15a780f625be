pub mod telegram;

use async_trait::async_trait;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers one message, returning the provider's message id when it
    /// reports one.
    async fn send(&self, message: &str) -> anyhow::Result<Option<i64>>;
}

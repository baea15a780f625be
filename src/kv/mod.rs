pub mod memory;
pub mod rest;

use async_trait::async_trait;
use serde_json::Value;

/// Uniform get/set over one JSON blob per key. Implementations are
/// selected once at startup; faults are caught at the `RecordStore`
/// boundary and never reach the handlers.
#[async_trait]
pub trait KvBackend: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> anyhow::Result<()>;
}

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use frontdesk::config::AppConfig;
use frontdesk::kv::memory::MemoryKv;
use frontdesk::kv::rest::RestKv;
use frontdesk::kv::KvBackend;
use frontdesk::services::notify::telegram::TelegramNotifier;
use frontdesk::state::AppState;
use frontdesk::store::RecordStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let backend: Box<dyn KvBackend> = if config.kv_configured() {
        tracing::info!("using REST KV backend at {}", config.kv_rest_api_url);
        Box::new(RestKv::new(
            config.kv_rest_api_url.clone(),
            config.kv_rest_api_token.clone(),
        ))
    } else {
        tracing::info!(
            "KV_REST_API_URL/KV_REST_API_TOKEN not set, using in-memory store (data is lost on restart and not shared across instances)"
        );
        Box::new(MemoryKv::new())
    };

    let notifier = TelegramNotifier::new(
        config.telegram_bot_token.clone(),
        config.telegram_chat_id.clone(),
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        store: RecordStore::new(backend),
        notifier: Box::new(notifier),
    });

    let app = frontdesk::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use crate::config::AppConfig;
use crate::services::notify::Notifier;
use crate::store::RecordStore;

pub struct AppState {
    pub config: AppConfig,
    pub store: RecordStore,
    pub notifier: Box<dyn Notifier>,
}

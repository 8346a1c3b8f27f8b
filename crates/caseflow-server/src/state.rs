use crate::config::ServerConfig;
use caseflow_storage::CaseStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CaseStore>,
    pub config: Arc<ServerConfig>,
    /// Serializes imports and status updates so two writers never race on
    /// the stored alert snapshot.
    pub write_lock: Arc<Mutex<()>>,
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: CaseStore, config: ServerConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
            write_lock: Arc::new(Mutex::new(())),
            start_time: Utc::now(),
        }
    }
}

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::services::registry::EventRegistry;

pub type SharedRegistry = Arc<RwLock<EventRegistry>>;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub registry: SharedRegistry,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            registry: Arc::new(RwLock::new(EventRegistry::new())),
            config,
        }
    }
}

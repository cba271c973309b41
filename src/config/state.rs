// Application state module
// Shared by every connection task

use std::sync::atomic::AtomicUsize;

use super::types::Config;
use crate::todo::TodoStore;

/// Application state
pub struct AppState {
    pub config: Config,

    /// The todo collection, created empty at startup
    pub store: TodoStore,

    /// Connections currently being served
    pub active_connections: AtomicUsize,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            store: TodoStore::new(),
            active_connections: AtomicUsize::new(0),
        }
    }
}

use crate::config::ServerConfig;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;

pub mod lifecycle;
pub mod move_handler;
pub mod session;

pub use session::{Session, Tx};

pub struct AppState {
    pub sessions: DashMap<String, Session>,
    /// Bounds the number of searches running at once.
    pub search_slots: Arc<Semaphore>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            sessions: DashMap::new(),
            search_slots: Arc::new(Semaphore::new(config.search_slots.max(1))),
            config,
        }
    }
}

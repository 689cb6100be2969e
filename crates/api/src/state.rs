use std::sync::Arc;
use std::time::Duration;

use crate::config::ServerConfig;
use crate::session::SessionStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: trifold_db::DbPool,
    /// Server configuration (token settings are read by the permission gate).
    pub config: Arc<ServerConfig>,
    /// Flash messages and stashed forms for the directory pages.
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(pool: trifold_db::DbPool, config: ServerConfig) -> Self {
        let session_ttl = Duration::from_secs(config.session_ttl_secs);
        Self {
            pool,
            config: Arc::new(config),
            sessions: Arc::new(SessionStore::new(session_ttl)),
        }
    }
}

use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted internally and the config
/// sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. Handlers borrow a connection per statement
    /// (or per transaction) and it returns to the pool when dropped.
    pub pool: libris_db::DbPool,
    pub config: Arc<ServerConfig>,
}

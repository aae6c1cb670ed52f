use std::sync::Arc;

use folio_db::store::ProjectStore;
use folio_notify::ProjectNotifier;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Project persistence.
    pub store: Arc<dyn ProjectStore>,
    /// Outbound channel for new-project announcements.
    pub notifier: Arc<dyn ProjectNotifier>,
    /// Server configuration, read once at startup.
    pub config: Arc<ServerConfig>,
}

use std::sync::Arc;

use tradewatch_notify::Notifier;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Dual-channel notifier, constructed once at startup with immutable
    /// channel configuration.
    pub notifier: Arc<Notifier>,
}

pub mod health;
pub mod root;
pub mod webhook;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree.
///
/// Route hierarchy:
///
/// ```text
/// GET  /           welcome message
/// GET  /health     service health
/// POST /webhook    receive one trading notification and fan it out
/// ```
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(root::router())
        .merge(health::router())
        .merge(webhook::router())
}

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Welcome response payload.
#[derive(Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

/// GET / -- welcome banner for manual smoke checks.
async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Trading Webhook API!",
    })
}

/// Mount the root route.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(welcome))
}

//! The webhook ingestion endpoint.
//!
//! Accepts one POST per trading notification, parses the body according to
//! its Content-Type, and hands the payload to the notifier. Request
//! handling blocks until both channel sends complete; channel failures are
//! reported inside the 200 response body, never as HTTP errors.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::{routing::post, Json, Router};
use serde::Serialize;

use tradewatch_core::InboundPayload;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Webhook response payload.
///
/// `status` refers to request handling only; each channel reports its own
/// outcome in its own field, so a failed SMS and a failed email both still
/// produce a 200.
#[derive(Serialize)]
pub struct WebhookResponse {
    pub status: &'static str,
    pub sms_response: String,
    pub email_response: String,
}

/// POST /webhook -- receive one notification and fan it out.
async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<WebhookResponse>> {
    let payload = parse_payload(&headers, &body)?;
    tracing::info!(payload = ?payload, "Received webhook notification");

    let outcome = state.notifier.notify(&payload).await;

    Ok(Json(WebhookResponse {
        status: "success",
        sms_response: outcome.sms_response,
        email_response: outcome.email_response,
    }))
}

/// Parse the request body according to its Content-Type.
///
/// `application/json` bodies may be any JSON value, not just an object;
/// `text/plain` bodies are taken verbatim. Anything else (including a
/// missing Content-Type) is rejected before any sender is invoked.
fn parse_payload(headers: &HeaderMap, body: &Bytes) -> AppResult<InboundPayload> {
    match essence(headers).as_deref() {
        Some("application/json") => serde_json::from_slice(body)
            .map(InboundPayload::Json)
            .map_err(|e| AppError::InvalidJson(e.to_string())),
        Some("text/plain") => std::str::from_utf8(body)
            .map(|text| InboundPayload::Text(text.to_string()))
            .map_err(|_| AppError::InvalidUtf8),
        _ => Err(AppError::UnsupportedMediaType),
    }
}

/// Extract the media type from the Content-Type header, dropping any
/// parameters (`application/json; charset=utf-8` -> `application/json`).
fn essence(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    let media_type = value.split(';').next().unwrap_or(value);
    Some(media_type.trim().to_ascii_lowercase())
}

/// Mount the webhook route.
pub fn router() -> Router<AppState> {
    Router::new().route("/webhook", post(receive_webhook))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use tradewatch_api::config::ServerConfig;
use tradewatch_api::routes;
use tradewatch_api::state::AppState;
use tradewatch_notify::{EmailConfig, Notifier, SmsConfig};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
    }
}

/// SMS configuration pointed at a mock gateway.
pub fn sms_config(base_url: &str) -> SmsConfig {
    SmsConfig {
        base_url: base_url.to_string(),
        api_key: "test-api-key".to_string(),
        sender_id: "Tradewatch".to_string(),
        recipients: vec!["+2348000000001".to_string()],
    }
}

/// Email configuration whose SMTP host refuses connections (port 9,
/// discard). Used where a failing email outcome is wanted.
pub fn unreachable_email_config() -> EmailConfig {
    EmailConfig {
        smtp_host: "127.0.0.1".to_string(),
        smtp_port: 9,
        from_address: "alerts@example.com".to_string(),
        smtp_user: Some("user".to_string()),
        smtp_password: Some("password".to_string()),
        to_address: Some("trader@example.com".to_string()),
    }
}

/// Email configuration with no destination address (channel disabled).
pub fn disabled_email_config() -> EmailConfig {
    EmailConfig {
        to_address: None,
        ..unreachable_email_config()
    }
}

/// Build the full application router with all middleware layers, using the
/// given notifier.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(notifier: Notifier) -> Router {
    let state = AppState {
        config: Arc::new(test_config()),
        notifier: Arc::new(notifier),
    };

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .with_state(state)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request"),
    )
    .await
    .expect("Request failed")
}

/// Issue a POST request with the given Content-Type and body.
pub async fn post(app: Router, uri: &str, content_type: &str, body: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .expect("Failed to build request"),
    )
    .await
    .expect("Request failed")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Response body is not valid JSON")
}

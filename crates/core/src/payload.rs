//! Inbound payload model and per-channel message formatting.
//!
//! A webhook body arrives either as JSON or as plain text. Both channels
//! send the same information, but email gets the full pretty-printed JSON
//! while SMS gets a flattened `key: value` line per top-level field to
//! stay within SMS length limits.

use serde_json::Value;

// ---------------------------------------------------------------------------
// InboundPayload
// ---------------------------------------------------------------------------

/// One received webhook body.
///
/// Lives only for the duration of a single request and is never mutated
/// after parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundPayload {
    /// Body parsed from an `application/json` request. May be any JSON
    /// value, not just an object.
    Json(Value),
    /// Raw body of a `text/plain` request.
    Text(String),
}

// ---------------------------------------------------------------------------
// NotificationMessage
// ---------------------------------------------------------------------------

/// The two derived string renderings of an [`InboundPayload`].
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationMessage {
    /// Pretty-printed JSON (or the raw text) — used as the email body.
    pub email_body: String,
    /// One `key: value` line per top-level field (or the raw text) —
    /// used as the SMS body.
    pub sms_body: String,
}

impl NotificationMessage {
    /// Render both channel bodies from a payload.
    ///
    /// - JSON object: email gets the pretty-printed form, SMS gets one
    ///   `key: value` line per top-level key in the payload's original
    ///   key order.
    /// - plain text: both bodies are the raw text verbatim.
    /// - non-object JSON: both bodies are the JSON text of the value.
    pub fn render(payload: &InboundPayload) -> Self {
        match payload {
            InboundPayload::Json(value @ Value::Object(map)) => Self {
                email_body: serde_json::to_string_pretty(value).unwrap_or_default(),
                sms_body: map
                    .iter()
                    .map(|(key, value)| format!("{key}: {}", flatten_value(value)))
                    .collect::<Vec<_>>()
                    .join("\n"),
            },
            InboundPayload::Json(value) => {
                let text = serde_json::to_string_pretty(value).unwrap_or_default();
                Self {
                    email_body: text.clone(),
                    sms_body: text,
                }
            }
            InboundPayload::Text(text) => Self {
                email_body: text.clone(),
                sms_body: text.clone(),
            },
        }
    }
}

/// Render a JSON value for an SMS line: strings bare (no surrounding
/// quotes), everything else as compact JSON.
fn flatten_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! SMS delivery via the Termii bulk SMS HTTP gateway.
//!
//! [`SmsSender`] issues a single JSON POST to the gateway's bulk-send
//! endpoint. There are no retries; a failed attempt is reported to the
//! caller and never escalated beyond the response body.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for SMS gateway failures.
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway response body was not valid JSON.
    #[error("Invalid JSON response - {0}")]
    InvalidResponse(String),

    /// The gateway rejected the message (non-200 status, or a 200 whose
    /// body lacks the `message` field).
    #[error("{0}")]
    Gateway(String),
}

// ---------------------------------------------------------------------------
// SmsConfig
// ---------------------------------------------------------------------------

/// Default Termii API base URL.
const DEFAULT_BASE_URL: &str = "https://v3.api.termii.com";

/// HTTP request timeout for a single send attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the SMS gateway, loaded once at startup.
#[derive(Debug, Clone)]
pub struct SmsConfig {
    /// Gateway base URL (defaults to the Termii production endpoint).
    pub base_url: String,
    /// API key, sent in the request body per the Termii protocol.
    pub api_key: String,
    /// Registered alphanumeric sender id.
    pub sender_id: String,
    /// Destination phone numbers in international format.
    pub recipients: Vec<String>,
}

impl SmsConfig {
    /// Load configuration from environment variables.
    ///
    /// Nothing is validated here: an empty API key or recipient list is
    /// accepted and only surfaces when a send is attempted (or is skipped
    /// entirely for an empty recipient list).
    ///
    /// | Variable           | Default                      |
    /// |--------------------|------------------------------|
    /// | `TERMII_BASE_URL`  | `https://v3.api.termii.com`  |
    /// | `TERMII_API_KEY`   | empty                        |
    /// | `TERMII_SENDER_ID` | empty                        |
    /// | `SMS_RECIPIENTS`   | empty (comma-separated list) |
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("TERMII_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            api_key: std::env::var("TERMII_API_KEY").unwrap_or_default(),
            sender_id: std::env::var("TERMII_SENDER_ID").unwrap_or_default(),
            recipients: std::env::var("SMS_RECIPIENTS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// SmsSender
// ---------------------------------------------------------------------------

/// Sends one alert text to every configured recipient in a single bulk call.
pub struct SmsSender {
    client: reqwest::Client,
    config: SmsConfig,
}

impl SmsSender {
    /// Create a new sender with a pre-configured HTTP client.
    pub fn new(config: SmsConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// Destination phone numbers from the active configuration.
    pub fn recipients(&self) -> &[String] {
        &self.config.recipients
    }

    /// Send `message` to every configured recipient.
    ///
    /// On success returns the gateway's `message` field verbatim (e.g.
    /// `"Successfully Sent"`). A 200 response whose body lacks the
    /// `message` field is treated as a failure, matching the gateway's
    /// observed behaviour for rejected sends.
    pub async fn send(&self, message: &str) -> Result<String, SmsError> {
        let url = format!("{}/api/sms/send/bulk", self.config.base_url);
        let payload = serde_json::json!({
            "to": self.config.recipients,
            "from": self.config.sender_id,
            "sms": message,
            "type": "plain",
            "channel": "generic",
            "api_key": self.config.api_key,
        });

        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();
        let text = response.text().await?;

        let body: serde_json::Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(_) => return Err(SmsError::InvalidResponse(text)),
        };

        // Presence of the field decides the outcome; a non-string value
        // is stringified rather than treated as missing.
        match body.get("message").map(message_text) {
            Some(gateway_message) if status.is_success() => {
                tracing::info!(
                    recipients = self.config.recipients.len(),
                    "SMS alert accepted by gateway"
                );
                Ok(gateway_message)
            }
            Some(gateway_message) => Err(SmsError::Gateway(gateway_message)),
            None => Err(SmsError::Gateway(text)),
        }
    }
}

/// Render a gateway `message` value: strings bare, anything else as
/// compact JSON.
fn message_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_does_not_panic() {
        let _sender = SmsSender::new(SmsConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: "key".to_string(),
            sender_id: "Tradewatch".to_string(),
            recipients: vec!["+2348000000000".to_string()],
        });
    }

    #[test]
    fn sms_error_display_gateway() {
        let err = SmsError::Gateway("Invalid API key".to_string());
        assert_eq!(err.to_string(), "Invalid API key");
    }

    #[test]
    fn sms_error_display_invalid_response() {
        let err = SmsError::InvalidResponse("<html>502</html>".to_string());
        assert_eq!(err.to_string(), "Invalid JSON response - <html>502</html>");
    }
}

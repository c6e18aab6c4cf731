//! Dual-channel fan-out of one webhook payload.
//!
//! [`Notifier`] renders the payload once and dispatches SMS and email
//! concurrently. The channels are independent failure domains: an error in
//! one never suppresses the other, and both outcomes are reported as
//! strings in the webhook response rather than as request failures.

use tradewatch_core::{InboundPayload, NotificationMessage};

use crate::email::{EmailConfig, EmailSender};
use crate::sms::{SmsConfig, SmsSender};

/// Result string when no phone number is configured.
const NO_PHONE: &str = "No phone provided.";

/// Result string when no email address is configured.
const NO_EMAIL: &str = "No email provided.";

/// Result string for a completed email send.
const EMAIL_SENT: &str = "Email sent successfully!";

// ---------------------------------------------------------------------------
// NotificationOutcome
// ---------------------------------------------------------------------------

/// Per-channel result strings for one dispatched payload.
///
/// Both fields are always populated; a failed channel carries a
/// descriptive failure string instead of an error.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationOutcome {
    pub sms_response: String,
    pub email_response: String,
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Fans one payload out to the SMS and email channels.
pub struct Notifier {
    sms: SmsSender,
    email: EmailSender,
}

impl Notifier {
    /// Create a notifier from the two channel configurations.
    pub fn new(sms_config: SmsConfig, email_config: EmailConfig) -> Self {
        Self {
            sms: SmsSender::new(sms_config),
            email: EmailSender::new(email_config),
        }
    }

    /// Render the payload and dispatch both channels.
    ///
    /// The two sends run concurrently; each converts its own failure into
    /// a result string. A channel with no configured recipient is skipped
    /// without any I/O and reports a placeholder string.
    pub async fn notify(&self, payload: &InboundPayload) -> NotificationOutcome {
        let message = NotificationMessage::render(payload);

        let (sms_response, email_response) = tokio::join!(
            self.dispatch_sms(&message.sms_body),
            self.dispatch_email(&message.email_body),
        );

        NotificationOutcome {
            sms_response,
            email_response,
        }
    }

    async fn dispatch_sms(&self, body: &str) -> String {
        if self.sms.recipients().is_empty() {
            return NO_PHONE.to_string();
        }
        match self.sms.send(body).await {
            Ok(gateway_message) => gateway_message,
            Err(e) => {
                tracing::warn!(error = %e, "SMS alert delivery failed");
                format!("Failed to send SMS: {e}")
            }
        }
    }

    async fn dispatch_email(&self, body: &str) -> String {
        let Some(to_email) = self.email.to_address().map(str::to_string) else {
            return NO_EMAIL.to_string();
        };
        match self.email.send(&to_email, body).await {
            Ok(()) => EMAIL_SENT.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Email alert delivery failed");
                format!("Error sending email: {e}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// A notifier with no recipients on either channel.
    fn unconfigured_notifier() -> Notifier {
        Notifier::new(
            SmsConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                api_key: String::new(),
                sender_id: String::new(),
                recipients: Vec::new(),
            },
            EmailConfig {
                smtp_host: String::new(),
                smtp_port: 465,
                from_address: "alerts@example.com".to_string(),
                smtp_user: None,
                smtp_password: None,
                to_address: None,
            },
        )
    }

    #[tokio::test]
    async fn unconfigured_channels_report_placeholders_without_io() {
        let outcome = unconfigured_notifier()
            .notify(&InboundPayload::Json(json!({ "ticker": "AAPL" })))
            .await;

        assert_eq!(outcome.sms_response, NO_PHONE);
        assert_eq!(outcome.email_response, NO_EMAIL);
    }

    #[tokio::test]
    async fn text_payload_reaches_both_placeholder_paths() {
        let outcome = unconfigured_notifier()
            .notify(&InboundPayload::Text("BUY AAPL".to_string()))
            .await;

        assert_eq!(
            outcome,
            NotificationOutcome {
                sms_response: NO_PHONE.to_string(),
                email_response: NO_EMAIL.to_string(),
            }
        );
    }
}

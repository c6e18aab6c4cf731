//! Email delivery via SMTP over implicit TLS.
//!
//! [`EmailSender`] wraps the `lettre` async SMTP transport to send one
//! plain-text alert email per webhook. The transport is built per send so
//! missing or wrong credentials surface only when a send is attempted,
//! never at startup.

use std::time::Duration;

use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

/// Fixed subject line for every alert email.
pub const ALERT_SUBJECT: &str = "Trading Alert!";

/// SMTP connection timeout.
const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (connection, TLS, authentication, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (implicit TLS).
const DEFAULT_SMTP_PORT: u16 = 465;

/// Default sender address when `SMTP_FROM_EMAIL` is not set.
const DEFAULT_FROM_ADDRESS: &str = "alerts@tradewatch.local";

/// Configuration for the SMTP email channel, loaded once at startup.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 465, implicit TLS).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
    /// Destination address; `None` disables the channel gracefully.
    pub to_address: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Nothing is validated here: a missing host or credential set only
    /// surfaces when a send is attempted. A missing `ALERT_EMAIL` means
    /// the channel is skipped entirely.
    ///
    /// | Variable          | Default                     |
    /// |-------------------|-----------------------------|
    /// | `SMTP_HOST`       | empty                       |
    /// | `SMTP_PORT`       | `465`                       |
    /// | `SMTP_FROM_EMAIL` | `alerts@tradewatch.local`   |
    /// | `SMTP_USER`       | —                           |
    /// | `SMTP_PASSWORD`   | —                           |
    /// | `ALERT_EMAIL`     | — (channel disabled)        |
    pub fn from_env() -> Self {
        Self {
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_default(),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM_EMAIL")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            to_address: std::env::var("ALERT_EMAIL").ok(),
        }
    }
}

// ---------------------------------------------------------------------------
// EmailSender
// ---------------------------------------------------------------------------

/// Sends one plain-text alert email per webhook via SMTP.
pub struct EmailSender {
    config: EmailConfig,
}

impl EmailSender {
    /// Create a new email sender with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Destination address from the active configuration.
    pub fn to_address(&self) -> Option<&str> {
        self.config.to_address.as_deref()
    }

    /// Send an alert email with the given body to the configured address.
    ///
    /// Opens one SMTP session over implicit TLS, authenticates when both
    /// username and password are set, sends, and closes. The session is
    /// torn down even on failure; `lettre` releases the connection when
    /// the transport is dropped.
    pub async fn send(&self, to_email: &str, body: &str) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(ALERT_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)?
                .port(self.config.smtp_port)
                .timeout(Some(SMTP_TIMEOUT));

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(to = to_email, "Alert email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_error_display_build() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }

    #[test]
    fn email_error_display_address() {
        let addr_err: Result<lettre::Address, _> = "not-an-email".parse();
        let err = EmailError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("Email address parse error"));
    }

    #[tokio::test]
    async fn send_to_unparseable_address_fails_before_any_io() {
        let sender = EmailSender::new(EmailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 465,
            from_address: "alerts@example.com".to_string(),
            smtp_user: None,
            smtp_password: None,
            to_address: Some("not-an-email".to_string()),
        });

        let err = sender.send("not-an-email", "body").await.unwrap_err();
        assert!(matches!(err, EmailError::Address(_)));
    }
}

//! Outbound notification channels for trading alerts.
//!
//! This crate fans one [`InboundPayload`](tradewatch_core::InboundPayload)
//! out to two independent channels:
//!
//! - [`SmsSender`] — one HTTP POST to the Termii bulk SMS gateway.
//! - [`EmailSender`] — one SMTP-over-TLS session via `lettre`.
//! - [`Notifier`] — renders the payload once and dispatches both channels,
//!   converting per-channel failures into descriptive result strings.

pub mod email;
pub mod notifier;
pub mod sms;

pub use email::{EmailConfig, EmailError, EmailSender};
pub use notifier::{NotificationOutcome, Notifier};
pub use sms::{SmsConfig, SmsError, SmsSender};

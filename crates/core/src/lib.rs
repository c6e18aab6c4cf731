//! Tradewatch domain types.
//!
//! This crate holds the payload model shared by the HTTP layer and the
//! notification channels:
//!
//! - [`InboundPayload`] — one received webhook body, JSON or plain text.
//! - [`NotificationMessage`] — the two derived wire bodies (email, SMS).

pub mod payload;

pub use payload::{InboundPayload, NotificationMessage};

//! Collaborators outside the process: checkout, report delivery and the
//! support assistant.
//!
//! Each concern is a trait with one offline adapter and, where the product
//! talks to a real service, one HTTP adapter. Calls are one-shot: failures are
//! returned as [`ServiceError`](crate::errors::ServiceError) and never retried.

pub mod chat;
pub mod mailer;
pub mod payment;

pub use chat::{ChatMessage, ChatRole, GatewayChat, SupportChat};
pub use mailer::{compose_report_email, OutboxMailer, ReportEmail, ReportMailer, ResendMailer};
pub use payment::{validate_email, CheckoutGateway, CheckoutRequest, CheckoutSession, DemoCheckout};

use crate::errors::ServiceError;
use std::time::Duration;

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client, ServiceError> {
    Ok(reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("statematch/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

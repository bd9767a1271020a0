//! Email-confirmation notification stub.
//!
//! Mints the confirmation token and records the would-be delivery in the
//! log. Wiring up an actual mail transport is an operational concern that
//! lives outside this service.

use std::sync::Arc;

use tracing::info;

use authhub_auth::token::TokenCodec;
use authhub_core::error::AppError;

/// Sends account-lifecycle notifications.
#[derive(Debug, Clone)]
pub struct Notifier {
    /// Token codec for confirmation tokens.
    codec: Arc<TokenCodec>,
}

impl Notifier {
    /// Creates a new notifier.
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    /// Issues an email-confirmation token for the given user and logs the
    /// confirmation link. Returns the token.
    pub fn send_email_confirmation(&self, user_id: i64, email: &str) -> Result<String, AppError> {
        let token = self.codec.create_email_confirmation_token(user_id)?;
        info!(user_id, email, "Email confirmation issued: /confirm-email?token={token}");
        Ok(token)
    }
}

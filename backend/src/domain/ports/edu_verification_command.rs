//! Driving port for confirming a student email by code.

use async_trait::async_trait;

use crate::domain::{Error, UserId};

/// Checks emailed verification codes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EduVerificationCommand: Send + Sync {
    /// Consume `code` for `user_id` and flag the profile as verified.
    ///
    /// Unknown, used and expired codes all fail with the same
    /// `invalid_request` error.
    async fn verify_code(&self, user_id: &UserId, code: &str) -> Result<(), Error>;
}

//! Driving port for the sign-in redirect and the `.edu` confirmation link.

use async_trait::async_trait;

use crate::domain::auth_callback::{EduConfirmation, EduConfirmationError, SignInOutcome};
use crate::domain::UserId;

/// Completes provider sign-ins and confirmation links.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignInCommand: Send + Sync {
    /// Exchange the provider's code and decide where the student lands.
    ///
    /// Never fails: every failure becomes [`SignInOutcome::failed`].
    async fn complete_sign_in(&self, code: Option<String>) -> SignInOutcome;

    /// Mark the account named in the confirmation link as verified.
    ///
    /// Returns the user the active session belongs to.
    async fn confirm_edu(&self, request: EduConfirmation) -> Result<UserId, EduConfirmationError>;
}

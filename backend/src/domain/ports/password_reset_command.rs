//! Driving port for replacing the signed-in user's password.

use async_trait::async_trait;

use crate::domain::credentials::NewPassword;
use crate::domain::{Error, UserId};

/// Changes a signed-in student's password.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordResetCommand: Send + Sync {
    async fn reset(&self, user_id: &UserId, password: &NewPassword) -> Result<(), Error>;
}

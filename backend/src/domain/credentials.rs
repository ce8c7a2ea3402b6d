//! Password reset validation and the reset use-case.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use zeroize::Zeroizing;

use super::Error;
use super::ports::{IdentityProvider, IdentityProviderError, PasswordResetCommand};
use super::user::UserId;

/// Shortest password the identity provider accepts.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Reasons a password reset form is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PasswordValidationError {
    /// The confirmation differs from the password.
    #[error("Passwords do not match")]
    Mismatch,
    /// Fewer than [`PASSWORD_MIN_LENGTH`] characters.
    #[error("Password must be at least 6 characters")]
    TooShort,
}

/// A confirmed replacement password. Zeroed on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct NewPassword(Zeroizing<String>);

impl NewPassword {
    /// Check the confirmation first, then the length.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::credentials::{NewPassword, PasswordValidationError};
    ///
    /// assert!(NewPassword::confirm("hunter22", "hunter22").is_ok());
    /// assert_eq!(
    ///     NewPassword::confirm("abc", "abd").err(),
    ///     Some(PasswordValidationError::Mismatch)
    /// );
    /// ```
    pub fn confirm(password: &str, confirmation: &str) -> Result<Self, PasswordValidationError> {
        if password != confirmation {
            return Err(PasswordValidationError::Mismatch);
        }
        if password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(PasswordValidationError::TooShort);
        }
        Ok(Self(Zeroizing::new(password.to_owned())))
    }

    /// Plaintext for handing to the identity provider.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("NewPassword(******)")
    }
}

/// Maps provider failures to domain errors for every use-case that talks to
/// the identity provider.
pub(crate) fn map_identity_error(error: IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::Rejected { message } => Error::invalid_request(message),
        IdentityProviderError::Unavailable { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
        IdentityProviderError::Protocol { message } => {
            Error::internal(format!("identity provider protocol error: {message}"))
        }
    }
}

/// Validates a reset form and forwards it to the identity provider.
#[derive(Clone)]
pub struct PasswordResetService<P: ?Sized> {
    identity: Arc<P>,
}

impl<P: ?Sized> PasswordResetService<P> {
    pub fn new(identity: Arc<P>) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl<P> PasswordResetCommand for PasswordResetService<P>
where
    P: IdentityProvider + ?Sized,
{
    async fn reset(&self, user_id: &UserId, password: &NewPassword) -> Result<(), Error> {
        self.identity
            .update_password(user_id, password)
            .await
            .map_err(map_identity_error)?;
        info!(user_id = %user_id, "password updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockIdentityProvider;
    use rstest::rstest;

    #[rstest]
    #[case("secret1", "secret2", PasswordValidationError::Mismatch)]
    #[case("abc", "abd", PasswordValidationError::Mismatch)]
    #[case("abc", "abc", PasswordValidationError::TooShort)]
    #[case("", "", PasswordValidationError::TooShort)]
    fn rejects_bad_passwords(
        #[case] password: &str,
        #[case] confirmation: &str,
        #[case] expected: PasswordValidationError,
    ) {
        assert_eq!(NewPassword::confirm(password, confirmation).err(), Some(expected));
    }

    #[rstest]
    fn six_characters_is_enough() {
        let password = NewPassword::confirm("abcdef", "abcdef").expect("long enough");
        assert_eq!(password.expose(), "abcdef");
        assert_eq!(format!("{password:?}"), "NewPassword(******)");
    }

    #[rstest]
    #[tokio::test]
    async fn provider_rejection_surfaces_its_message() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_update_password()
            .times(1)
            .return_once(|_, _| Err(IdentityProviderError::rejected("New password should be different")));
        let service = PasswordResetService::new(Arc::new(identity));
        let password = NewPassword::confirm("abcdef", "abcdef").expect("valid");

        let err = service
            .reset(&UserId::random(), &password)
            .await
            .expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "New password should be different");
    }

    #[rstest]
    #[tokio::test]
    async fn outage_maps_to_service_unavailable() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_update_password()
            .return_once(|_, _| Err(IdentityProviderError::unavailable("timeout")));
        let service = PasswordResetService::new(Arc::new(identity));
        let password = NewPassword::confirm("abcdef", "abcdef").expect("valid");

        let err = service
            .reset(&UserId::random(), &password)
            .await
            .expect_err("outage");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}

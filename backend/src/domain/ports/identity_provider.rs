//! Port for the hosted identity provider.
//!
//! Only three calls are needed: exchanging an OAuth code for a session,
//! sending the one-time `.edu` verification email, and replacing a password.

use async_trait::async_trait;

use crate::domain::UserId;
use crate::domain::credentials::NewPassword;
use crate::domain::onboarding::EduEmail;
use crate::domain::verification::VerificationCode;

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// The provider understood the request and refused it.
        Rejected { message: String } => "{message}",
        /// The provider could not be reached or answered with a 5xx.
        Unavailable { message: String } => "identity provider unavailable: {message}",
        /// The provider answered with something we could not interpret.
        Protocol { message: String } => "identity provider protocol error: {message}",
    }
}

/// The account behind an exchanged sign-in code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
    /// `full_name` from the provider's user metadata, if any.
    pub full_name: Option<String>,
}

/// A one-time sign-in email to a student address.
///
/// The link lands on `redirect_to`, which carries the id of the account that
/// requested verification. The code is included for students who would
/// rather type it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EduVerificationEmail {
    pub email: EduEmail,
    pub redirect_to: String,
    pub code: VerificationCode,
}

/// The hosted identity service: sign-in exchange, verification email and password changes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Swap an OAuth or magic-link code for the signed-in account.
    async fn exchange_code(&self, code: &str) -> Result<AuthenticatedUser, IdentityProviderError>;

    /// Send the verification email without creating a new account.
    async fn send_edu_verification(
        &self,
        request: &EduVerificationEmail,
    ) -> Result<(), IdentityProviderError>;

    async fn update_password(
        &self,
        user_id: &UserId,
        password: &NewPassword,
    ) -> Result<(), IdentityProviderError>;
}

/// Code accepted by [`FixtureIdentityProvider::exchange_code`].
pub const FIXTURE_AUTH_CODE: &str = "fixture-code";
/// Account returned for [`FIXTURE_AUTH_CODE`].
pub const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// In-process provider used when no provider URL is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn exchange_code(&self, code: &str) -> Result<AuthenticatedUser, IdentityProviderError> {
        if code != FIXTURE_AUTH_CODE {
            return Err(IdentityProviderError::rejected("invalid authorisation code"));
        }
        let id = UserId::new(FIXTURE_USER_ID)
            .map_err(|err| IdentityProviderError::protocol(format!("fixture user id: {err}")))?;
        Ok(AuthenticatedUser {
            id,
            email: "ada@uic.edu".to_owned(),
            full_name: Some("Ada Lovelace".to_owned()),
        })
    }

    async fn send_edu_verification(
        &self,
        _request: &EduVerificationEmail,
    ) -> Result<(), IdentityProviderError> {
        Ok(())
    }

    async fn update_password(
        &self,
        _user_id: &UserId,
        _password: &NewPassword,
    ) -> Result<(), IdentityProviderError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_accepts_only_its_code() {
        let provider = FixtureIdentityProvider;
        let user = provider
            .exchange_code(FIXTURE_AUTH_CODE)
            .await
            .expect("fixture code");
        assert_eq!(user.id.as_ref(), FIXTURE_USER_ID);

        let err = provider.exchange_code("other").await.expect_err("rejected");
        assert!(matches!(err, IdentityProviderError::Rejected { .. }));
    }
}

//! Sign-in completion and the `.edu` confirmation link.
//!
//! Both flows end in a redirect or a terminal message; neither retries.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::ports::{IdentityProvider, SignInCommand, UserProfileRepository};
use super::user::{DisplayName, UserId, UserProfile, Username};

/// Where a browser goes after the sign-in callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostLoginRedirect {
    /// New or unverified students finish onboarding first.
    Onboarding,
    Map,
    /// Missing code, failed exchange or failed profile setup.
    AuthError,
}

impl PostLoginRedirect {
    /// Path relative to the public origin.
    pub fn path(self) -> &'static str {
        match self {
            Self::Onboarding => "/onboarding",
            Self::Map => "/map",
            Self::AuthError => "/?error=auth",
        }
    }
}

/// Result of [`SignInCommand::complete_sign_in`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInOutcome {
    /// Set when the session should remember this user.
    pub user_id: Option<UserId>,
    pub redirect: PostLoginRedirect,
}

impl SignInOutcome {
    /// Outcome for a callback that could not sign the user in.
    pub fn failed() -> Self {
        Self {
            user_id: None,
            redirect: PostLoginRedirect::AuthError,
        }
    }

    fn signed_in(user_id: UserId, redirect: PostLoginRedirect) -> Self {
        Self {
            user_id: Some(user_id),
            redirect,
        }
    }
}

/// Inputs of the confirmation link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EduConfirmation {
    /// User already remembered by the session cookie.
    pub session_user: Option<UserId>,
    /// Magic-link code appended by the identity provider. When present it
    /// establishes the session, which may belong to the `.edu` identity.
    pub code: Option<String>,
    /// Id of the account that asked for verification.
    pub uid: Option<String>,
}

/// Terminal failures of the confirmation link. Messages are shown verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EduConfirmationError {
    #[error("Verification link is invalid or expired. Please try again.")]
    NoSession,
    #[error("Could not identify your account. Please try verifying again.")]
    MissingUid,
    #[error("Something went wrong. Please try again.")]
    Failed,
}

/// Completes provider sign-ins and `.edu` confirmation links.
#[derive(Clone)]
pub struct SignInService<U, P: ?Sized> {
    profiles: Arc<U>,
    identity: Arc<P>,
}

impl<U, P: ?Sized> SignInService<U, P> {
    pub fn new(profiles: Arc<U>, identity: Arc<P>) -> Self {
        Self { profiles, identity }
    }
}

impl<U, P> SignInService<U, P>
where
    U: UserProfileRepository,
    P: IdentityProvider + ?Sized,
{
    async fn session_user(
        &self,
        request: &EduConfirmation,
    ) -> Result<UserId, EduConfirmationError> {
        match request.code.as_deref().filter(|code| !code.is_empty()) {
            Some(code) => match self.identity.exchange_code(code).await {
                Ok(user) => Ok(user.id),
                Err(error) => {
                    warn!(%error, "confirmation link exchange failed");
                    Err(EduConfirmationError::NoSession)
                }
            },
            None => request
                .session_user
                .clone()
                .ok_or(EduConfirmationError::NoSession),
        }
    }
}

#[async_trait]
impl<U, P> SignInCommand for SignInService<U, P>
where
    U: UserProfileRepository,
    P: IdentityProvider + ?Sized,
{
    async fn complete_sign_in(&self, code: Option<String>) -> SignInOutcome {
        let Some(code) = code.filter(|code| !code.is_empty()) else {
            return SignInOutcome::failed();
        };
        let user = match self.identity.exchange_code(&code).await {
            Ok(user) => user,
            Err(error) => {
                warn!(%error, "sign-in code exchange failed");
                return SignInOutcome::failed();
            }
        };

        match self.profiles.find_by_id(&user.id).await {
            Ok(Some(profile)) if profile.edu_verified() => {
                SignInOutcome::signed_in(user.id, PostLoginRedirect::Map)
            }
            Ok(Some(_)) => SignInOutcome::signed_in(user.id, PostLoginRedirect::Onboarding),
            Ok(None) => {
                let display_name = user
                    .full_name
                    .as_deref()
                    .and_then(|name| DisplayName::new(name).ok());
                let profile = UserProfile::new(
                    user.id.clone(),
                    display_name,
                    Username::from_email(&user.email),
                );
                if let Err(error) = self.profiles.create(&profile).await {
                    warn!(%error, user_id = %user.id, "profile creation failed");
                    return SignInOutcome::failed();
                }
                info!(user_id = %user.id, username = profile.username().as_ref(), "profile created");
                SignInOutcome::signed_in(user.id, PostLoginRedirect::Onboarding)
            }
            Err(error) => {
                warn!(%error, user_id = %user.id, "profile lookup failed");
                SignInOutcome::failed()
            }
        }
    }

    async fn confirm_edu(&self, request: EduConfirmation) -> Result<UserId, EduConfirmationError> {
        let session_user = self.session_user(&request).await?;
        let uid = request
            .uid
            .as_deref()
            .filter(|uid| !uid.is_empty())
            .ok_or(EduConfirmationError::MissingUid)?;
        let uid = UserId::new(uid).map_err(|_| EduConfirmationError::MissingUid)?;

        match self.profiles.mark_edu_verified(&uid).await {
            Ok(true) => {
                info!(user_id = %uid, "student email confirmed by link");
                Ok(session_user)
            }
            Ok(false) => Err(EduConfirmationError::MissingUid),
            Err(error) => {
                warn!(%error, user_id = %uid, "marking profile verified failed");
                Err(EduConfirmationError::Failed)
            }
        }
    }
}

#[cfg(test)]
#[path = "auth_callback_tests.rs"]
mod tests;

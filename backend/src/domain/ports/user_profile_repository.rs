//! Port for student profile persistence.

use async_trait::async_trait;

use crate::domain::{OnboardingSelections, UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum UserProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "profile repository query failed: {message}",
    }
}

/// Storage for [`UserProfile`] rows keyed by the identity provider's user id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// Fetch a profile. `None` means the user has never completed sign-in.
    async fn find_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<UserProfile>, UserProfileRepositoryError>;

    /// Insert a new profile. Inserting an existing id is a no-op.
    async fn create(&self, profile: &UserProfile) -> Result<(), UserProfileRepositoryError>;

    /// Replace the stored onboarding selections.
    async fn save_selections(
        &self,
        id: &UserId,
        selections: &OnboardingSelections,
    ) -> Result<(), UserProfileRepositoryError>;

    /// Set `edu_verified`. Returns `false` when no profile matched `id`.
    async fn mark_edu_verified(&self, id: &UserId) -> Result<bool, UserProfileRepositoryError>;
}

/// Fixture repository: nobody exists yet and every write succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserProfileRepository;

#[async_trait]
impl UserProfileRepository for FixtureUserProfileRepository {
    async fn find_by_id(
        &self,
        _id: &UserId,
    ) -> Result<Option<UserProfile>, UserProfileRepositoryError> {
        Ok(None)
    }

    async fn create(&self, _profile: &UserProfile) -> Result<(), UserProfileRepositoryError> {
        Ok(())
    }

    async fn save_selections(
        &self,
        _id: &UserId,
        _selections: &OnboardingSelections,
    ) -> Result<(), UserProfileRepositoryError> {
        Ok(())
    }

    async fn mark_edu_verified(&self, _id: &UserId) -> Result<bool, UserProfileRepositoryError> {
        Ok(true)
    }
}

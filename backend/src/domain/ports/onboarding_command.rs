//! Driving port for onboarding wizard transitions.

use async_trait::async_trait;

use crate::domain::onboarding::{OnboardingAction, OnboardingState};
use crate::domain::onboarding_service::OnboardingReply;
use crate::domain::{Error, UserId};

/// Drives the onboarding wizard for a signed-in student.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OnboardingCommand: Send + Sync {
    /// Apply one action to the caller's wizard state and carry out its
    /// side effects.
    async fn apply(
        &self,
        user_id: &UserId,
        state: OnboardingState,
        action: OnboardingAction,
    ) -> Result<OnboardingReply, Error>;
}

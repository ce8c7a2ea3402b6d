//! Carries out the side effects of onboarding transitions.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use tracing::info;
use url::Url;
use utoipa::ToSchema;

use super::campus::CampusDirectory;
use super::credentials::map_identity_error;
use super::onboarding::{OnboardingAction, OnboardingEffect, OnboardingError, OnboardingState};
use super::ports::{
    EduVerificationEmail, EduVerificationRepository, IdentityProvider, OnboardingCommand,
    UserProfileRepository, UserProfileRepositoryError,
};
use super::user::{OnboardingSelections, UserId};
use super::verification::EduVerificationService;
use super::{Error, ErrorCode};

/// Where the wizard hands over once the student leaves it.
pub const ONBOARDING_EXIT_PATH: &str = "/map";
const EDU_CONFIRM_PATH: &str = "/auth/edu-confirm";

/// State after a transition, plus the exit path when the wizard is done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingReply {
    pub state: OnboardingState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl OnboardingReply {
    fn stay(state: OnboardingState) -> Self {
        Self {
            state,
            redirect: None,
        }
    }

    fn exit() -> Self {
        Self {
            state: OnboardingState::default(),
            redirect: Some(ONBOARDING_EXIT_PATH.to_owned()),
        }
    }
}

fn map_transition_error(error: OnboardingError) -> Error {
    let code = match error {
        OnboardingError::UnknownCampus(_)
        | OnboardingError::UnknownCategory(_)
        | OnboardingError::NotEduEmail => ErrorCode::InvalidRequest,
        OnboardingError::NoPreviousStep(_)
        | OnboardingError::NoNextStep(_)
        | OnboardingError::WrongStep { .. }
        | OnboardingError::VerificationPending
        | OnboardingError::VerificationNotRequested => ErrorCode::Conflict,
    };
    Error::new(code, error.to_string()).with_details(json!({ "reason": error.code() }))
}

fn map_profile_error(error: UserProfileRepositoryError) -> Error {
    match error {
        UserProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("profile store unavailable: {message}"))
        }
        UserProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile store error: {message}"))
        }
    }
}

/// Applies wizard actions and carries out their effects.
#[derive(Clone)]
pub struct OnboardingService<U, V, P: ?Sized> {
    profiles: Arc<U>,
    verification: EduVerificationService<V>,
    identity: Arc<P>,
    campuses: &'static CampusDirectory,
    public_origin: Url,
}

impl<U, V, P: ?Sized> OnboardingService<U, V, P> {
    pub fn new(
        profiles: Arc<U>,
        verification: EduVerificationService<V>,
        identity: Arc<P>,
        campuses: &'static CampusDirectory,
        public_origin: Url,
    ) -> Self {
        Self {
            profiles,
            verification,
            identity,
            campuses,
            public_origin,
        }
    }

    /// Confirmation link target carrying the requesting account's id.
    fn confirmation_link(&self, user_id: &UserId) -> Result<String, Error> {
        let mut link = self
            .public_origin
            .join(EDU_CONFIRM_PATH)
            .map_err(|err| Error::internal(format!("invalid public origin: {err}")))?;
        link.query_pairs_mut().append_pair("uid", user_id.as_ref());
        Ok(link.into())
    }
}

impl<U, V, P: ?Sized> OnboardingService<U, V, P>
where
    U: UserProfileRepository,
{
    async fn persist(&self, user_id: &UserId, selections: &OnboardingSelections) -> Result<(), Error> {
        self.profiles
            .save_selections(user_id, selections)
            .await
            .map_err(map_profile_error)
    }
}

#[async_trait]
impl<U, V, P> OnboardingCommand for OnboardingService<U, V, P>
where
    U: UserProfileRepository,
    V: EduVerificationRepository,
    P: IdentityProvider + ?Sized,
{
    async fn apply(
        &self,
        user_id: &UserId,
        state: OnboardingState,
        action: OnboardingAction,
    ) -> Result<OnboardingReply, Error> {
        let mut state = state;
        let effect = state
            .apply(action, self.campuses)
            .map_err(map_transition_error)?;

        match effect {
            OnboardingEffect::None => Ok(OnboardingReply::stay(state)),
            OnboardingEffect::DispatchVerification(email) => {
                let issued = self.verification.issue(user_id).await?;
                let request = EduVerificationEmail {
                    email,
                    redirect_to: self.confirmation_link(user_id)?,
                    code: issued.code,
                };
                self.identity
                    .send_edu_verification(&request)
                    .await
                    .map_err(map_identity_error)?;
                state.verification_sent();
                info!(user_id = %user_id, "verification email dispatched");
                Ok(OnboardingReply::stay(state))
            }
            OnboardingEffect::PersistAndExit(selections) => {
                self.persist(user_id, &selections).await?;
                info!(user_id = %user_id, "onboarding skipped");
                Ok(OnboardingReply::exit())
            }
            OnboardingEffect::FinishIfVerified(selections) => {
                let profile = self
                    .profiles
                    .find_by_id(user_id)
                    .await
                    .map_err(map_profile_error)?
                    .ok_or_else(|| Error::not_found("profile not found"))?;
                if !profile.edu_verified() {
                    return Err(Error::conflict(
                        "Verify your student email before finishing",
                    ));
                }
                self.persist(user_id, &selections).await?;
                info!(user_id = %user_id, "onboarding finished");
                Ok(OnboardingReply::exit())
            }
        }
    }
}

#[cfg(test)]
#[path = "onboarding_service_tests.rs"]
mod tests;

//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`IdentityProvider`]) describe what the
//! domain needs from storage and the hosted auth service. Driving ports
//! (`*Command`, `*Query`) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod discovery_query;
mod edu_verification_command;
mod edu_verification_repository;
mod identity_provider;
mod onboarding_command;
mod password_reset_command;
mod place_repository;
mod sign_in_command;
mod user_profile_repository;
mod waitlist_command;
mod waitlist_repository;

#[cfg(test)]
pub use discovery_query::MockDiscoveryQuery;
pub use discovery_query::DiscoveryQuery;
#[cfg(test)]
pub use edu_verification_command::MockEduVerificationCommand;
pub use edu_verification_command::EduVerificationCommand;
#[cfg(test)]
pub use edu_verification_repository::MockEduVerificationRepository;
pub use edu_verification_repository::{
    EduVerificationRepository, EduVerificationRepositoryError, FixtureEduVerificationRepository,
    PendingVerification,
};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{
    AuthenticatedUser, EduVerificationEmail, FIXTURE_AUTH_CODE, FIXTURE_USER_ID,
    FixtureIdentityProvider, IdentityProvider, IdentityProviderError,
};
#[cfg(test)]
pub use onboarding_command::MockOnboardingCommand;
pub use onboarding_command::OnboardingCommand;
#[cfg(test)]
pub use password_reset_command::MockPasswordResetCommand;
pub use password_reset_command::PasswordResetCommand;
#[cfg(test)]
pub use place_repository::MockPlaceRepository;
pub use place_repository::{FixturePlaceRepository, PlaceRepository, PlaceRepositoryError};
#[cfg(test)]
pub use sign_in_command::MockSignInCommand;
pub use sign_in_command::SignInCommand;
#[cfg(test)]
pub use user_profile_repository::MockUserProfileRepository;
pub use user_profile_repository::{
    FixtureUserProfileRepository, UserProfileRepository, UserProfileRepositoryError,
};
#[cfg(test)]
pub use waitlist_command::MockWaitlistCommand;
pub use waitlist_command::WaitlistCommand;
#[cfg(test)]
pub use waitlist_repository::MockWaitlistRepository;
pub use waitlist_repository::{
    FixtureWaitlistRepository, WaitlistRepository, WaitlistRepositoryError,
};

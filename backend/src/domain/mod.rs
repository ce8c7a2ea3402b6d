//! Domain primitives, state machines and use-case services.
//!
//! Purpose: model student discount discovery independently of HTTP and
//! storage. Reference data (campuses, places) is immutable once loaded;
//! per-user state (onboarding) is passed in and handed back.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - UserId / UserProfile: student identity and stored profile.
//! - search: unified search ranking and the dropdown controller.
//! - onboarding: the three-step wizard.
//! - ports: driven and driving port traits.

pub mod auth_callback;
pub mod campus;
pub mod credentials;
pub mod discovery;
pub mod error;
pub mod geo;
pub mod onboarding;
pub mod onboarding_service;
pub mod place;
pub mod ports;
pub mod search;
pub mod trace_id;
pub mod user;
pub mod verification;
pub mod waitlist;

#[cfg(test)]
pub(crate) mod fixture_clock;

pub use self::auth_callback::{
    EduConfirmation, EduConfirmationError, PostLoginRedirect, SignInOutcome, SignInService,
};
pub use self::campus::{Campus, CampusDirectory, CampusId};
pub use self::credentials::{NewPassword, PasswordResetService, PasswordValidationError};
pub use self::discovery::{
    CampusMatch, CampusPickerResponse, DiscoverRequest, DiscoverResponse, DiscoveryService,
    SearchHit, SearchRequest, SearchResponse,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::geo::{GeoPoint, GeoPointError};
pub use self::onboarding::{OnboardingAction, OnboardingState, OnboardingStep};
pub use self::onboarding_service::{OnboardingReply, OnboardingService};
pub use self::place::{Place, PlaceId};
pub use self::trace_id::TraceId;
pub use self::user::{
    DisplayName, OnboardingSelections, UserId, UserProfile, UserValidationError, Username,
};
pub use self::verification::EduVerificationService;
pub use self::waitlist::{WaitlistEntry, WaitlistService, WaitlistValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

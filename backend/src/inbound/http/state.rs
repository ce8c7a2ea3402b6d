//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    DiscoveryQuery, EduVerificationCommand, OnboardingCommand, PasswordResetCommand,
    SignInCommand, WaitlistCommand,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub discovery: Arc<dyn DiscoveryQuery>,
    pub sign_in: Arc<dyn SignInCommand>,
    pub onboarding: Arc<dyn OnboardingCommand>,
    pub edu_verification: Arc<dyn EduVerificationCommand>,
    pub waitlist: Arc<dyn WaitlistCommand>,
    pub password_reset: Arc<dyn PasswordResetCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub discovery: Arc<dyn DiscoveryQuery>,
    pub sign_in: Arc<dyn SignInCommand>,
    pub onboarding: Arc<dyn OnboardingCommand>,
    pub edu_verification: Arc<dyn EduVerificationCommand>,
    pub waitlist: Arc<dyn WaitlistCommand>,
    pub password_reset: Arc<dyn PasswordResetCommand>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{
    ///     FixtureEduVerificationRepository, FixtureIdentityProvider, FixturePlaceRepository,
    ///     FixtureUserProfileRepository, FixtureWaitlistRepository,
    /// };
    /// use backend::domain::{
    ///     CampusDirectory, DiscoveryService, EduVerificationService, OnboardingService,
    ///     PasswordResetService, SignInService, WaitlistService,
    /// };
    /// use backend::domain::verification::DEFAULT_CODE_TTL;
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use mockable::DefaultClock;
    ///
    /// let profiles = Arc::new(FixtureUserProfileRepository);
    /// let identity = Arc::new(FixtureIdentityProvider);
    /// let verification = EduVerificationService::new(
    ///     Arc::new(FixtureEduVerificationRepository),
    ///     Arc::new(DefaultClock),
    ///     DEFAULT_CODE_TTL,
    /// );
    /// let ports = HttpStatePorts {
    ///     discovery: Arc::new(DiscoveryService::new(
    ///         Arc::new(FixturePlaceRepository),
    ///         CampusDirectory::chicago(),
    ///     )),
    ///     sign_in: Arc::new(SignInService::new(profiles.clone(), identity.clone())),
    ///     onboarding: Arc::new(OnboardingService::new(
    ///         profiles,
    ///         verification.clone(),
    ///         identity.clone(),
    ///         CampusDirectory::chicago(),
    ///         "http://localhost:8080".parse().expect("origin"),
    ///     )),
    ///     edu_verification: Arc::new(verification),
    ///     waitlist: Arc::new(WaitlistService::new(Arc::new(FixtureWaitlistRepository))),
    ///     password_reset: Arc::new(PasswordResetService::new(identity)),
    /// };
    /// let state = HttpState::new(ports);
    /// let _discovery = state.discovery.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            discovery,
            sign_in,
            onboarding,
            edu_verification,
            waitlist,
            password_reset,
        } = ports;
        Self {
            discovery,
            sign_in,
            onboarding,
            edu_verification,
            waitlist,
            password_reset,
        }
    }
}

//! Assemble [`HttpState`] from configured adapters.
//!
//! Each driven port gets a Diesel adapter when a pool is configured and the
//! matching fixture otherwise; the identity provider is chosen independently.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;
use url::Url;

use backend::domain::ports::{
    EduVerificationRepository, FixtureEduVerificationRepository, FixtureIdentityProvider,
    FixturePlaceRepository, FixtureUserProfileRepository, FixtureWaitlistRepository,
    IdentityProvider, PlaceRepository, UserProfileRepository, WaitlistRepository,
};
use backend::domain::{
    CampusDirectory, DiscoveryService, EduVerificationService, OnboardingService,
    PasswordResetService, SignInService, WaitlistService,
};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::identity::HttpIdentityProvider;
use backend::outbound::persistence::{
    DieselEduVerificationRepository, DieselPlaceRepository, DieselUserProfileRepository,
    DieselWaitlistRepository,
};

use super::ServerConfig;

/// Driven adapters shared by the use-case services.
struct Adapters<U, V, W, R> {
    profiles: Arc<U>,
    verifications: Arc<V>,
    waitlist: Arc<W>,
    places: Arc<R>,
}

/// Settings the services need besides adapters.
struct ServiceSettings {
    identity: Arc<dyn IdentityProvider>,
    clock: Arc<dyn Clock>,
    code_ttl: chrono::Duration,
    public_origin: Url,
}

fn wire_services<U, V, W, R>(adapters: Adapters<U, V, W, R>, settings: ServiceSettings) -> HttpStatePorts
where
    U: UserProfileRepository + 'static,
    V: EduVerificationRepository + 'static,
    W: WaitlistRepository + 'static,
    R: PlaceRepository + 'static,
{
    let Adapters {
        profiles,
        verifications,
        waitlist,
        places,
    } = adapters;
    let ServiceSettings {
        identity,
        clock,
        code_ttl,
        public_origin,
    } = settings;
    let campuses = CampusDirectory::chicago();
    let verification = EduVerificationService::new(verifications, clock, code_ttl);

    HttpStatePorts {
        discovery: Arc::new(DiscoveryService::new(places, campuses)),
        sign_in: Arc::new(SignInService::new(profiles.clone(), identity.clone())),
        onboarding: Arc::new(OnboardingService::new(
            profiles,
            verification.clone(),
            identity.clone(),
            campuses,
            public_origin,
        )),
        edu_verification: Arc::new(verification),
        waitlist: Arc::new(WaitlistService::new(waitlist)),
        password_reset: Arc::new(PasswordResetService::new(identity)),
    }
}

fn build_identity(config: &ServerConfig) -> std::io::Result<Arc<dyn IdentityProvider>> {
    match &config.identity {
        Some(identity) => {
            let provider = HttpIdentityProvider::new(
                identity.base_url.clone(),
                identity.api_key.clone(),
                identity.timeout,
            )
            .map_err(|e| std::io::Error::other(format!("identity client setup failed: {e}")))?;
            info!(base_url = %identity.base_url, "using HTTP identity provider");
            Ok(Arc::new(provider))
        }
        None => {
            info!("no identity provider configured; using fixture sign-in");
            Ok(Arc::new(FixtureIdentityProvider))
        }
    }
}

/// Build the shared handler state.
///
/// # Errors
/// Returns [`std::io::Error`] when the identity HTTP client cannot be built.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let settings = ServiceSettings {
        identity: build_identity(config)?,
        clock: Arc::new(DefaultClock),
        code_ttl: config.code_ttl,
        public_origin: config.public_origin.clone(),
    };

    let ports = match &config.db_pool {
        Some(pool) => wire_services(
            Adapters {
                profiles: Arc::new(DieselUserProfileRepository::new(pool.clone())),
                verifications: Arc::new(DieselEduVerificationRepository::new(pool.clone())),
                waitlist: Arc::new(DieselWaitlistRepository::new(pool.clone())),
                places: Arc::new(DieselPlaceRepository::new(pool.clone())),
            },
            settings,
        ),
        None => {
            info!("no database configured; using fixture repositories");
            wire_services(
                Adapters {
                    profiles: Arc::new(FixtureUserProfileRepository),
                    verifications: Arc::new(FixtureEduVerificationRepository),
                    waitlist: Arc::new(FixtureWaitlistRepository),
                    places: Arc::new(FixturePlaceRepository),
                },
                settings,
            )
        }
    };

    Ok(web::Data::new(HttpState::new(ports)))
}

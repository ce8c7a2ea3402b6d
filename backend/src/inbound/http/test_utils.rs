//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, HttpResponse, test as actix_test, web};
use actix_http::Request;

use crate::domain::ports::{
    FixturePlaceRepository, MockDiscoveryQuery, MockEduVerificationCommand,
    MockOnboardingCommand, MockPasswordResetCommand, MockSignInCommand, MockWaitlistCommand,
};
use crate::domain::{CampusDirectory, DiscoveryService, Error, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Ports backed by strict mocks. Any unexpected call panics, so each test
/// replaces only the port it exercises.
pub fn mock_ports() -> HttpStatePorts {
    HttpStatePorts {
        discovery: Arc::new(MockDiscoveryQuery::new()),
        sign_in: Arc::new(MockSignInCommand::new()),
        onboarding: Arc::new(MockOnboardingCommand::new()),
        edu_verification: Arc::new(MockEduVerificationCommand::new()),
        waitlist: Arc::new(MockWaitlistCommand::new()),
        password_reset: Arc::new(MockPasswordResetCommand::new()),
    }
}

/// Mock ports, except discovery which runs the real service over the
/// sample catalogue.
pub fn sample_catalogue_ports() -> HttpStatePorts {
    HttpStatePorts {
        discovery: Arc::new(DiscoveryService::new(
            Arc::new(FixturePlaceRepository),
            CampusDirectory::chicago(),
        )),
        ..mock_ports()
    }
}

/// Path of the helper route installed by [`test_app`] that signs a user in.
pub const SIGN_IN_AS_PATH: &str = "/__test/sign-in-as";

async fn sign_in_as(session: SessionContext, user: web::Path<String>) -> Result<HttpResponse, Error> {
    let user_id = UserId::new(user.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Every route under its production prefix, wrapped in a test session.
pub fn test_app(
    ports: HttpStatePorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(ports)))
        .app_data(super::error::json_config())
        .app_data(super::error::query_config())
        .wrap(test_session_middleware())
        .service(web::scope("/api/v1").configure(super::configure_api))
        .configure(super::configure_auth)
        .route(
            &format!("{SIGN_IN_AS_PATH}/{{user}}"),
            web::post().to(sign_in_as),
        )
}

/// Session cookie for `user_id`, obtained through the helper route.
pub async fn session_cookie_for<S>(app: &S, user_id: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri(&format!("{SIGN_IN_AS_PATH}/{user_id}"))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "test sign-in failed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Latest session cookie set on `response`, if any.
pub fn updated_cookie(response: &ServiceResponse) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

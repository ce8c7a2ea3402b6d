//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: remembering the signed-in student and carrying
//! their onboarding wizard state between requests.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::onboarding::OnboardingState;
use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ONBOARDING_KEY: &str = "onboarding";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    ///
    /// Switching to a different user discards any onboarding progress held
    /// for the previous one.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        if self.user_id()?.is_some_and(|current| &current != user_id) {
            self.0.remove(ONBOARDING_KEY);
        }
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match UserId::new(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    warn!("invalid user id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Current wizard state, starting fresh when none is stored.
    ///
    /// A payload that no longer deserialises (for example one breaking the
    /// pending-only-on-edu rule) is discarded rather than rejected.
    pub fn onboarding_state(&self) -> OnboardingState {
        match self.0.get::<OnboardingState>(ONBOARDING_KEY) {
            Ok(Some(state)) => state,
            Ok(None) => OnboardingState::default(),
            Err(error) => {
                warn!(error = %error, "discarding unreadable onboarding state");
                self.0.remove(ONBOARDING_KEY);
                OnboardingState::default()
            }
        }
    }

    pub fn store_onboarding_state(&self, state: &OnboardingState) -> Result<(), Error> {
        self.0.insert(ONBOARDING_KEY, state).map_err(|error| {
            Error::internal(format!("failed to persist onboarding state: {error}"))
        })
    }

    /// Forget wizard progress once the student has left the flow.
    pub fn clear_onboarding_state(&self) {
        self.0.remove(ONBOARDING_KEY);
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::onboarding::{OnboardingAction, OnboardingStep};
    use crate::domain::CampusDirectory;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    const ALICE: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
    const BOB: &str = "9b2d7c61-0d3a-4c8e-a7a5-1f0e6d5c4b3a";

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().wrap(crate::inbound::http::test_utils::test_session_middleware())
    }

    #[actix_web::test]
    async fn round_trips_user_id() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        let id = UserId::new(ALICE).expect("fixture id");
                        session.persist_user(&id)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let id = session.require_user_id()?;
                        Ok::<_, Error>(HttpResponse::Ok().body(id.to_string()))
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body = test::read_body(get_res).await;
        assert_eq!(body, ALICE);
    }

    #[actix_web::test]
    async fn missing_user_is_unauthorised() {
        let app = test::init_service(session_test_app().route(
            "/require",
            web::get().to(|session: SessionContext| async move {
                let _ = session.require_user_id()?;
                Ok::<_, Error>(HttpResponse::Ok())
            }),
        ))
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/require").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn tampered_user_id_is_unauthorised() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set-invalid",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(USER_ID_KEY, "not-a-uuid")
                            .expect("set invalid user id");
                        HttpResponse::Ok()
                    }),
                )
                .route(
                    "/require",
                    web::get().to(|session: SessionContext| async move {
                        let _ = session.require_user_id()?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                ),
        )
        .await;

        let set_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-invalid").to_request(),
        )
        .await;
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/require")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn onboarding_progress_survives_requests_and_resets_on_user_switch() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/advance",
                    web::get().to(|session: SessionContext| async move {
                        session.persist_user(&UserId::new(ALICE).expect("alice"))?;
                        let mut state = session.onboarding_state();
                        state
                            .apply(OnboardingAction::Continue, CampusDirectory::chicago())
                            .expect("continue from campuses");
                        session.store_onboarding_state(&state)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/step",
                    web::get().to(|session: SessionContext| async move {
                        HttpResponse::Ok().body(session.onboarding_state().step().to_string())
                    }),
                )
                .route(
                    "/switch",
                    web::get().to(|session: SessionContext| async move {
                        session.persist_user(&UserId::new(BOB).expect("bob"))?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                ),
        )
        .await;

        let advance =
            test::call_service(&app, test::TestRequest::get().uri("/advance").to_request()).await;
        let cookie = advance
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let step = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/step")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(
            test::read_body(step).await,
            OnboardingStep::Categories.to_string()
        );

        let switched = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/switch")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let cookie = switched
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie updated")
            .into_owned();
        let step = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/step")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(
            test::read_body(step).await,
            OnboardingStep::Campuses.to_string()
        );
    }
}

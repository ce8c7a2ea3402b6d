//! Sign-in callback from the identity provider.
//!
//! ```text
//! GET /auth/callback?code=<provider code>  ->  302 Location: /onboarding
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use tracing::warn;
use utoipa::IntoParams;

use crate::domain::PostLoginRedirect;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::present;

/// Query string the identity provider redirects back with.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackParams {
    /// OAuth or magic-link code to exchange for a session.
    pub code: Option<String>,
}

fn redirect_to(target: PostLoginRedirect) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, target.path()))
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Exchange the code, remember the student and send them on.
///
/// New and unverified students land on onboarding, verified ones on the map.
/// Every failure lands on the home page with `error=auth`.
#[utoipa::path(
    get,
    path = "/auth/callback",
    params(CallbackParams),
    responses(
        (status = 302, description = "Redirect to /onboarding, /map or /?error=auth",
            headers(("Location" = String, description = "Next page"),
                    ("Set-Cookie" = String, description = "Session cookie")))
    ),
    tags = ["auth"],
    operation_id = "authCallback",
    security([])
)]
#[get("/auth/callback")]
pub async fn auth_callback(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<CallbackParams>,
) -> ApiResult<HttpResponse> {
    let code = present(params.code.as_deref()).map(str::to_owned);
    let outcome = state.sign_in.complete_sign_in(code).await;
    if let Some(user_id) = outcome.user_id.as_ref() {
        if let Err(error) = session.persist_user(user_id) {
            warn!(error = %error, "sign-in succeeded but the session could not be written");
            return Ok(redirect_to(PostLoginRedirect::AuthError));
        }
    }
    Ok(redirect_to(outcome.redirect))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::MockSignInCommand;
    use crate::domain::{SignInOutcome, UserId};
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::{mock_ports, test_app, updated_cookie};

    const STUDENT: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn signing_in(expected_code: Option<&'static str>, outcome: SignInOutcome) -> HttpStatePorts {
        let mut sign_in = MockSignInCommand::new();
        sign_in
            .expect_complete_sign_in()
            .withf(move |code| code.as_deref() == expected_code)
            .times(1)
            .return_once(move |_| outcome);
        HttpStatePorts {
            sign_in: Arc::new(sign_in),
            ..mock_ports()
        }
    }

    fn signed_in(redirect: PostLoginRedirect) -> SignInOutcome {
        SignInOutcome {
            user_id: Some(UserId::new(STUDENT).expect("fixture id")),
            redirect,
        }
    }

    #[rstest]
    #[case(PostLoginRedirect::Onboarding, "/onboarding")]
    #[case(PostLoginRedirect::Map, "/map")]
    #[actix_web::test]
    async fn successful_sign_in_sets_the_session_and_redirects(
        #[case] redirect: PostLoginRedirect,
        #[case] location: &str,
    ) {
        let ports = signing_in(Some("abc"), signed_in(redirect));
        let app = actix_test::init_service(test_app(ports)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/auth/callback?code=abc")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).map(|v| v.as_bytes()),
            Some(location.as_bytes())
        );
        assert!(updated_cookie(&response).is_some());
    }

    #[rstest]
    #[case("/auth/callback", None)]
    #[case("/auth/callback?code=", None)]
    #[case("/auth/callback?code=expired", Some("expired"))]
    #[actix_web::test]
    async fn failures_land_on_the_auth_error_page(
        #[case] uri: &str,
        #[case] forwarded: Option<&'static str>,
    ) {
        let ports = signing_in(forwarded, SignInOutcome::failed());
        let app = actix_test::init_service(test_app(ports)).await;
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).map(|v| v.as_bytes()),
            Some("/?error=auth".as_bytes())
        );
        assert!(updated_cookie(&response).is_none());
    }
}

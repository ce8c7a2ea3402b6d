//! Onboarding wizard handlers.
//!
//! ```text
//! GET  /api/v1/onboarding
//! POST /api/v1/onboarding/actions {"type":"toggleCampus","campus":"uic"}
//! ```
//!
//! Wizard state lives in the session cookie. Each action applies exactly one
//! transition and writes the new state back; leaving the wizard clears it.

use actix_web::{get, post, web};

use crate::domain::onboarding::{OnboardingAction, OnboardingState};
use crate::domain::{Error, OnboardingReply};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Current wizard state for the signed-in student.
#[utoipa::path(
    get,
    path = "/api/v1/onboarding",
    responses(
        (status = 200, description = "Wizard state", body = OnboardingState),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["onboarding"],
    operation_id = "getOnboarding"
)]
#[get("/onboarding")]
pub async fn get_onboarding(session: SessionContext) -> ApiResult<web::Json<OnboardingState>> {
    session.require_user_id()?;
    Ok(web::Json(session.onboarding_state()))
}

/// Apply one wizard action.
///
/// `requestVerification` sends the `.edu` email before the state records it
/// as pending; `skip` and `finish` persist the selections and return the exit
/// path in `redirect`.
#[utoipa::path(
    post,
    path = "/api/v1/onboarding/actions",
    request_body = OnboardingAction,
    responses(
        (status = 200, description = "Updated wizard state", body = OnboardingReply),
        (status = 400, description = "Unknown campus or category, or not a .edu address", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Profile missing", body = Error),
        (status = 409, description = "Action not allowed in the current state", body = Error),
        (status = 503, description = "Email or profile store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["onboarding"],
    operation_id = "applyOnboardingAction"
)]
#[post("/onboarding/actions")]
pub async fn apply_onboarding_action(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<OnboardingAction>,
) -> ApiResult<web::Json<OnboardingReply>> {
    let user_id = session.require_user_id()?;
    let current = session.onboarding_state();
    let reply = state
        .onboarding
        .apply(&user_id, current, payload.into_inner())
        .await?;
    if reply.redirect.is_some() {
        session.clear_onboarding_state();
    } else {
        session.store_onboarding_state(&reply.state)?;
    }
    Ok(web::Json(reply))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use mockall::predicate::eq;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::onboarding::OnboardingStep;
    use crate::domain::ports::MockOnboardingCommand;
    use crate::domain::{CampusDirectory, UserId};
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::{
        mock_ports, session_cookie_for, test_app, updated_cookie,
    };

    const STUDENT: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn student() -> UserId {
        UserId::new(STUDENT).expect("fixture id")
    }

    /// Mirrors the real service for navigation-only actions.
    fn transitions_locally() -> MockOnboardingCommand {
        let mut onboarding = MockOnboardingCommand::new();
        onboarding
            .expect_apply()
            .with(eq(student()), mockall::predicate::always(), mockall::predicate::always())
            .returning(|_, mut state, action| {
                state
                    .apply(action, CampusDirectory::chicago())
                    .map_err(|err| Error::conflict(err.to_string()))?;
                Ok(OnboardingReply {
                    state,
                    redirect: None,
                })
            });
        onboarding
    }

    fn ports_with(onboarding: MockOnboardingCommand) -> HttpStatePorts {
        HttpStatePorts {
            onboarding: Arc::new(onboarding),
            ..mock_ports()
        }
    }

    #[actix_web::test]
    async fn requires_a_signed_in_student() {
        let app = actix_test::init_service(test_app(mock_ports())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/onboarding")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn fresh_sessions_start_on_campuses() {
        let app = actix_test::init_service(test_app(mock_ports())).await;
        let cookie = session_cookie_for(&app, STUDENT).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/onboarding")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("JSON");
        assert_eq!(body["step"], "campuses");
        assert_eq!(body["eduPending"], false);
    }

    #[actix_web::test]
    async fn each_action_advances_the_stored_state() {
        let app = actix_test::init_service(test_app(ports_with(transitions_locally()))).await;
        let mut cookie = session_cookie_for(&app, STUDENT).await;

        for action in [
            json!({ "type": "toggleCampus", "campus": "uic" }),
            json!({ "type": "continue" }),
        ] {
            let response = actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri("/api/v1/onboarding/actions")
                    .cookie(cookie.clone())
                    .set_json(&action)
                    .to_request(),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
            cookie = updated_cookie(&response).unwrap_or(cookie);
        }

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/onboarding")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let state: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("JSON");
        assert_eq!(state["step"], OnboardingStep::Categories.to_string());
        assert_eq!(state["selectedCampuses"], json!(["uic"]));
    }

    #[actix_web::test]
    async fn rejected_transitions_leave_the_session_untouched() {
        let app = actix_test::init_service(test_app(ports_with(transitions_locally()))).await;
        let cookie = session_cookie_for(&app, STUDENT).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/onboarding/actions")
                .cookie(cookie)
                .set_json(json!({ "type": "back" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(updated_cookie(&response).is_none());
    }

    #[actix_web::test]
    async fn leaving_the_wizard_returns_the_exit_path() {
        let mut onboarding = MockOnboardingCommand::new();
        onboarding.expect_apply().times(1).returning(|_, _, action| {
            assert_eq!(action, OnboardingAction::Skip);
            Ok(OnboardingReply {
                state: OnboardingState::default(),
                redirect: Some("/map".to_owned()),
            })
        });
        let app = actix_test::init_service(test_app(ports_with(onboarding))).await;
        let cookie = session_cookie_for(&app, STUDENT).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/onboarding/actions")
                .cookie(cookie)
                .set_json(json!({ "type": "skip" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("JSON");
        assert_eq!(body["redirect"], "/map");
    }

    #[actix_web::test]
    async fn unknown_action_types_are_bad_requests() {
        let app = actix_test::init_service(test_app(mock_ports())).await;
        let cookie = session_cookie_for(&app, STUDENT).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/onboarding/actions")
                .cookie(cookie)
                .set_json(json!({ "type": "teleport" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

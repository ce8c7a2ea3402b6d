//! Password reset handler.
//!
//! ```text
//! POST /api/v1/password-reset {"password":"hunter22","confirmPassword":"hunter22"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::{Error, NewPassword, PasswordValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/password-reset`.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetRequest {
    #[serde(default)]
    #[schema(value_type = String, format = Password)]
    pub password: Zeroizing<String>,
    #[serde(default)]
    #[schema(value_type = String, format = Password)]
    pub confirm_password: Zeroizing<String>,
}

fn map_password_validation_error(err: PasswordValidationError) -> Error {
    let code = match err {
        PasswordValidationError::Mismatch => "password_mismatch",
        PasswordValidationError::TooShort => "password_too_short",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": "password", "code": code }))
}

/// Replace the signed-in student's password.
///
/// The confirmation is compared first, then the length.
#[utoipa::path(
    post,
    path = "/api/v1/password-reset",
    request_body = PasswordResetRequest,
    responses(
        (status = 204, description = "Password updated"),
        (status = 400, description = "Passwords do not match, too short, or refused by the provider", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Identity provider unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "resetPassword"
)]
#[post("/password-reset")]
pub async fn reset_password(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PasswordResetRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let request = payload.into_inner();
    let password = NewPassword::confirm(&request.password, &request.confirm_password)
        .map_err(map_password_validation_error)?;
    state.password_reset.reset(&user_id, &password).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::MockPasswordResetCommand;
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::{mock_ports, session_cookie_for, test_app};

    const STUDENT: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[actix_web::test]
    async fn requires_a_session() {
        let app = actix_test::init_service(test_app(mock_ports())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/password-reset")
                .set_json(json!({ "password": "secret1", "confirmPassword": "secret1" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[case("abc", "abd", "Passwords do not match")]
    #[case("abc", "abc", "Password must be at least 6 characters")]
    #[case("abcdefg", "abc", "Passwords do not match")]
    #[actix_web::test]
    async fn validation_precedes_the_provider(
        #[case] password: &str,
        #[case] confirmation: &str,
        #[case] message: &str,
    ) {
        let app = actix_test::init_service(test_app(mock_ports())).await;
        let cookie = session_cookie_for(&app, STUDENT).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/password-reset")
                .cookie(cookie)
                .set_json(json!({ "password": password, "confirmPassword": confirmation }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("JSON");
        assert_eq!(payload["message"], message);
    }

    #[actix_web::test]
    async fn valid_passwords_reach_the_provider() {
        let mut reset = MockPasswordResetCommand::new();
        reset
            .expect_reset()
            .withf(|user_id, password| user_id.as_ref() == STUDENT && password.expose() == "secret1")
            .times(1)
            .return_once(|_, _| Ok(()));
        let ports = HttpStatePorts {
            password_reset: Arc::new(reset),
            ..mock_ports()
        };
        let app = actix_test::init_service(test_app(ports)).await;
        let cookie = session_cookie_for(&app, STUDENT).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/password-reset")
                .cookie(cookie)
                .set_json(json!({ "password": "secret1", "confirmPassword": "secret1" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}

//! Student email verification handlers.
//!
//! ```text
//! POST /api/v1/edu/verify-code {"userId":"3fa8...","code":"042917"}
//! GET  /auth/edu-confirm?uid=3fa8...&code=<provider code>
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::verification::INVALID_CODE_MESSAGE;
use crate::domain::{EduConfirmation, EduConfirmationError, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ErrorCode, FieldName, field_error, parse_user_id, present};

pub(crate) const MISSING_FIELDS_MESSAGE: &str = "Missing fields";

/// Request body for `POST /api/v1/edu/verify-code`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    pub user_id: Option<String>,
    /// Six-digit code from the verification email.
    pub code: Option<String>,
}

/// Body returned when a code is accepted.
#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyCodeResponse {
    pub success: bool,
}

/// Check a typed verification code and mark the account verified.
#[utoipa::path(
    post,
    path = "/api/v1/edu/verify-code",
    request_body = VerifyCodeRequest,
    responses(
        (status = 200, description = "Code accepted", body = VerifyCodeResponse),
        (status = 400, description = "Missing fields, or invalid or expired code", body = Error),
        (status = 503, description = "Verification store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["verification"],
    operation_id = "verifyEduCode",
    security([])
)]
#[post("/edu/verify-code")]
pub async fn verify_code(
    state: web::Data<HttpState>,
    payload: web::Json<VerifyCodeRequest>,
) -> ApiResult<web::Json<VerifyCodeResponse>> {
    let VerifyCodeRequest { user_id, code } = payload.into_inner();
    let user_id = present(user_id.as_deref());
    let code = present(code.as_deref());
    let (Some(user_id), Some(code)) = (user_id, code) else {
        let field = if user_id.is_none() { "userId" } else { "code" };
        return Err(field_error(
            FieldName::new(field),
            ErrorCode::MissingField,
            MISSING_FIELDS_MESSAGE,
        ));
    };
    // A malformed id cannot own a code.
    let user_id = parse_user_id(user_id, FieldName::new("userId"), INVALID_CODE_MESSAGE)?;
    state.edu_verification.verify_code(&user_id, code).await?;
    Ok(web::Json(VerifyCodeResponse { success: true }))
}

/// Query string of the confirmation link.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EduConfirmParams {
    /// Id of the account that requested verification.
    pub uid: Option<String>,
    /// Sign-in code appended by the identity provider.
    pub code: Option<String>,
}

/// Body returned when a confirmation link verifies the account.
#[derive(Debug, Serialize, ToSchema)]
pub struct EduConfirmResponse {
    pub verified: bool,
}

fn map_confirmation_error(error: EduConfirmationError) -> Error {
    let message = error.to_string();
    match error {
        EduConfirmationError::NoSession => Error::unauthorized(message),
        EduConfirmationError::MissingUid => Error::invalid_request(message),
        EduConfirmationError::Failed => Error::service_unavailable(message),
    }
}

/// Landing target of the verification email link.
///
/// Requires an active session, either already in the cookie or established
/// from the link's `code`.
#[utoipa::path(
    get,
    path = "/auth/edu-confirm",
    params(EduConfirmParams),
    responses(
        (status = 200, description = "Account verified", body = EduConfirmResponse),
        (status = 400, description = "Could not identify the account", body = Error),
        (status = 401, description = "Link invalid or expired", body = Error),
        (status = 503, description = "Try again", body = Error)
    ),
    tags = ["verification"],
    operation_id = "confirmEdu",
    security([])
)]
#[get("/auth/edu-confirm")]
pub async fn confirm_edu(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<EduConfirmParams>,
) -> ApiResult<web::Json<EduConfirmResponse>> {
    let EduConfirmParams { uid, code } = params.into_inner();
    let request = EduConfirmation {
        session_user: session.user_id()?,
        code: present(code.as_deref()).map(str::to_owned),
        uid: present(uid.as_deref()).map(str::to_owned),
    };
    let session_user = state
        .sign_in
        .confirm_edu(request)
        .await
        .map_err(map_confirmation_error)?;
    session.persist_user(&session_user)?;
    Ok(web::Json(EduConfirmResponse { verified: true }))
}

#[cfg(test)]
#[path = "edu_tests.rs"]
mod tests;

//! Waitlist sign-up handler.
//!
//! ```text
//! POST /api/v1/waitlist {"email":"ada@uic.edu","type":"rewards"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, WaitlistEntry, WaitlistValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/waitlist`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct WaitlistRequest {
    #[serde(default)]
    pub email: String,
    /// List tag; omitted or blank means `rewards`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl TryFrom<WaitlistRequest> for WaitlistEntry {
    type Error = WaitlistValidationError;

    fn try_from(value: WaitlistRequest) -> Result<Self, Self::Error> {
        Self::new(&value.email, value.kind.as_deref())
    }
}

fn map_waitlist_validation_error(err: WaitlistValidationError) -> Error {
    let (field, code) = match err {
        WaitlistValidationError::MissingEmail => ("email", "missing_email"),
        WaitlistValidationError::MalformedEmail => ("email", "malformed_email"),
        WaitlistValidationError::InvalidKind => ("type", "invalid_type"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Join a waitlist. Repeat sign-ups are accepted.
#[utoipa::path(
    post,
    path = "/api/v1/waitlist",
    request_body = WaitlistRequest,
    responses(
        (status = 201, description = "Signed up"),
        (status = 400, description = "Invalid email or list", body = Error),
        (status = 503, description = "Waitlist store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["waitlist"],
    operation_id = "joinWaitlist",
    security([])
)]
#[post("/waitlist")]
pub async fn join_waitlist(
    state: web::Data<HttpState>,
    payload: web::Json<WaitlistRequest>,
) -> ApiResult<HttpResponse> {
    let entry =
        WaitlistEntry::try_from(payload.into_inner()).map_err(map_waitlist_validation_error)?;
    state.waitlist.join(&entry).await?;
    Ok(HttpResponse::Created().finish())
}

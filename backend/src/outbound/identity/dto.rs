//! Wire types for the hosted auth service's REST API.

use serde::{Deserialize, Serialize};

use crate::domain::UserId;
use crate::domain::ports::AuthenticatedUser;

#[derive(Debug, Serialize)]
pub(super) struct CodeExchangeRequest<'a> {
    pub auth_code: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct OtpRequest<'a> {
    pub email: &'a str,
    pub create_user: bool,
    pub data: OtpMetadata<'a>,
}

/// Template variables available to the verification email.
#[derive(Debug, Serialize)]
pub(super) struct OtpMetadata<'a> {
    pub verification_code: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct PasswordUpdateRequest<'a> {
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct SessionDto {
    pub user: UserDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadataDto,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct UserMetadataDto {
    #[serde(default)]
    pub full_name: Option<String>,
}

impl SessionDto {
    pub(super) fn into_user(self) -> Result<AuthenticatedUser, String> {
        let id = UserId::new(&self.user.id).map_err(|err| format!("user id: {err}"))?;
        Ok(AuthenticatedUser {
            id,
            email: self.user.email.unwrap_or_default(),
            full_name: self.user.user_metadata.full_name,
        })
    }
}

/// Error bodies vary by endpoint; take whichever message field is present.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorDto {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorDto {
    pub(super) fn into_message(self) -> Option<String> {
        self.msg.or(self.error_description).or(self.message)
    }
}

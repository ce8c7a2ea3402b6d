//! Reqwest-backed identity provider speaking a GoTrue-style REST API.
//!
//! The adapter owns transport details only: endpoint paths, API key headers,
//! status mapping and JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{
    CodeExchangeRequest, ErrorDto, OtpMetadata, OtpRequest, PasswordUpdateRequest, SessionDto,
};
use crate::domain::UserId;
use crate::domain::credentials::NewPassword;
use crate::domain::ports::{
    AuthenticatedUser, EduVerificationEmail, IdentityProvider, IdentityProviderError,
};

const TOKEN_PATH: &str = "auth/v1/token";
const OTP_PATH: &str = "auth/v1/otp";
const ADMIN_USERS_PATH: &str = "auth/v1/admin/users/";

/// [`IdentityProvider`] backed by the provider's REST API.
pub struct HttpIdentityProvider {
    client: Client,
    base_url: Url,
    api_key: Zeroizing<String>,
}

impl HttpIdentityProvider {
    /// `base_url` is the project root, e.g. `https://abc.supabase.co/`.
    /// `api_key` must be a service key: password updates use the admin API.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        api_key: Zeroizing<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
            api_key,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, IdentityProviderError> {
        self.base_url
            .join(path)
            .map_err(|err| IdentityProviderError::protocol(format!("invalid endpoint {path}: {err}")))
    }

    fn authorised(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", self.api_key.as_str())
            .bearer_auth(self.api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn map_transport_error(error: reqwest::Error) -> IdentityProviderError {
    IdentityProviderError::unavailable(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    let detail = serde_json::from_slice::<ErrorDto>(body)
        .ok()
        .and_then(ErrorDto::into_message)
        .unwrap_or_else(|| format!("status {}", status.as_u16()));
    match status {
        StatusCode::TOO_MANY_REQUESTS => IdentityProviderError::unavailable(detail),
        _ if status.is_client_error() => IdentityProviderError::rejected(detail),
        _ => IdentityProviderError::unavailable(detail),
    }
}

async fn checked(response: Response) -> Result<Vec<u8>, IdentityProviderError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        debug!(status = status.as_u16(), "identity provider refused request");
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

fn parse_session(body: &[u8]) -> Result<AuthenticatedUser, IdentityProviderError> {
    let session: SessionDto = serde_json::from_slice(body).map_err(|err| {
        IdentityProviderError::protocol(format!("invalid session payload: {err}"))
    })?;
    session.into_user().map_err(IdentityProviderError::protocol)
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn exchange_code(&self, code: &str) -> Result<AuthenticatedUser, IdentityProviderError> {
        let mut url = self.endpoint(TOKEN_PATH)?;
        url.query_pairs_mut().append_pair("grant_type", "pkce");
        let response = self
            .authorised(self.client.post(url))
            .json(&CodeExchangeRequest { auth_code: code })
            .send()
            .await
            .map_err(map_transport_error)?;
        parse_session(&checked(response).await?)
    }

    async fn send_edu_verification(
        &self,
        request: &EduVerificationEmail,
    ) -> Result<(), IdentityProviderError> {
        let mut url = self.endpoint(OTP_PATH)?;
        url.query_pairs_mut()
            .append_pair("redirect_to", &request.redirect_to);
        let response = self
            .authorised(self.client.post(url))
            .json(&OtpRequest {
                email: request.email.as_str(),
                create_user: false,
                data: OtpMetadata {
                    verification_code: request.code.as_str(),
                },
            })
            .send()
            .await
            .map_err(map_transport_error)?;
        checked(response).await.map(|_| ())
    }

    async fn update_password(
        &self,
        user_id: &UserId,
        password: &NewPassword,
    ) -> Result<(), IdentityProviderError> {
        let url = self.endpoint(&format!("{ADMIN_USERS_PATH}{user_id}"))?;
        let response = self
            .authorised(self.client.put(url))
            .json(&PasswordUpdateRequest {
                password: password.expose(),
            })
            .send()
            .await
            .map_err(map_transport_error)?;
        checked(response).await.map(|_| ())
    }
}

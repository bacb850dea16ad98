use async_trait::async_trait;
use contracts::system::auth::{GoogleAuthUrlResponse, ProtectedResponse, UserInfo};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, read_json, send_checked, with_bearer, ApiError};

/// Identity endpoints of the backend.
#[async_trait(?Send)]
pub trait AuthApi {
    /// `GET /protected` with the bearer credential.
    async fn verify(&self, token: &str) -> Result<UserInfo, ApiError>;

    /// `POST /logout`; callers treat any outcome as success.
    async fn logout(&self, token: Option<&str>) -> Result<(), ApiError>;

    /// `GET /auth/google/url`
    async fn google_auth_url(&self) -> Result<String, ApiError>;
}

/// `gloo_net` implementation used in the browser.
#[derive(Clone, Debug)]
pub struct HttpAuthApi {
    base_url: String,
}

impl HttpAuthApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait(?Send)]
impl AuthApi for HttpAuthApi {
    async fn verify(&self, token: &str) -> Result<UserInfo, ApiError> {
        let request = with_bearer(
            Request::get(&api_url(&self.base_url, "/protected")).header("Accept", "application/json"),
            Some(token),
        );
        let response = send_checked(request).await?;
        let body: ProtectedResponse = read_json(response).await?;
        body.user
            .ok_or_else(|| ApiError::Decode("missing `user` in /protected response".to_string()))
    }

    async fn logout(&self, token: Option<&str>) -> Result<(), ApiError> {
        let request = with_bearer(Request::post(&api_url(&self.base_url, "/logout")), token);
        send_checked(request).await?;
        Ok(())
    }

    async fn google_auth_url(&self) -> Result<String, ApiError> {
        let request = Request::get(&api_url(&self.base_url, "/auth/google/url"));
        let response = send_checked(request).await?;
        let body: GoogleAuthUrlResponse = read_json(response).await?;
        Ok(body.url)
    }
}

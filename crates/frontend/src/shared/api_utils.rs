//! API utilities for frontend-backend communication
//!
//! Error type shared by every backend adapter plus small helpers around
//! `gloo_net` requests.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("credential rejected by backend")]
    Unauthorized,

    #[error("backend responded with HTTP {0}")]
    Status(u16),

    #[error("unexpected response shape: {0}")]
    Decode(String),

    #[error("failed to build request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Authentication rejection: the stored credential must be discarded.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Build a full API URL from a base and a path
///
/// # Example
/// ```rust
/// # use frontend::shared::api_utils::api_url;
/// assert_eq!(api_url("http://localhost:8000/", "/ask"), "http://localhost:8000/ask");
/// ```
pub fn api_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Attach `Authorization: Bearer …` when a credential is available.
pub fn with_bearer(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

/// Short, log-safe prefix of a credential.
pub fn mask_token(token: &str) -> String {
    let prefix: String = token.chars().take(8).collect();
    if prefix.len() < token.len() {
        format!("{}…", prefix)
    } else {
        "…".to_string()
    }
}

/// Map the status line of a response onto the error taxonomy.
pub fn status_to_result(status: u16) -> Result<(), ApiError> {
    match status {
        200..=299 => Ok(()),
        401 => Err(ApiError::Unauthorized),
        other => Err(ApiError::Status(other)),
    }
}

/// Send a request and reject non-2xx responses.
pub async fn send_checked(builder: RequestBuilder) -> Result<Response, ApiError> {
    let response = builder
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    status_to_result(response.status())?;
    Ok(response)
}

/// Same as [`send_checked`] for a request whose body is already attached.
pub async fn send_request(request: Request) -> Result<Response, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    status_to_result(response.status())?;
    Ok(response)
}

/// Decode a JSON body into `T`.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_joins_slashes() {
        assert_eq!(api_url("http://h:8000", "ask"), "http://h:8000/ask");
        assert_eq!(api_url("http://h:8000/", "/chat/sessions"), "http://h:8000/chat/sessions");
    }

    #[test]
    fn test_status_taxonomy() {
        assert_eq!(status_to_result(200), Ok(()));
        assert_eq!(status_to_result(204), Ok(()));
        assert_eq!(status_to_result(401), Err(ApiError::Unauthorized));
        assert_eq!(status_to_result(500), Err(ApiError::Status(500)));
        assert!(ApiError::Unauthorized.is_auth_rejection());
        assert!(!ApiError::Status(403).is_auth_rejection());
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abcdefghijklmnop"), "abcdefgh…");
        assert_eq!(mask_token("short"), "…");
    }
}

use async_trait::async_trait;
use contracts::system::contact::EmailSendRequest;
use gloo_net::http::Request;

use crate::shared::api_utils::{send_request, ApiError};

#[async_trait(?Send)]
pub trait ContactApi {
    async fn send(&self, request: &EmailSendRequest) -> Result<(), ApiError>;
}

/// Posts JSON to the relay's REST endpoint.
#[derive(Clone, Debug)]
pub struct HttpContactApi {
    endpoint: String,
}

impl HttpContactApi {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait(?Send)]
impl ContactApi for HttpContactApi {
    async fn send(&self, request: &EmailSendRequest) -> Result<(), ApiError> {
        let request = Request::post(&self.endpoint)
            .json(request)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        send_request(request).await?;
        Ok(())
    }
}

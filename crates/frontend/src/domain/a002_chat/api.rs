use async_trait::async_trait;
use contracts::domain::chat::{
    upload_fields, AskRequest, AskResponse, HistoryRecord, HistoryResponse, SessionRecord,
    SessionsResponse,
};
use gloo_net::http::Request;

use super::attachment::NamedFile;
use crate::shared::api_utils::{
    api_url, read_json, send_checked, send_request, with_bearer, ApiError,
};
use crate::system::auth::storage::CredentialStorage;

/// Chat endpoints of the backend. History is partitioned per personality,
/// so every call names one.
#[async_trait(?Send)]
pub trait ChatApi {
    type File: NamedFile;

    /// `POST /ask`, returns the full answer text.
    async fn ask(&self, request: &AskRequest) -> Result<String, ApiError>;

    /// `GET /chat/sessions?personality=…`, newest first.
    async fn list_sessions(&self, personality: &str) -> Result<Vec<SessionRecord>, ApiError>;

    /// `GET /chat/history?session_id=…&personality=…`
    async fn load_history(
        &self,
        session_id: &str,
        personality: &str,
    ) -> Result<Vec<HistoryRecord>, ApiError>;

    /// `DELETE /chat/delete/{session_id}?personality=…`
    async fn delete_session(&self, session_id: &str, personality: &str) -> Result<(), ApiError>;

    /// `POST /upload-file` as multipart form data.
    async fn upload_file(
        &self,
        file: &Self::File,
        session_id: &str,
        personality: &str,
    ) -> Result<(), ApiError>;
}

/// Browser adapter. Reads the credential from storage on every request so a
/// re-login is picked up without rebuilding the controller.
#[derive(Clone)]
pub struct HttpChatApi {
    base_url: String,
    credentials: CredentialStorage,
}

impl HttpChatApi {
    pub fn new(base_url: impl Into<String>, credentials: CredentialStorage) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
        }
    }

    fn url(&self, path: &str) -> String {
        api_url(&self.base_url, path)
    }
}

#[async_trait(?Send)]
impl ChatApi for HttpChatApi {
    type File = web_sys::File;

    async fn ask(&self, request: &AskRequest) -> Result<String, ApiError> {
        let token = self.credentials.token();
        let request = with_bearer(Request::post(&self.url("/ask")), token.as_deref())
            .json(request)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let response = send_request(request).await?;
        let body: AskResponse = read_json(response).await?;
        Ok(body.answer)
    }

    async fn list_sessions(&self, personality: &str) -> Result<Vec<SessionRecord>, ApiError> {
        let token = self.credentials.token();
        let request = with_bearer(
            Request::get(&self.url("/chat/sessions")).query([("personality", personality)]),
            token.as_deref(),
        );
        let response = send_checked(request).await?;
        let body: SessionsResponse = read_json(response).await?;
        Ok(body.sessions)
    }

    async fn load_history(
        &self,
        session_id: &str,
        personality: &str,
    ) -> Result<Vec<HistoryRecord>, ApiError> {
        let token = self.credentials.token();
        let request = with_bearer(
            Request::get(&self.url("/chat/history"))
                .query([("session_id", session_id), ("personality", personality)]),
            token.as_deref(),
        );
        let response = send_checked(request).await?;
        let body: HistoryResponse = read_json(response).await?;
        Ok(body.messages)
    }

    async fn delete_session(&self, session_id: &str, personality: &str) -> Result<(), ApiError> {
        let token = self.credentials.token();
        let path = format!("/chat/delete/{}", urlencoding::encode(session_id));
        let request = with_bearer(
            Request::delete(&self.url(&path)).query([("personality", personality)]),
            token.as_deref(),
        );
        send_checked(request).await?;
        Ok(())
    }

    async fn upload_file(
        &self,
        file: &web_sys::File,
        session_id: &str,
        personality: &str,
    ) -> Result<(), ApiError> {
        let encode = |e: wasm_bindgen::JsValue| ApiError::Encode(format!("{:?}", e));
        let form = web_sys::FormData::new().map_err(encode)?;
        form.append_with_blob_and_filename(upload_fields::FILE, file, &file.name())
            .map_err(encode)?;
        form.append_with_str(upload_fields::SESSION_ID, session_id)
            .map_err(encode)?;
        form.append_with_str(upload_fields::PERSONALITY, personality)
            .map_err(encode)?;

        let token = self.credentials.token();
        // No Content-Type header: the browser adds the multipart boundary.
        let request = with_bearer(Request::post(&self.url("/upload-file")), token.as_deref())
            .body(form)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        send_request(request).await?;
        Ok(())
    }
}

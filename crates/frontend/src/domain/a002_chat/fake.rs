//! In-memory `ChatApi` for controller and loader tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use contracts::domain::chat::{AskRequest, HistoryRecord, SessionRecord};

use super::api::ChatApi;
use super::attachment::NamedFile;
use crate::shared::api_utils::ApiError;

pub struct FakeFile(pub &'static str);

impl NamedFile for FakeFile {
    fn file_name(&self) -> String {
        self.0.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCall {
    pub file_name: String,
    pub session_id: String,
    pub personality: String,
}

pub struct FakeChatApi {
    /// Answers handed out in order; `Ok("ok")` once exhausted.
    pub answers: RefCell<VecDeque<Result<String, ApiError>>>,
    pub asks: RefCell<Vec<AskRequest>>,
    /// Session lists keyed by personality id.
    pub sessions: RefCell<HashMap<String, Vec<SessionRecord>>>,
    /// Transcripts keyed by session id.
    pub transcripts: RefCell<HashMap<String, Vec<HistoryRecord>>>,
    pub fail_reads: Cell<bool>,
    pub delete_result: RefCell<Result<(), ApiError>>,
    pub deletes: RefCell<Vec<String>>,
    pub upload_result: RefCell<Result<(), ApiError>>,
    pub uploads: RefCell<Vec<UploadCall>>,
}

impl FakeChatApi {
    pub fn new() -> Self {
        Self {
            answers: RefCell::new(VecDeque::new()),
            asks: RefCell::new(Vec::new()),
            sessions: RefCell::new(HashMap::new()),
            transcripts: RefCell::new(HashMap::new()),
            fail_reads: Cell::new(false),
            delete_result: RefCell::new(Ok(())),
            deletes: RefCell::new(Vec::new()),
            upload_result: RefCell::new(Ok(())),
            uploads: RefCell::new(Vec::new()),
        }
    }

    pub fn answer(&self, answer: Result<&str, ApiError>) {
        self.answers
            .borrow_mut()
            .push_back(answer.map(str::to_string));
    }

    pub fn add_session(&self, personality: &str, session_id: &str, title: &str, timestamp: &str) {
        self.sessions
            .borrow_mut()
            .entry(personality.to_string())
            .or_default()
            .push(SessionRecord {
                session_id: session_id.to_string(),
                title: title.to_string(),
                timestamp: timestamp.to_string(),
            });
    }

    pub fn add_turn(&self, session_id: &str, message: &str, is_user: bool) {
        self.transcripts
            .borrow_mut()
            .entry(session_id.to_string())
            .or_default()
            .push(HistoryRecord {
                message: message.to_string(),
                is_user,
            });
    }
}

#[async_trait(?Send)]
impl ChatApi for FakeChatApi {
    type File = FakeFile;

    async fn ask(&self, request: &AskRequest) -> Result<String, ApiError> {
        self.asks.borrow_mut().push(request.clone());
        tokio::task::yield_now().await;
        self.answers
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok("ok".to_string()))
    }

    async fn list_sessions(&self, personality: &str) -> Result<Vec<SessionRecord>, ApiError> {
        tokio::task::yield_now().await;
        if self.fail_reads.get() {
            return Err(ApiError::Network("connection refused".into()));
        }
        Ok(self
            .sessions
            .borrow()
            .get(personality)
            .cloned()
            .unwrap_or_default())
    }

    async fn load_history(
        &self,
        session_id: &str,
        _personality: &str,
    ) -> Result<Vec<HistoryRecord>, ApiError> {
        tokio::task::yield_now().await;
        if self.fail_reads.get() {
            return Err(ApiError::Status(500));
        }
        Ok(self
            .transcripts
            .borrow()
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn delete_session(&self, session_id: &str, personality: &str) -> Result<(), ApiError> {
        self.deletes.borrow_mut().push(session_id.to_string());
        tokio::task::yield_now().await;
        let result = self.delete_result.borrow().clone();
        if result.is_ok() {
            if let Some(list) = self.sessions.borrow_mut().get_mut(personality) {
                list.retain(|s| s.session_id != session_id);
            }
        }
        result
    }

    async fn upload_file(
        &self,
        file: &FakeFile,
        session_id: &str,
        personality: &str,
    ) -> Result<(), ApiError> {
        self.uploads.borrow_mut().push(UploadCall {
            file_name: file.file_name(),
            session_id: session_id.to_string(),
            personality: personality.to_string(),
        });
        tokio::task::yield_now().await;
        self.upload_result.borrow().clone()
    }
}

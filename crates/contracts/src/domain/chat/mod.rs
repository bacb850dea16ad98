//! Chat endpoints: `/ask`, `/chat/sessions`, `/chat/history`,
//! `/chat/delete/{session_id}` and `/upload-file`.

use serde::{Deserialize, Serialize};

use crate::shared::lenient::{string_or_number, string_or_number_or_empty};

/// `POST /ask`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    pub session_id: String,
    pub personality: String,
    pub system_prompt: String,
    pub has_file: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// One stored conversation as listed by `GET /chat/sessions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub session_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "string_or_number_or_empty")]
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionsResponse {
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
}

/// One stored turn as returned by `GET /chat/history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub message: String,
    pub is_user: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub messages: Vec<HistoryRecord>,
}

/// Multipart field names of `POST /upload-file`.
pub mod upload_fields {
    pub const FILE: &str = "file";
    pub const SESSION_ID: &str = "session_id";
    pub const PERSONALITY: &str = "personality";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_request_field_names() {
        let req = AskRequest {
            question: "What is entropy?".into(),
            session_id: "s-1".into(),
            personality: "scholar".into(),
            system_prompt: "You are Scholar".into(),
            has_file: true,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["question"], "What is entropy?");
        assert_eq!(value["session_id"], "s-1");
        assert_eq!(value["personality"], "scholar");
        assert_eq!(value["system_prompt"], "You are Scholar");
        assert_eq!(value["has_file"], true);
    }

    #[test]
    fn test_sessions_response_keeps_order() {
        let json = r#"{"sessions":[
            {"session_id":"c","title":"Third","timestamp":"2025-03-03T10:00:00"},
            {"session_id":"b","title":"Second","timestamp":"2025-03-02T10:00:00"},
            {"session_id":7,"title":"First"}
        ]}"#;
        let resp: SessionsResponse = serde_json::from_str(json).unwrap();
        let ids: Vec<_> = resp.sessions.iter().map(|s| s.session_id.as_str()).collect();
        assert_eq!(ids, ["c", "b", "7"]);
        assert_eq!(resp.sessions[2].timestamp, "");
    }

    #[test]
    fn test_history_response_defaults_to_empty() {
        let resp: HistoryResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.messages.is_empty());

        let resp: HistoryResponse =
            serde_json::from_str(r#"{"messages":[{"message":"hi","is_user":true}]}"#).unwrap();
        assert_eq!(
            resp.messages,
            vec![HistoryRecord {
                message: "hi".into(),
                is_user: true
            }]
        );
    }
}

//! History Loader.
//!
//! History is supplementary: failures degrade to an empty result and are
//! only logged.

use log::{debug, warn};

use super::api::ChatApi;
use super::model::{ChatMessage, SessionSummary};
use crate::shared::date_utils::format_date;

/// Sessions of one personality in backend order (newest first).
pub async fn list_sessions<A: ChatApi>(api: &A, personality_id: &str) -> Vec<SessionSummary> {
    debug!("loading sessions for '{}'", personality_id);
    match api.list_sessions(personality_id).await {
        Ok(records) => records
            .into_iter()
            .map(|record| SessionSummary {
                display_timestamp: format_date(&record.timestamp),
                last_message: record.title.clone(),
                title: record.title,
                timestamp: record.timestamp,
                session_id: record.session_id,
            })
            .collect(),
        Err(e) => {
            warn!("failed to load sessions for '{}': {}", personality_id, e);
            Vec::new()
        }
    }
}

/// Transcript of one session; empty when missing or on failure.
pub async fn load_transcript<A: ChatApi>(
    api: &A,
    session_id: &str,
    personality_id: &str,
) -> Vec<ChatMessage> {
    debug!("loading transcript {}", session_id);
    match api.load_history(session_id, personality_id).await {
        Ok(records) => records
            .into_iter()
            .map(|record| ChatMessage {
                text: record.message,
                is_user: record.is_user,
            })
            .collect(),
        Err(e) => {
            warn!("failed to load transcript {}: {}", session_id, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_chat::fake::FakeChatApi;

    #[tokio::test]
    async fn test_list_preserves_backend_order_and_ids() {
        let api = FakeChatApi::new();
        api.add_session("scholar", "c3", "Thermodynamics", "2024-03-03T10:00:00");
        api.add_session("scholar", "b2", "Kant", "2024-03-02T10:00:00");
        api.add_session("scholar", "a1", "Algebra", "2024-03-01T10:00:00");
        api.add_session("blaze", "z9", "Other persona", "2024-03-04T10:00:00");

        let sessions = list_sessions(&api, "scholar").await;

        let ids: Vec<&str> = sessions.iter().map(|s| s.session_id.as_str()).collect();
        assert_eq!(ids, ["c3", "b2", "a1"]);
        assert_eq!(sessions[0].title, "Thermodynamics");
        assert_eq!(sessions[0].last_message, "Thermodynamics");
        assert_eq!(sessions[0].display_timestamp, "03.03.2024");
        assert_eq!(sessions[0].timestamp, "2024-03-03T10:00:00");
    }

    #[tokio::test]
    async fn test_unparseable_timestamp_is_shown_raw() {
        let api = FakeChatApi::new();
        api.add_session("buddy", "s1", "Hi", "yesterday-ish");
        let sessions = list_sessions(&api, "buddy").await;
        assert_eq!(sessions[0].display_timestamp, "yesterday-ish");
    }

    #[tokio::test]
    async fn test_failures_degrade_to_empty() {
        let api = FakeChatApi::new();
        api.add_session("scholar", "s1", "Hi", "");
        api.add_turn("s1", "hello", true);
        api.fail_reads.set(true);

        assert!(list_sessions(&api, "scholar").await.is_empty());
        assert!(load_transcript(&api, "s1", "scholar").await.is_empty());
    }

    #[tokio::test]
    async fn test_transcript_maps_turns() {
        let api = FakeChatApi::new();
        api.add_turn("s1", "What is a prime?", true);
        api.add_turn("s1", "A number with exactly two divisors.", false);

        let transcript = load_transcript(&api, "s1", "scholar").await;
        assert_eq!(
            transcript,
            vec![
                ChatMessage::user("What is a prime?"),
                ChatMessage::assistant("A number with exactly two divisors."),
            ]
        );
    }
}

use uuid::Uuid;

use super::attachment::AttachmentState;
use crate::domain::a001_personality::Personality;

/// One turn of a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub is_user: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: true,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: false,
        }
    }

    pub fn greeting(personality: &Personality) -> Self {
        Self::assistant(personality.greeting)
    }
}

/// History list entry. A local projection of backend state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub session_id: String,
    pub title: String,
    pub last_message: String,
    /// Raw backend timestamp.
    pub timestamp: String,
    pub display_timestamp: String,
}

pub const DELETING_TITLE: &str = "Deleting...";

impl SessionSummary {
    /// Entry shown for a conversation that only exists client-side so far.
    pub fn placeholder(session_id: String, title: String, greeting: &str) -> Self {
        Self {
            session_id,
            title,
            last_message: greeting.to_string(),
            timestamp: String::new(),
            display_timestamp: "Just now".to_string(),
        }
    }

    pub fn is_deleting(&self) -> bool {
        self.title == DELETING_TITLE
    }
}

pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

pub const SEND_ERROR_TEXT: &str = "Sorry, I encountered an error. Please try again.";
pub const CONNECTION_ERROR_TEXT: &str = "Sorry, I'm having trouble connecting. Please try again.";
pub const SESSION_EXPIRED_TEXT: &str = "Your session has expired. Please sign in again.";
pub const UPLOAD_ERROR_TEXT: &str =
    "❌ Sorry, there was an error uploading your file. Please try again.";
pub const DELETE_ERROR_TEXT: &str = "Failed to delete chat. Please try again.";

/// Everything the chat view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatState {
    pub personality_id: &'static str,
    pub messages: Vec<ChatMessage>,
    /// `None` until the first message (or upload) of a new conversation.
    pub active_session_id: Option<String>,
    pub input: String,
    /// Awaiting a response or revealing one.
    pub is_typing: bool,
    /// An answer is being typed out; the view ticks the reveal while set.
    pub revealing: bool,
    /// Words revealed so far of the response being typed out.
    pub typing_text: String,
    pub history: Vec<SessionSummary>,
    pub is_loading_history: bool,
    pub attachment: AttachmentState,
    /// Blocking error for the view to surface (failed delete).
    pub error: Option<String>,
    /// The backend rejected the credential during a chat request.
    pub session_expired: bool,
    /// Keep the viewport pinned to the newest output.
    pub follow_output: bool,
}

impl ChatState {
    pub fn new(personality: &'static Personality) -> Self {
        Self {
            personality_id: personality.id,
            messages: vec![ChatMessage::greeting(personality)],
            active_session_id: None,
            input: String::new(),
            is_typing: false,
            revealing: false,
            typing_text: String::new(),
            history: Vec::new(),
            is_loading_history: false,
            attachment: AttachmentState::default(),
            error: None,
            session_expired: false,
            follow_output: true,
        }
    }

    /// The active session id, allocating one first if the conversation is new.
    pub fn ensure_session_id(&mut self) -> String {
        self.active_session_id
            .get_or_insert_with(new_session_id)
            .clone()
    }

    pub fn is_active(&self, session_id: &str) -> bool {
        self.active_session_id.as_deref() == Some(session_id)
    }

    pub fn can_send(&self) -> bool {
        !self.is_typing && !self.input.trim().is_empty()
    }
}

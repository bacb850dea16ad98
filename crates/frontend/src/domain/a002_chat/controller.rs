//! Chat Session Controller.
//!
//! Owns the state of the one active conversation. Views subscribe to state
//! changes and drive the time-based parts (reveal ticks, banner timeouts,
//! scroll debounce) with their own timers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use contracts::domain::chat::AskRequest;
use log::{debug, error, info, warn};

use super::api::ChatApi;
use super::attachment::{BannerTicket, NamedFile};
use super::history;
use super::model::{
    new_session_id, ChatMessage, ChatState, SessionSummary, CONNECTION_ERROR_TEXT,
    DELETE_ERROR_TEXT, DELETING_TITLE, SEND_ERROR_TEXT, SESSION_EXPIRED_TEXT, UPLOAD_ERROR_TEXT,
};
use super::reveal::{RevealStep, TypingReveal};
use super::scroll::{AutoScroll, ScrollSample};
use crate::domain::a001_personality::{find, preferences, Personality};
use crate::shared::api_utils::ApiError;
use crate::shared::config::ChatConfig;
use crate::shared::storage::SharedStore;

/// Result of one reveal tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealTick {
    /// Nothing is being revealed.
    Idle,
    Typing,
    /// The answer was committed to the transcript.
    Committed,
}

type Listener = Rc<dyn Fn(&ChatState)>;

struct Inner<A: ChatApi> {
    api: Rc<A>,
    store: SharedStore,
    response_delay_ms: u32,
    state: RefCell<ChatState>,
    reveal: RefCell<Option<TypingReveal>>,
    scroll: RefCell<AutoScroll>,
    /// Bumped by every send and every reset of the conversation; a response
    /// is applied only if its turn is still current.
    turn: Cell<u64>,
    /// Latest session selection; older transcript loads are dropped.
    selection: Cell<u64>,
    /// Latest history refresh; older lists are dropped.
    history_request: Cell<u64>,
    listeners: RefCell<Vec<Listener>>,
}

pub struct ChatController<A: ChatApi> {
    inner: Rc<Inner<A>>,
}

impl<A: ChatApi> Clone for ChatController<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

fn bump(counter: &Cell<u64>) -> u64 {
    let next = counter.get() + 1;
    counter.set(next);
    next
}

impl<A: ChatApi> ChatController<A> {
    /// Starts with the persisted personality and its greeting.
    pub fn new(api: Rc<A>, store: SharedStore, config: &ChatConfig) -> Self {
        let personality = preferences::load_selected(store.as_ref());
        Self {
            inner: Rc::new(Inner {
                api,
                store,
                response_delay_ms: config.response_delay_ms,
                state: RefCell::new(ChatState::new(personality)),
                reveal: RefCell::new(None),
                scroll: RefCell::new(AutoScroll::new(config.scroll_bottom_threshold_px)),
                turn: Cell::new(0),
                selection: Cell::new(0),
                history_request: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn state(&self) -> ChatState {
        self.inner.state.borrow().clone()
    }

    pub fn personality(&self) -> &'static Personality {
        find(self.inner.state.borrow().personality_id)
    }

    /// Register a listener; called immediately and after every change.
    pub fn subscribe(&self, listener: impl Fn(&ChatState) + 'static) {
        let listener: Listener = Rc::new(listener);
        listener(&self.state());
        self.inner.listeners.borrow_mut().push(listener);
    }

    fn read<R>(&self, f: impl FnOnce(&ChatState) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    fn update<R>(&self, f: impl FnOnce(&mut ChatState) -> R) -> R {
        let (result, snapshot) = {
            let mut state = self.inner.state.borrow_mut();
            let result = f(&mut state);
            (result, state.clone())
        };
        let listeners: Vec<Listener> = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
        result
    }

    /// Load the history list of the current personality.
    pub async fn initialize(&self) {
        info!("chat controller starting with '{}'", self.personality().id);
        self.refresh_history().await;
    }

    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.update(|s| s.input = text);
    }

    /// Send the current input. No-op for blank input or while a response is
    /// awaited or being revealed.
    pub async fn send(&self) {
        let Some((turn, request)) = self.begin_turn() else {
            debug!("send ignored: input blank or response pending");
            return;
        };
        debug!("asking in session {}", request.session_id);

        let result = self.inner.api.ask(&request).await;
        if !self.is_current(turn, &request.session_id, &request.personality) {
            debug!("discarding late response for session {}", request.session_id);
            return;
        }

        match result {
            Ok(answer) => {
                if self.inner.response_delay_ms > 0 {
                    gloo_timers::future::TimeoutFuture::new(self.inner.response_delay_ms).await;
                    if !self.is_current(turn, &request.session_id, &request.personality) {
                        return;
                    }
                }
                self.start_reveal(answer);
            }
            Err(ApiError::Network(e)) => {
                error!("ask failed: {}", e);
                self.finish_turn(CONNECTION_ERROR_TEXT, false);
            }
            Err(ApiError::Unauthorized) => {
                warn!("ask rejected: credential no longer valid");
                self.finish_turn(SESSION_EXPIRED_TEXT, true);
            }
            Err(e) => {
                error!("ask failed: {}", e);
                self.start_reveal(SEND_ERROR_TEXT.to_string());
            }
        }
    }

    /// Optimistic half of a send: append the user turn, clear the input,
    /// allocate the session id if needed.
    fn begin_turn(&self) -> Option<(u64, AskRequest)> {
        if !self.read(ChatState::can_send) {
            return None;
        }
        let turn = bump(&self.inner.turn);
        let follow = self.inner.scroll.borrow().begin_response();
        let request = self.update(|s| {
            let question = s.input.trim().to_string();
            s.messages.push(ChatMessage::user(question.clone()));
            s.input.clear();
            s.is_typing = true;
            s.typing_text.clear();
            s.error = None;
            s.follow_output = follow;
            let personality = find(s.personality_id);
            AskRequest {
                question,
                session_id: s.ensure_session_id(),
                personality: personality.id.to_string(),
                system_prompt: personality.system_prompt.to_string(),
                has_file: s.attachment.has_file,
            }
        });
        Some((turn, request))
    }

    fn is_current(&self, turn: u64, session_id: &str, personality_id: &str) -> bool {
        self.inner.turn.get() == turn
            && self.read(|s| s.is_typing && s.is_active(session_id) && s.personality_id == personality_id)
    }

    fn start_reveal(&self, text: String) {
        *self.inner.reveal.borrow_mut() = Some(TypingReveal::new(text));
        self.update(|s| {
            s.revealing = true;
            s.typing_text.clear();
        });
    }

    /// End the turn with a message shown at once.
    fn finish_turn(&self, text: &str, expired: bool) {
        self.update(|s| {
            s.messages.push(ChatMessage::assistant(text));
            s.is_typing = false;
            s.revealing = false;
            s.typing_text.clear();
            if expired {
                s.session_expired = true;
            }
        });
    }

    /// Advance the reveal by one word. The caller refreshes history after
    /// [`RevealTick::Committed`].
    pub fn tick_reveal(&self) -> RevealTick {
        let step = {
            let mut reveal = self.inner.reveal.borrow_mut();
            let Some(active) = reveal.as_mut() else {
                return RevealTick::Idle;
            };
            let step = active.tick();
            let buffer = active.buffer().to_string();
            if matches!(step, RevealStep::Done(_)) {
                *reveal = None;
            }
            (step, buffer)
        };

        match step {
            (RevealStep::Appended, buffer) => {
                self.update(|s| s.typing_text = buffer);
                RevealTick::Typing
            }
            (RevealStep::Done(text), _) => {
                self.update(|s| {
                    s.messages.push(ChatMessage::assistant(text));
                    s.typing_text.clear();
                    s.is_typing = false;
                    s.revealing = false;
                });
                RevealTick::Committed
            }
        }
    }

    /// Drop whatever turn is in progress.
    fn abandon_turn(&self, s: &mut ChatState) {
        bump(&self.inner.turn);
        *self.inner.reveal.borrow_mut() = None;
        s.is_typing = false;
        s.revealing = false;
        s.typing_text.clear();
    }

    /// Open a session from the history list. Refused while a response is
    /// pending; returns whether the switch went ahead.
    pub async fn select_session(&self, session_id: &str) -> bool {
        if self.read(|s| s.is_typing) {
            debug!("session switch refused while a response is pending");
            return false;
        }
        self.load_session(session_id.to_string()).await
    }

    async fn load_session(&self, session_id: String) -> bool {
        let generation = bump(&self.inner.selection);
        let personality_id = self.read(|s| s.personality_id);
        let transcript =
            history::load_transcript(self.inner.api.as_ref(), &session_id, personality_id).await;

        if self.inner.selection.get() != generation {
            debug!("dropping superseded load of session {}", session_id);
            return false;
        }
        if self.read(|s| s.is_typing || s.personality_id != personality_id) {
            debug!("dropping load of session {}: state moved on", session_id);
            return false;
        }

        self.inner.scroll.borrow_mut().reset();
        self.update(|s| {
            let personality = find(s.personality_id);
            s.messages = if transcript.is_empty() {
                vec![ChatMessage::greeting(personality)]
            } else {
                transcript
            };
            s.active_session_id = Some(session_id);
            s.attachment.reset();
            s.follow_output = true;
            s.error = None;
        });
        true
    }

    /// Fresh conversation with a local placeholder entry in the history.
    pub fn new_chat(&self) {
        bump(&self.inner.selection);
        self.inner.scroll.borrow_mut().reset();
        self.update(|s| {
            self.abandon_turn(s);
            let personality = find(s.personality_id);
            let session_id = new_session_id();
            let title = format!("New Chat {}", s.history.len() + 1);
            s.history.insert(
                0,
                SessionSummary::placeholder(session_id.clone(), title, personality.greeting),
            );
            s.messages = vec![ChatMessage::greeting(personality)];
            s.active_session_id = Some(session_id);
            s.attachment.reset();
            s.follow_output = true;
            s.error = None;
        });
        debug!("started a new chat");
    }

    /// Delete a session after the user confirmed.
    pub async fn delete_session(&self, session_id: &str, confirmed: bool) {
        if !confirmed {
            return;
        }
        let marked = self.update(|s| {
            let entry = s
                .history
                .iter_mut()
                .find(|e| e.session_id == session_id && !e.is_deleting())?;
            Some(std::mem::replace(&mut entry.title, DELETING_TITLE.to_string()))
        });
        let Some(original_title) = marked else {
            debug!("delete ignored: {} not listed or already deleting", session_id);
            return;
        };

        let personality_id = self.read(|s| s.personality_id);
        debug!("deleting session {}", session_id);
        match self
            .inner
            .api
            .delete_session(session_id, personality_id)
            .await
        {
            Ok(()) => {
                info!("deleted session {}", session_id);
                let (was_active, next) = self.update(|s| {
                    s.history.retain(|e| e.session_id != session_id);
                    let was_active = s.is_active(session_id);
                    if was_active {
                        // Sends made before the replacement loads start a new conversation.
                        self.abandon_turn(s);
                        s.active_session_id = None;
                        s.messages = vec![ChatMessage::greeting(find(s.personality_id))];
                        s.attachment.reset();
                    }
                    (was_active, s.history.first().map(|e| e.session_id.clone()))
                });
                if was_active {
                    match next {
                        Some(next) => {
                            if !self.load_session(next).await {
                                debug!("replacement session load superseded");
                            }
                        }
                        None => self.new_chat(),
                    }
                }
            }
            Err(e) => {
                error!("failed to delete session {}: {}", session_id, e);
                self.update(|s| {
                    if let Some(entry) = s
                        .history
                        .iter_mut()
                        .find(|entry| entry.session_id == session_id)
                    {
                        entry.title = original_title;
                    }
                    s.error = Some(DELETE_ERROR_TEXT.to_string());
                    if e.is_auth_rejection() {
                        s.session_expired = true;
                    }
                });
            }
        }
    }

    /// Change persona: greeting-only transcript, no active session, history
    /// of the new persona.
    pub async fn switch_personality(&self, personality_id: &str) {
        let personality = find(personality_id);
        preferences::save_selected(self.inner.store.as_ref(), personality.id);
        bump(&self.inner.selection);
        self.inner.scroll.borrow_mut().reset();
        self.update(|s| {
            self.abandon_turn(s);
            s.personality_id = personality.id;
            s.messages = vec![ChatMessage::greeting(personality)];
            s.active_session_id = None;
            s.attachment.reset();
            s.history.clear();
            s.follow_output = true;
            s.error = None;
        });
        info!("switched personality to '{}'", personality.id);
        self.refresh_history().await;
    }

    /// Upload a document into the active session, allocating one first if
    /// the conversation has not started yet. Ignored while another upload is
    /// running. The ticket tells the view when to hide the banner.
    pub async fn upload(&self, file: A::File) -> Option<BannerTicket> {
        let file_name = file.file_name();
        let started = self.update(|s| {
            if s.attachment.is_uploading() {
                return None;
            }
            let session_id = s.ensure_session_id();
            let generation = s.attachment.begin(file_name.clone());
            Some((session_id, generation, s.personality_id))
        });
        let Some((session_id, generation, personality_id)) = started else {
            debug!("upload ignored: another upload is in progress");
            return None;
        };
        info!("uploading '{}' into session {}", file_name, session_id);

        let result = self
            .inner
            .api
            .upload_file(&file, &session_id, personality_id)
            .await;

        if self.read(|s| {
            s.attachment.banner_generation != generation || !s.is_active(&session_id)
        }) {
            debug!("discarding late upload result for session {}", session_id);
            return None;
        }

        let ticket = self.update(|s| match &result {
            Ok(()) => s.attachment.succeed(),
            Err(e) => {
                s.messages.push(ChatMessage::assistant(UPLOAD_ERROR_TEXT));
                if e.is_auth_rejection() {
                    s.session_expired = true;
                }
                s.attachment.fail()
            }
        });
        if let Err(e) = result {
            error!("upload of '{}' failed: {}", file_name, e);
        }
        Some(ticket)
    }

    pub fn hide_upload_banner(&self, generation: u64) {
        let hidden = self.inner.state.borrow_mut().attachment.hide_banner(generation);
        if hidden {
            self.update(|_| ());
        }
    }

    /// Debounced scroll position of the transcript.
    pub fn record_scroll(&self, sample: ScrollSample) {
        self.inner.scroll.borrow_mut().record(sample);
    }

    pub fn dismiss_error(&self) {
        self.update(|s| s.error = None);
    }

    /// Reload the history list. A local placeholder for the active session is
    /// kept until the backend knows about it.
    pub async fn refresh_history(&self) {
        let request = bump(&self.inner.history_request);
        let personality_id = self.update(|s| {
            s.is_loading_history = true;
            s.personality_id
        });

        let sessions = history::list_sessions(self.inner.api.as_ref(), personality_id).await;

        if self.inner.history_request.get() != request {
            debug!("dropping superseded history refresh");
            return;
        }
        self.update(|s| {
            s.is_loading_history = false;
            if s.personality_id != personality_id {
                return;
            }
            let mut sessions = sessions;
            if let Some(active) = s.active_session_id.as_deref() {
                let known = sessions.iter().any(|e| e.session_id == active);
                let placeholder = s
                    .history
                    .iter()
                    .find(|e| e.session_id == active && e.timestamp.is_empty());
                if let (false, Some(placeholder)) = (known, placeholder) {
                    sessions.insert(0, placeholder.clone());
                }
            }
            s.history = sessions;
        });
    }
}

//! Chat page view model

use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a002_chat::api::HttpChatApi;
use crate::domain::a002_chat::attachment::{BannerTicket, UploadStatus};
use crate::domain::a002_chat::controller::{ChatController, RevealTick};
use crate::domain::a002_chat::model::ChatState;
use crate::domain::a002_chat::scroll::ScrollSample;
use crate::shared::config::AppConfig;
use crate::shared::storage::{BrowserStorage, SharedStore};
use crate::system::auth::storage::CredentialStorage;

pub type BrowserChatController = ChatController<HttpChatApi>;

const DELETE_CONFIRMATION: &str =
    "Are you sure you want to delete this chat? This action cannot be undone.";

#[derive(Clone, Copy)]
pub struct ChatVm {
    controller: StoredValue<BrowserChatController, LocalStorage>,
    pub state: ReadSignal<ChatState>,
    reveal_timer: StoredValue<Option<Interval>, LocalStorage>,
    banner_timer: StoredValue<Option<Timeout>, LocalStorage>,
    scroll_timer: StoredValue<Option<Timeout>, LocalStorage>,
    /// File chosen in the picker, not uploaded yet. A new choice replaces it.
    pending_file: StoredValue<Option<web_sys::File>, LocalStorage>,
    pub pending_file_name: RwSignal<Option<String>>,
    reveal_interval_ms: u32,
    scroll_debounce_ms: u32,
    success_banner_ms: u32,
    fail_banner_ms: u32,
}

impl ChatVm {
    pub fn new(config: &AppConfig) -> Self {
        let store: SharedStore = Rc::new(BrowserStorage);
        let api = HttpChatApi::new(config.backend_base(), CredentialStorage::new(store.clone()));
        let controller = ChatController::new(Rc::new(api), store, &config.chat);

        let (state, set_state) = signal(controller.state());
        // In-flight requests may outlive the page; writes after disposal are dropped.
        controller.subscribe(move |s| {
            let _ = set_state.try_set(s.clone());
        });

        Self {
            controller: StoredValue::new_local(controller),
            state,
            reveal_timer: StoredValue::new_local(None),
            banner_timer: StoredValue::new_local(None),
            scroll_timer: StoredValue::new_local(None),
            pending_file: StoredValue::new_local(None),
            pending_file_name: RwSignal::new(None),
            reveal_interval_ms: config.chat.reveal_interval_ms,
            scroll_debounce_ms: config.chat.scroll_debounce_ms,
            success_banner_ms: config.upload.success_banner_ms,
            fail_banner_ms: config.upload.fail_banner_ms,
        }
    }

    fn controller(&self) -> BrowserChatController {
        self.controller.get_value()
    }

    pub fn initialize(&self) {
        let controller = self.controller();
        spawn_local(async move { controller.initialize().await });
    }

    pub fn set_input(&self, text: String) {
        self.controller().set_input(text);
    }

    pub fn send(&self) {
        let controller = self.controller();
        spawn_local(async move { controller.send().await });
    }

    /// Start or stop the reveal ticker to match `revealing`.
    pub fn drive_reveal(&self, revealing: bool) {
        let running = self.reveal_timer.with_value(Option::is_some);
        if revealing && !running {
            let controller = self.controller();
            let interval = Interval::new(self.reveal_interval_ms, move || {
                if controller.tick_reveal() == RevealTick::Committed {
                    let controller = controller.clone();
                    spawn_local(async move { controller.refresh_history().await });
                }
            });
            self.reveal_timer.set_value(Some(interval));
        } else if !revealing && running {
            self.reveal_timer.set_value(None);
        }
    }

    pub fn select(&self, session_id: String) {
        let controller = self.controller();
        spawn_local(async move {
            controller.select_session(&session_id).await;
        });
    }

    pub fn new_chat(&self) {
        self.controller().new_chat();
    }

    pub fn delete(&self, session_id: String) {
        let confirmed = window()
            .confirm_with_message(DELETE_CONFIRMATION)
            .unwrap_or(false);
        let controller = self.controller();
        spawn_local(async move {
            controller.delete_session(&session_id, confirmed).await;
        });
    }

    pub fn switch_personality(&self, personality_id: String) {
        let controller = self.controller();
        spawn_local(async move {
            controller.switch_personality(&personality_id).await;
        });
    }

    pub fn dismiss_error(&self) {
        self.controller().dismiss_error();
    }

    pub fn choose_file(&self, file: web_sys::File) {
        self.pending_file_name.set(Some(file.name()));
        self.pending_file.set_value(Some(file));
    }

    pub fn clear_file(&self) {
        self.pending_file.set_value(None);
        self.pending_file_name.set(None);
    }

    pub fn upload_pending(&self) {
        if self.state.with_untracked(|s| s.attachment.is_uploading()) {
            return;
        }
        let Some(file) = self.pending_file.try_update_value(Option::take).flatten() else {
            return;
        };
        self.pending_file_name.set(None);
        // A new upload supersedes the previous banner.
        self.banner_timer.set_value(None);

        let vm = *self;
        let controller = self.controller();
        spawn_local(async move {
            if let Some(ticket) = controller.upload(file).await {
                vm.arm_banner(ticket);
            }
        });
    }

    fn arm_banner(&self, ticket: BannerTicket) {
        let delay = match ticket.status {
            UploadStatus::Success => self.success_banner_ms,
            _ => self.fail_banner_ms,
        };
        let controller = self.controller();
        let timeout = Timeout::new(delay, move || controller.hide_upload_banner(ticket.generation));
        let _ = self.banner_timer.try_set_value(Some(timeout));
    }

    /// Scroll events are sampled after they settle.
    pub fn on_scroll(&self, sample: ScrollSample) {
        let controller = self.controller();
        let timeout = Timeout::new(self.scroll_debounce_ms, move || controller.record_scroll(sample));
        self.scroll_timer.set_value(Some(timeout));
    }

    /// Cancel every pending timer.
    pub fn teardown(&self) {
        self.reveal_timer.try_update_value(|t| *t = None);
        self.banner_timer.try_update_value(|t| *t = None);
        self.scroll_timer.try_update_value(|t| *t = None);
    }
}

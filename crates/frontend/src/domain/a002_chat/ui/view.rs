use leptos::prelude::*;
use thaw::*;

use super::composer::{Composer, UploadBanner};
use super::sidebar::ChatSidebar;
use super::view_model::ChatVm;
use crate::domain::a001_personality::{all, find};
use crate::domain::a002_chat::model::ChatMessage;
use crate::domain::a002_chat::scroll::ScrollSample;
use crate::shared::config::AppConfig;
use crate::shared::theme::ThemeToggle;
use crate::system::auth::context::{do_logout, use_auth};

#[component]
#[allow(non_snake_case)]
pub fn ChatPage() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let auth = use_auth();
    let vm = ChatVm::new(&config);
    vm.initialize();

    Effect::new(move |_| {
        let revealing = vm.state.with(|s| s.revealing);
        vm.drive_reveal(revealing);
    });

    // A chat request was rejected: drop the credential, the guard redirects.
    let expired = Memo::new(move |_| vm.state.with(|s| s.session_expired));
    Effect::new(move |_| {
        if expired.get() {
            auth.session().expire();
        }
    });

    on_cleanup(move || vm.teardown());

    view! {
        <div class="chat-layout">
            <ChatSidebar vm=vm />
            <main class="chat-main">
                <ChatHeader vm=vm />
                {move || {
                    vm.state
                        .with(|s| s.error.clone())
                        .map(|e| {
                            view! {
                                <div class="error-message chat-error">
                                    <span>{e}</span>
                                    <button class="icon-button" on:click=move |_| vm.dismiss_error()>
                                        "✕"
                                    </button>
                                </div>
                            }
                        })
                }}
                <Transcript vm=vm />
                <UploadBanner vm=vm />
                <Composer vm=vm />
            </main>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
fn ChatHeader(vm: ChatVm) -> impl IntoView {
    let auth = use_auth();
    let personality = move || find(vm.state.with(|s| s.personality_id));

    view! {
        <header class="chat-header">
            <div class="chat-persona">
                <span class=move || format!("persona-avatar bg-gradient-to-r {}", personality().color)>
                    {move || personality().icon}
                </span>
                <select
                    class="personality-select"
                    prop:value=move || vm.state.with(|s| s.personality_id)
                    on:change=move |ev| vm.switch_personality(event_target_value(&ev))
                >
                    {all()
                        .iter()
                        .map(|p| {
                            view! { <option value=p.id>{format!("{} {}", p.icon, p.name)}</option> }
                        })
                        .collect_view()}
                </select>
            </div>
            <Flex align=FlexAlign::Center style="gap: 8px;">
                <ThemeToggle />
                {move || {
                    auth.state
                        .with(|s| s.user.clone())
                        .map(|user| {
                            view! {
                                <span class="user-badge" title=user.email.clone()>
                                    {user
                                        .picture
                                        .clone()
                                        .map(|src| view! { <img class="user-avatar" src=src alt="" /> })}
                                    {user.name.clone()}
                                </span>
                            }
                        })
                }}
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| do_logout(auth)>
                    "Logout"
                </Button>
            </Flex>
        </header>
    }
}

#[component]
#[allow(non_snake_case)]
fn Transcript(vm: ChatVm) -> impl IntoView {
    let container = NodeRef::<leptos::html::Div>::new();

    // Follow new output only when the reader was at the bottom.
    Effect::new(move |_| {
        let follow = vm.state.with(|s| s.follow_output);
        if !follow {
            return;
        }
        if let Some(el) = container.get() {
            request_animation_frame(move || {
                el.set_scroll_top(el.scroll_height());
            });
        }
    });

    let on_scroll = move |_| {
        if let Some(el) = container.get_untracked() {
            vm.on_scroll(ScrollSample {
                scroll_top: el.scroll_top(),
                scroll_height: el.scroll_height(),
                client_height: el.client_height(),
            });
        }
    };

    let icon = move || find(vm.state.with(|s| s.personality_id)).icon;

    view! {
        <div class="transcript" node_ref=container on:scroll=on_scroll>
            <For
                each=move || vm.state.with(|s| s.messages.clone().into_iter().enumerate().collect::<Vec<_>>())
                key=|(i, m)| (*i, m.is_user, m.text.clone())
                children=move |(_, message)| view! { <MessageBubble message=message icon=icon() /> }
            />
            {move || {
                vm.state
                    .with(|s| s.is_typing)
                    .then(|| {
                        view! {
                            <div class="message assistant typing">
                                <span class="message-avatar">{icon}</span>
                                {move || {
                                    let text = vm.state.with(|s| s.typing_text.clone());
                                    if text.is_empty() {
                                        view! {
                                            <span class="typing-dots">
                                                <span></span>
                                                <span></span>
                                                <span></span>
                                            </span>
                                        }
                                            .into_any()
                                    } else {
                                        view! { <div class="message-text">{text}</div> }.into_any()
                                    }
                                }}
                            </div>
                        }
                    })
            }}
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
fn MessageBubble(message: ChatMessage, icon: &'static str) -> impl IntoView {
    let class = if message.is_user {
        "message user"
    } else {
        "message assistant"
    };
    view! {
        <div class=class>
            {(!message.is_user).then(|| view! { <span class="message-avatar">{icon}</span> })}
            <div class="message-text" style="white-space: pre-wrap;">{message.text}</div>
        </div>
    }
}

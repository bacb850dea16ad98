use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use thaw::*;

use crate::domain::a001_personality::ui::PersonalityPicker;
use crate::domain::a001_personality::{find, preferences};
use crate::shared::storage::BrowserStorage;
use crate::shared::theme::ThemeToggle;
use crate::system::auth::context::{do_logout, use_auth};

use super::layout::SiteNav;

/// `/` and `/home`: persona selection and the way into the chat.
#[component]
pub fn LandingPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let selected = RwSignal::new(preferences::load_selected(&BrowserStorage).id);

    let start = move |_| {
        let target = if auth.state.get_untracked().is_authenticated {
            "/chat"
        } else {
            "/login"
        };
        navigate(target, Default::default());
    };

    view! {
        <div class="landing">
            <header class="landing-header">
                <h1 class="brand">"NeuraChat"</h1>
                <SiteNav />
                <Flex align=FlexAlign::Center style="gap: 8px;">
                    <ThemeToggle />
                    {move || {
                        let state = auth.state.get();
                        if let Some(user) = state.user {
                            view! {
                                <span class="user-badge">{user.name}</span>
                                <Button
                                    appearance=ButtonAppearance::Secondary
                                    on_click=move |_| do_logout(auth)
                                >
                                    "Logout"
                                </Button>
                            }
                                .into_any()
                        } else if state.is_loading {
                            view! { <Spinner /> }.into_any()
                        } else {
                            view! { <a class="login-link" href="/login">"Sign in"</a> }.into_any()
                        }
                    }}
                </Flex>
            </header>

            <section class="landing-hero">
                <h2>"Pick a study companion"</h2>
                <button class="primary-button start-chat" on:click=start>
                    {move || format!("Start Chatting with {}", find(selected.get()).name)}
                </button>
            </section>

            <PersonalityPicker selected=selected />
        </div>
    }
}

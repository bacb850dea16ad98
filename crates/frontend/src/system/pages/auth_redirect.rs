use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use thaw::Spinner;
use wasm_bindgen::JsCast;

use crate::shared::config::AppConfig;
use crate::system::auth::context::use_auth;
use crate::system::auth::redirect::{complete_oauth, extract_credential};

fn current_search() -> String {
    window().location().search().unwrap_or_default()
}

fn current_cookies() -> String {
    document()
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
        .and_then(|d| d.cookie().ok())
        .unwrap_or_default()
}

/// Drop the credential from the address bar without adding a history entry.
fn strip_query() {
    let location = window().location();
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    if let Ok(history) = window().history() {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path));
    }
}

/// OAuth callback target (`/google`). Non-interactive.
#[component]
pub fn AuthRedirectPage() -> impl IntoView {
    let auth = use_auth();
    let settle_ms = expect_context::<AppConfig>().auth.redirect_settle_ms;
    let navigate = use_navigate();

    let credential = extract_credential(&current_search(), &current_cookies());
    strip_query();

    let session = auth.session();
    spawn_local(async move {
        let outcome = complete_oauth(&session, credential, || {
            gloo_timers::future::TimeoutFuture::new(settle_ms)
        })
        .await;
        navigate(
            &outcome.target(),
            NavigateOptions {
                replace: true,
                ..Default::default()
            },
        );
    });

    view! {
        <div class="auth-interstitial">
            <Spinner />
            <p>"Completing authentication..."</p>
        </div>
    }
}

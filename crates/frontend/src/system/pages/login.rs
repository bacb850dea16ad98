use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_query_map};
use leptos_router::NavigateOptions;
use thaw::*;

use crate::shared::config::AppConfig;
use crate::system::auth::api::{AuthApi, HttpAuthApi};
use crate::system::auth::context::use_auth;

/// Human text for the `error` query parameter set by the OAuth callback.
pub fn login_error_message(code: &str) -> &'static str {
    match code {
        "no_token" => "Sign-in did not return a credential. Please try again.",
        "token_invalid" => "Your sign-in could not be verified. Please try again.",
        "session_expired" => "Your session has expired. Please sign in again.",
        _ => "Sign-in failed. Please try again.",
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let config = expect_context::<AppConfig>();
    let query = use_query_map();
    let navigate = use_navigate();

    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    // Already signed in: skip the page.
    Effect::new(move |_| {
        let state = auth.state.get();
        if !state.is_loading && state.is_authenticated {
            navigate(
                "/chat",
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    let callback_error = move || {
        query
            .get()
            .get("error")
            .map(|code| login_error_message(&code).to_string())
    };

    let on_google = move |_| {
        set_is_loading.set(true);
        set_error_message.set(None);
        let api = HttpAuthApi::new(config.backend_base());

        spawn_local(async move {
            match api.google_auth_url().await {
                Ok(url) => {
                    log::info!("redirecting to OAuth provider");
                    if window().location().set_href(&url).is_err() {
                        set_error_message.set(Some("Could not open the sign-in page.".into()));
                        set_is_loading.set(false);
                    }
                }
                Err(e) => {
                    log::error!("failed to obtain OAuth URL: {}", e);
                    set_error_message.set(Some(format!("Login failed: {}", e)));
                    set_is_loading.set(false);
                }
            }
        });
    };

    let disabled = Signal::derive(move || is_loading.get());

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"NeuraChat"</h1>
                <h2>"Sign in to continue"</h2>

                {move || {
                    error_message
                        .get()
                        .or_else(callback_error)
                        .map(|e| view! { <div class="error-message">{e}</div> })
                }}

                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=on_google
                    disabled=disabled
                >
                    {move || if is_loading.get() { "Redirecting..." } else { "Continue with Google" }}
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_error_codes() {
        assert!(login_error_message("no_token").contains("credential"));
        assert!(login_error_message("token_invalid").contains("verified"));
        assert_eq!(
            login_error_message("something_else"),
            "Sign-in failed. Please try again."
        );
    }
}

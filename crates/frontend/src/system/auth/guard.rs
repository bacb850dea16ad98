use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use thaw::Spinner;

use super::context::use_auth;
use super::session::AuthSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardPhase {
    Verifying,
    Authenticated,
    Redirecting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardAction {
    RedirectToLogin,
}

impl GuardPhase {
    /// Advance on a new auth snapshot. `Redirecting` is terminal, so the
    /// redirect action is emitted at most once per guard.
    pub fn advance(&mut self, auth: &AuthSnapshot) -> Option<GuardAction> {
        if *self == GuardPhase::Redirecting || auth.is_loading {
            return None;
        }
        if auth.is_authenticated {
            *self = GuardPhase::Authenticated;
            None
        } else {
            *self = GuardPhase::Redirecting;
            Some(GuardAction::RedirectToLogin)
        }
    }
}

/// Component that requires authentication.
///
/// Shows an interstitial while the first check is pending and navigates to
/// `/login` once the session is known to be unauthenticated.
#[component]
pub fn RequireAuth(
    #[prop(optional, into)] redirect_to: Option<String>,
    children: ChildrenFn,
) -> impl IntoView {
    let auth = use_auth();
    let redirect_to = redirect_to.unwrap_or_else(|| "/login".to_string());
    let phase = RwSignal::new(GuardPhase::Verifying);
    let navigate = use_navigate();

    // Re-verify on mount unless the initial check is still running; the
    // effect below picks up its result.
    if !auth.state.get_untracked().is_loading {
        let session = auth.session();
        spawn_local(async move {
            session.check_auth().await;
        });
    }

    Effect::new(move |_| {
        let snapshot = auth.state.get();
        let mut next = phase.get_untracked();
        let action = next.advance(&snapshot);
        if next != phase.get_untracked() {
            phase.set(next);
        }
        if action == Some(GuardAction::RedirectToLogin) {
            log::info!("guard: not authenticated, redirecting to {}", redirect_to);
            navigate(
                &redirect_to,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    view! {
        {move || match phase.get() {
            GuardPhase::Verifying => view! {
                <div class="auth-interstitial">
                    <Spinner />
                    <p>"Checking authentication..."</p>
                </div>
            }.into_any(),
            GuardPhase::Authenticated => children().into_any(),
            GuardPhase::Redirecting => ().into_any(),
        }}
    }
}

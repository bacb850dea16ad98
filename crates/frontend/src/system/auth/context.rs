use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api::HttpAuthApi;
use super::session::{AuthSession, AuthSnapshot};
use super::storage::CredentialStorage;
use crate::shared::config::AppConfig;
use crate::shared::storage::BrowserStorage;

/// Injected handle to the application's single [`AuthSession`].
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: StoredValue<AuthSession, LocalStorage>,
    /// Mirror of the store, updated through its subscription.
    pub state: ReadSignal<AuthSnapshot>,
}

impl AuthContext {
    pub fn session(&self) -> AuthSession {
        self.session.get_value()
    }
}

/// Auth context provider component
///
/// Builds the store once, mirrors it into a signal and runs the initial check.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let session = AuthSession::new(
        Rc::new(HttpAuthApi::new(config.backend_base())),
        CredentialStorage::new(Rc::new(BrowserStorage)),
    );

    let (state, set_state) = signal(session.snapshot());
    session.subscribe(move |snapshot| set_state.set(snapshot.clone()));

    let init = session.clone();
    spawn_local(async move {
        init.initialize().await;
    });

    provide_context(AuthContext {
        session: StoredValue::new_local(session),
        state,
    });

    children()
}

/// Hook to access auth state
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthProvider not found in component tree")
}

/// Logout and let guards react to the state change.
pub fn do_logout(auth: AuthContext) {
    let session = auth.session();
    spawn_local(async move {
        session.logout().await;
    });
}

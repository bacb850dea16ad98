//! Authentication session store.
//!
//! One instance per application, created at the root and injected through
//! context. State changes are pushed to subscribers; nothing polls storage.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use contracts::system::auth::UserInfo;
use log::{debug, error, info, warn};

use super::api::AuthApi;
use super::storage::CredentialStorage;
use crate::shared::api_utils::mask_token;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthSnapshot {
    /// Before the first check resolves this is the cached identity, for
    /// display only.
    pub user: Option<UserInfo>,
    pub is_authenticated: bool,
    /// True only until the first verification resolves.
    pub is_loading: bool,
}

impl Default for AuthSnapshot {
    fn default() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            is_loading: true,
        }
    }
}

type Listener = Rc<dyn Fn(&AuthSnapshot)>;

struct Inner {
    api: Rc<dyn AuthApi>,
    storage: CredentialStorage,
    state: RefCell<AuthSnapshot>,
    checking: Cell<bool>,
    initialized: Cell<bool>,
    listeners: RefCell<Vec<Listener>>,
}

/// Resets the in-flight flag even if the check future is dropped mid-way.
struct CheckingGuard<'a>(&'a Cell<bool>);

impl Drop for CheckingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

#[derive(Clone)]
pub struct AuthSession {
    inner: Rc<Inner>,
}

impl AuthSession {
    pub fn new(api: Rc<dyn AuthApi>, storage: CredentialStorage) -> Self {
        let state = AuthSnapshot {
            user: storage.cached_user(),
            ..AuthSnapshot::default()
        };
        Self {
            inner: Rc::new(Inner {
                api,
                storage,
                state: RefCell::new(state),
                checking: Cell::new(false),
                initialized: Cell::new(false),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        self.inner.state.borrow().clone()
    }

    /// A verification round trip is currently in flight.
    pub fn is_checking(&self) -> bool {
        self.inner.checking.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated
    }

    /// Register a listener; it is called immediately with the current state
    /// and after every change.
    pub fn subscribe(&self, listener: impl Fn(&AuthSnapshot) + 'static) {
        let listener: Listener = Rc::new(listener);
        listener(&self.snapshot());
        self.inner.listeners.borrow_mut().push(listener);
    }

    fn update(&self, f: impl FnOnce(&mut AuthSnapshot)) {
        let snapshot = {
            let mut state = self.inner.state.borrow_mut();
            f(&mut state);
            state.clone()
        };
        let listeners: Vec<Listener> = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    /// The automatic first check. Runs at most once per store.
    pub async fn initialize(&self) {
        if self.inner.initialized.replace(true) {
            debug!("auth session already initialized");
            return;
        }
        info!("starting initial auth check");
        self.check_auth().await;
    }

    /// Persist a freshly issued credential (OAuth completion). Validity is
    /// only established by the next [`check_auth`](Self::check_auth).
    pub fn store_credential(&self, token: &str) {
        debug!("storing credential {}", mask_token(token));
        self.inner.storage.save_token(token);
    }

    /// Verify the stored credential with the backend.
    ///
    /// While a verification is in flight, further calls return the last known
    /// result without touching the network.
    pub async fn check_auth(&self) -> bool {
        if self.inner.checking.get() {
            debug!("auth check already in progress, reusing last result");
            return self.is_authenticated();
        }
        self.inner.checking.set(true);
        let _guard = CheckingGuard(&self.inner.checking);

        let Some(token) = self.inner.storage.token() else {
            debug!("no credential stored");
            self.set_unauthenticated();
            return false;
        };

        debug!("verifying credential {}", mask_token(&token));
        match self.inner.api.verify(&token).await {
            Ok(user) => {
                info!("authenticated as {}", user.email);
                self.inner.storage.save_user(&user);
                self.update(|s| {
                    s.user = Some(user);
                    s.is_authenticated = true;
                    s.is_loading = false;
                });
                true
            }
            Err(err) => {
                if err.is_auth_rejection() {
                    // A newer credential may have been stored during the round trip.
                    if self.inner.storage.token().as_deref() == Some(token.as_str()) {
                        warn!("credential rejected, discarding it");
                        self.inner.storage.clear_credential();
                    } else {
                        warn!("credential rejected, but it was already replaced");
                    }
                } else {
                    warn!("auth check failed: {}", err);
                }
                self.set_unauthenticated();
                false
            }
        }
    }

    /// Some other endpoint rejected the credential.
    pub fn expire(&self) {
        warn!("session expired");
        self.inner.storage.clear_credential();
        self.set_unauthenticated();
    }

    /// Best-effort backend notification, then an unconditional local reset.
    pub async fn logout(&self) {
        let token = self.inner.storage.token();
        debug!("notifying backend of logout");
        if let Err(err) = self.inner.api.logout(token.as_deref()).await {
            error!("logout request failed, clearing local session anyway: {}", err);
        }
        self.inner.storage.clear_all();
        self.set_unauthenticated();
        info!("logged out");
    }

    fn set_unauthenticated(&self) {
        self.update(|s| {
            s.user = None;
            s.is_authenticated = false;
            s.is_loading = false;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_utils::ApiError;
    use crate::shared::storage::{KeyValueStore, MemoryStorage};
    use crate::domain::a001_personality::preferences;
    use async_trait::async_trait;

    struct FakeAuthApi {
        verify_result: RefCell<Result<UserInfo, ApiError>>,
        logout_result: Result<(), ApiError>,
        verify_calls: Cell<usize>,
        logout_tokens: RefCell<Vec<Option<String>>>,
    }

    impl FakeAuthApi {
        fn new(verify_result: Result<UserInfo, ApiError>) -> Rc<Self> {
            Rc::new(Self {
                verify_result: RefCell::new(verify_result),
                logout_result: Ok(()),
                verify_calls: Cell::new(0),
                logout_tokens: RefCell::new(Vec::new()),
            })
        }

        fn failing_logout(verify_result: Result<UserInfo, ApiError>) -> Rc<Self> {
            Rc::new(Self {
                verify_result: RefCell::new(verify_result),
                logout_result: Err(ApiError::Network("offline".into())),
                verify_calls: Cell::new(0),
                logout_tokens: RefCell::new(Vec::new()),
            })
        }
    }

    #[async_trait(?Send)]
    impl AuthApi for FakeAuthApi {
        async fn verify(&self, _token: &str) -> Result<UserInfo, ApiError> {
            self.verify_calls.set(self.verify_calls.get() + 1);
            tokio::task::yield_now().await;
            self.verify_result.borrow().clone()
        }

        async fn logout(&self, token: Option<&str>) -> Result<(), ApiError> {
            self.logout_tokens
                .borrow_mut()
                .push(token.map(str::to_string));
            self.logout_result.clone()
        }

        async fn google_auth_url(&self) -> Result<String, ApiError> {
            Ok("https://accounts.example.com/o/oauth2".into())
        }
    }

    fn user() -> UserInfo {
        UserInfo {
            id: "7".into(),
            email: "lee@example.com".into(),
            name: "Lee".into(),
            picture: None,
        }
    }

    fn session_with(api: Rc<FakeAuthApi>, mem: &MemoryStorage) -> AuthSession {
        AuthSession::new(api, CredentialStorage::new(Rc::new(mem.clone())))
    }

    #[tokio::test]
    async fn test_concurrent_checks_issue_one_request() {
        let api = FakeAuthApi::new(Ok(user()));
        let mem = MemoryStorage::new();
        mem.set(ACCESS_TOKEN_FOR_TESTS, "tok-123");
        let session = session_with(api.clone(), &mem);

        let (a, b, c) = futures::join!(
            session.check_auth(),
            session.check_auth(),
            session.check_auth()
        );

        assert_eq!(api.verify_calls.get(), 1);
        assert!(a);
        // Overlapping callers see the last known value.
        assert!(!b && !c);
        assert!(session.is_authenticated());

        // Once settled, a new check performs a new round trip.
        assert!(session.check_auth().await);
        assert_eq!(api.verify_calls.get(), 2);
    }

    #[tokio::test]
    async fn test_cached_identity_is_shown_until_verified() {
        let api = FakeAuthApi::new(Err(ApiError::Unauthorized));
        let mem = MemoryStorage::new();
        mem.set(ACCESS_TOKEN_FOR_TESTS, "tok-123");
        CredentialStorage::new(Rc::new(mem.clone())).save_user(&user());
        let session = session_with(api, &mem);

        let before = session.snapshot();
        assert_eq!(before.user, Some(user()));
        assert!(before.is_loading);
        assert!(!before.is_authenticated);

        assert!(!session.check_auth().await);
        assert!(session.snapshot().user.is_none());
    }

    #[tokio::test]
    async fn test_no_credential_fails_fast() {
        let api = FakeAuthApi::new(Ok(user()));
        let mem = MemoryStorage::new();
        let session = session_with(api.clone(), &mem);

        assert!(!session.check_auth().await);
        assert_eq!(api.verify_calls.get(), 0);
        assert!(!session.snapshot().is_loading);
    }

    #[tokio::test]
    async fn test_unauthorized_discards_credential() {
        let api = FakeAuthApi::new(Err(ApiError::Unauthorized));
        let mem = MemoryStorage::new();
        mem.set(ACCESS_TOKEN_FOR_TESTS, "stale");
        let session = session_with(api.clone(), &mem);

        assert!(!session.check_auth().await);
        assert!(mem.get(ACCESS_TOKEN_FOR_TESTS).is_none());

        // Subsequent checks no longer reach the network.
        assert!(!session.check_auth().await);
        assert_eq!(api.verify_calls.get(), 1);
    }

    #[tokio::test]
    async fn test_transient_failure_keeps_credential() {
        let api = FakeAuthApi::new(Err(ApiError::Status(502)));
        let mem = MemoryStorage::new();
        mem.set(ACCESS_TOKEN_FOR_TESTS, "tok");
        let session = session_with(api.clone(), &mem);

        assert!(!session.check_auth().await);
        assert_eq!(mem.get(ACCESS_TOKEN_FOR_TESTS).as_deref(), Some("tok"));
        assert!(session.snapshot().user.is_none());
    }

    #[tokio::test]
    async fn test_malformed_payload_is_unauthenticated() {
        let api = FakeAuthApi::new(Err(ApiError::Decode("missing user".into())));
        let mem = MemoryStorage::new();
        mem.set(ACCESS_TOKEN_FOR_TESTS, "tok");
        let session = session_with(api, &mem);
        assert!(!session.check_auth().await);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_loading_flag_never_returns() {
        let api = FakeAuthApi::new(Ok(user()));
        let mem = MemoryStorage::new();
        mem.set(ACCESS_TOKEN_FOR_TESTS, "tok");
        let session = session_with(api, &mem);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        session.subscribe(move |s| sink.borrow_mut().push(s.is_loading));

        session.check_auth().await;
        session.check_auth().await;

        let seen = seen.borrow();
        assert_eq!(seen.first(), Some(&true));
        assert!(seen[1..].iter().all(|loading| !loading));
    }

    #[tokio::test]
    async fn test_initialize_runs_once() {
        let api = FakeAuthApi::new(Ok(user()));
        let mem = MemoryStorage::new();
        mem.set(ACCESS_TOKEN_FOR_TESTS, "tok");
        let session = session_with(api.clone(), &mem);

        session.initialize().await;
        session.initialize().await;
        session.clone().initialize().await;
        assert_eq!(api.verify_calls.get(), 1);
    }

    #[tokio::test]
    async fn test_logout_clears_state_when_backend_fails() {
        let api = FakeAuthApi::failing_logout(Ok(user()));
        let mem = MemoryStorage::new();
        mem.set(ACCESS_TOKEN_FOR_TESTS, "tok");
        preferences::save_selected(&mem, "buddy");
        let session = session_with(api.clone(), &mem);
        assert!(session.check_auth().await);

        session.logout().await;

        assert!(!session.is_authenticated());
        assert!(session.snapshot().user.is_none());
        assert!(mem.get(ACCESS_TOKEN_FOR_TESTS).is_none());
        assert!(mem.is_empty());
        // The credential was still sent with the notification.
        assert_eq!(
            api.logout_tokens.borrow().as_slice(),
            &[Some("tok".to_string())]
        );
    }

    #[tokio::test]
    async fn test_expire_notifies_subscribers() {
        let api = FakeAuthApi::new(Ok(user()));
        let mem = MemoryStorage::new();
        mem.set(ACCESS_TOKEN_FOR_TESTS, "tok");
        let session = session_with(api, &mem);
        session.check_auth().await;

        let last = Rc::new(RefCell::new(None));
        let sink = last.clone();
        session.subscribe(move |s| *sink.borrow_mut() = Some(s.is_authenticated));
        assert_eq!(*last.borrow(), Some(true));

        session.expire();
        assert_eq!(*last.borrow(), Some(false));
        assert!(mem.get(ACCESS_TOKEN_FOR_TESTS).is_none());
    }

    const ACCESS_TOKEN_FOR_TESTS: &str = "auth_token";
}

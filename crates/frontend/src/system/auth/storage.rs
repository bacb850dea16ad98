use contracts::system::auth::UserInfo;

use crate::domain::a001_personality::preferences;
use crate::shared::storage::SharedStore;

const ACCESS_TOKEN_KEY: &str = "auth_token";
const USER_KEY: &str = "auth_user";

/// Owner of the persisted credential slot and the cached identity.
#[derive(Clone)]
pub struct CredentialStorage {
    store: SharedStore,
}

impl CredentialStorage {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Save the bearer credential
    pub fn save_token(&self, token: &str) {
        self.store.set(ACCESS_TOKEN_KEY, token);
    }

    /// Stored credential; blank values count as absent.
    pub fn token(&self) -> Option<String> {
        self.store
            .get(ACCESS_TOKEN_KEY)
            .filter(|t| !t.trim().is_empty())
    }

    pub fn save_user(&self, user: &UserInfo) {
        match serde_json::to_string(user) {
            Ok(json) => self.store.set(USER_KEY, &json),
            Err(e) => log::warn!("could not cache user identity: {}", e),
        }
    }

    /// Cached identity; a corrupt entry is treated as missing.
    pub fn cached_user(&self) -> Option<UserInfo> {
        let raw = self.store.get(USER_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    /// Credential and identity are invalidated together.
    pub fn clear_credential(&self) {
        self.store.remove(ACCESS_TOKEN_KEY);
        self.store.remove(USER_KEY);
    }

    /// Everything tied to the signed-in user, including the persona preference.
    pub fn clear_all(&self) {
        self.clear_credential();
        preferences::clear_selected(self.store.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::{KeyValueStore, MemoryStorage};
    use std::rc::Rc;

    fn user() -> UserInfo {
        UserInfo {
            id: "42".into(),
            email: "kim@example.com".into(),
            name: "Kim".into(),
            picture: Some("https://example.com/kim.png".into()),
        }
    }

    #[test]
    fn test_blank_token_is_absent() {
        let mem = MemoryStorage::new();
        let storage = CredentialStorage::new(Rc::new(mem.clone()));
        storage.save_token("   ");
        assert!(storage.token().is_none());
        storage.save_token("abc");
        assert_eq!(storage.token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_user_cache_round_trip_and_corruption() {
        let mem = MemoryStorage::new();
        let storage = CredentialStorage::new(Rc::new(mem.clone()));
        storage.save_user(&user());
        assert_eq!(storage.cached_user(), Some(user()));

        mem.set(USER_KEY, "{not json");
        assert!(storage.cached_user().is_none());
    }

    #[test]
    fn test_clear_all_removes_preference() {
        let mem = MemoryStorage::new();
        let storage = CredentialStorage::new(Rc::new(mem.clone()));
        storage.save_token("abc");
        storage.save_user(&user());
        preferences::save_selected(&mem, "blaze");

        storage.clear_all();
        assert!(mem.is_empty());
    }
}

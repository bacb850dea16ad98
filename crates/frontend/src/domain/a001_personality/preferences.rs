//! "Last selected personality" preference. Only the id is stored so a
//! persona whose metadata changes never resurfaces stale.

use crate::shared::storage::KeyValueStore;

use super::registry::{self, Personality};

pub const SELECTED_PERSONALITY_KEY: &str = "selected_personality";

/// The persisted persona, resolved through the registry (unknown ids fall back).
pub fn load_selected(store: &dyn KeyValueStore) -> &'static Personality {
    match store.get(SELECTED_PERSONALITY_KEY) {
        Some(id) => registry::find(&id),
        None => registry::default_personality(),
    }
}

pub fn save_selected(store: &dyn KeyValueStore, id: &str) {
    store.set(SELECTED_PERSONALITY_KEY, id);
}

pub fn clear_selected(store: &dyn KeyValueStore) {
    store.remove(SELECTED_PERSONALITY_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;

    #[test]
    fn test_round_trip_and_clear() {
        let store = MemoryStorage::new();
        assert_eq!(load_selected(&store).id, "scholar");

        save_selected(&store, "quest");
        assert_eq!(load_selected(&store).id, "quest");

        clear_selected(&store);
        assert_eq!(load_selected(&store).id, "scholar");
    }

    #[test]
    fn test_stale_preference_resolves_to_default() {
        let store = MemoryStorage::new();
        store.set(SELECTED_PERSONALITY_KEY, "sage");
        assert_eq!(load_selected(&store).id, "scholar");
    }
}

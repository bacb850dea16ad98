//! Theme management module for the application.
//!
//! Light and dark themes; the preference is persisted in localStorage and
//! exposed through context.

use leptos::prelude::*;
use web_sys::window;

use crate::shared::storage::{BrowserStorage, KeyValueStore};

/// Available themes in the application.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Returns the theme name as a string (used for the data attribute and storage).
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse theme from string; unknown values fall back to the default.
    pub fn from_str(s: &str) -> Self {
        match s {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Tooltip for the toggle button.
    pub fn toggle_hint(&self) -> &'static str {
        match self {
            Theme::Light => "Switch to dark mode",
            Theme::Dark => "Switch to light mode",
        }
    }
}

const THEME_STORAGE_KEY: &str = "app_theme";

pub fn load_theme(store: &dyn KeyValueStore) -> Theme {
    store
        .get(THEME_STORAGE_KEY)
        .map(|s| Theme::from_str(&s))
        .unwrap_or_default()
}

pub fn save_theme(store: &dyn KeyValueStore, theme: Theme) {
    store.set(THEME_STORAGE_KEY, theme.as_str());
}

/// Set `data-theme` on `<html>` and toggle the `dark` class used by the stylesheet.
fn apply_theme(theme: Theme) {
    let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    let _ = root.set_attribute("data-theme", theme.as_str());
    let class_list = root.class_list();
    let _ = match theme {
        Theme::Dark => class_list.add_1("dark"),
        Theme::Light => class_list.remove_1("dark"),
    };
}

/// Theme context type.
#[derive(Clone, Copy)]
pub struct ThemeContext {
    /// Current theme signal.
    pub theme: RwSignal<Theme>,
}

impl ThemeContext {
    /// Set the theme and persist to storage.
    pub fn set_theme(&self, theme: Theme) {
        self.theme.set(theme);
        save_theme(&BrowserStorage, theme);
        apply_theme(theme);
    }

    pub fn toggle(&self) {
        self.set_theme(self.theme.get_untracked().toggled());
    }
}

/// Provides theme context to children components.
#[component]
pub fn ThemeProvider(children: Children) -> impl IntoView {
    let initial_theme = load_theme(&BrowserStorage);
    apply_theme(initial_theme);

    provide_context(ThemeContext {
        theme: RwSignal::new(initial_theme),
    });

    children()
}

/// Hook to use the theme context.
pub fn use_theme() -> ThemeContext {
    expect_context::<ThemeContext>()
}

/// Light/dark toggle button.
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let ctx = use_theme();

    view! {
        <button
            class="icon-button theme-toggle"
            title=move || ctx.theme.get().toggle_hint()
            on:click=move |_| ctx.toggle()
        >
            {move || match ctx.theme.get() {
                Theme::Light => "☾",
                Theme::Dark => "☀",
            }}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;

    #[test]
    fn test_unknown_theme_falls_back_to_light() {
        assert_eq!(Theme::from_str("forest"), Theme::Light);
        assert_eq!(Theme::from_str("dark"), Theme::Dark);
    }

    #[test]
    fn test_theme_persists_through_store() {
        let store = MemoryStorage::new();
        assert_eq!(load_theme(&store), Theme::Light);
        save_theme(&store, Theme::Light.toggled());
        assert_eq!(load_theme(&store), Theme::Dark);
    }
}

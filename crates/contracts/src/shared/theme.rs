//! Light/dark theme flag persisted in local storage.

use super::storage::KeyValueStore;

/// Available themes in the quiz application.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Returns the theme name as a string (used for the attribute and storage).
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse theme from string. Anything but `"dark"` is light.
    pub fn from_str(s: &str) -> Self {
        match s {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// Theme selected by the toggle checkbox state.
    pub fn from_toggle(checked: bool) -> Self {
        if checked {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }
}

/// Theme to apply on page load and whether it must be written back.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct InitialTheme {
    pub theme: Theme,
    pub persist: bool,
}

/// A stored preference always wins. Without one, a dark system preference
/// selects dark and is persisted; otherwise light is used and nothing stored.
pub fn resolve_initial(stored: Option<&str>, prefers_dark: bool) -> InitialTheme {
    match stored {
        Some(s) => InitialTheme {
            theme: Theme::from_str(s),
            persist: false,
        },
        None if prefers_dark => InitialTheme {
            theme: Theme::Dark,
            persist: true,
        },
        None => InitialTheme {
            theme: Theme::Light,
            persist: false,
        },
    }
}

/// Load the stored theme. Storage failures read as "nothing stored".
pub fn load_theme(store: &impl KeyValueStore, key: &str) -> Option<String> {
    match store.get_item(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("theme not readable: {}", e);
            None
        }
    }
}

/// Save theme to storage.
pub fn save_theme(store: &mut impl KeyValueStore, key: &str, theme: Theme) {
    if let Err(e) = store.set_item(key, theme.as_str()) {
        log::warn!("theme not saved: {}", e);
    }
}

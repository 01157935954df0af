//! Theme management for the quiz application.
//!
//! A `#checkbox` toggle switches between light and dark. The choice is kept
//! in localStorage and applied as `data-theme` on the document element.

use contracts::shared::config::ThemeConfig;
use contracts::shared::theme::{load_theme, resolve_initial, save_theme, Theme};
use web_sys::{window, HtmlInputElement};

use super::dom;
use super::storage::BrowserStorage;

/// Apply theme by setting the attribute on `<html>`.
fn apply_theme(attribute: &str, theme: Theme) {
    let Some(root) = dom::document().and_then(|d| d.document_element()) else {
        return;
    };
    let _ = root.set_attribute(attribute, theme.as_str());
}

fn system_prefers_dark(query: &str) -> bool {
    window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|m| m.matches())
        .unwrap_or(false)
}

pub fn init(config: &ThemeConfig) {
    let Some(toggle) = dom::query::<HtmlInputElement>(&config.toggle_selector) else {
        return;
    };
    let store = BrowserStorage::local();

    // Set initial theme from localStorage, else from the system preference
    let stored = store.as_ref().and_then(|s| load_theme(s, &config.storage_key));
    let initial = resolve_initial(stored.as_deref(), system_prefers_dark(&config.dark_media_query));
    apply_theme(&config.attribute, initial.theme);
    toggle.set_checked(initial.theme.is_dark());
    if initial.persist {
        if let Some(mut store) = store.clone() {
            save_theme(&mut store, &config.storage_key, initial.theme);
        }
    }
    log::debug!("theme initialized: {}", initial.theme.as_str());

    let config = config.clone();
    let toggle_in_handler = toggle.clone();
    let mut store = store;
    dom::listen(&toggle, "change", move |_| {
        let theme = Theme::from_toggle(toggle_in_handler.checked());
        apply_theme(&config.attribute, theme);
        if let Some(store) = store.as_mut() {
            save_theme(store, &config.storage_key, theme);
        }
    });
}

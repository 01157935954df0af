//! Keeps the analyze form's last submitted filters across page reloads.

use contracts::shared::config::FilterPersistenceConfig;
use contracts::shared::filter_state::{capture_on_submit, restore_on_load, RestoreOutcome};
use web_sys::HtmlFormElement;

use super::dom;
use super::dom_form::DomForm;
use super::storage::BrowserStorage;

pub fn init(config: &FilterPersistenceConfig) {
    let Some(form) = dom::query::<HtmlFormElement>(&config.form_selector) else {
        return;
    };
    let Some(store) = BrowserStorage::session() else {
        log::warn!("sessionStorage unavailable, filters will not persist");
        return;
    };

    // Save form state on submission
    let submit_form = DomForm::new(form.clone());
    let mut submit_store = store.clone();
    let submit_config = config.clone();
    dom::listen(&form, "submit", move |_| {
        if let Err(e) = capture_on_submit(&submit_form, &mut submit_store, &submit_config) {
            log::warn!("filter state not saved: {}", e);
        }
    });

    let mut page_form = DomForm::new(form);
    match restore_on_load(&mut page_form, &store, config) {
        RestoreOutcome::Restored(fields) => log::info!("restored filters: {:?}", fields),
        outcome => log::debug!("filter restore: {:?}", outcome),
    }
}

//! Prevents empty values being submitted for numeric filter fields.

use contracts::shared::config::ValidationConfig;
use contracts::shared::form::submitted_values;
use contracts::shared::numeric_input::normalize_number;
use contracts::shared::storage::KeyValueStore;
use wasm_bindgen::JsCast;
use web_sys::{HtmlFormElement, HtmlInputElement};

use super::dom;
use super::dom_form::DomForm;
use super::storage::BrowserStorage;

fn normalize_number_inputs(form: &HtmlFormElement) {
    let Ok(inputs) = form.query_selector_all(r#"input[type="number"]"#) else {
        return;
    };
    for i in 0..inputs.length() {
        let Some(input) = inputs
            .item(i)
            .and_then(|n| n.dyn_into::<HtmlInputElement>().ok())
        else {
            continue;
        };
        let value = input.value();
        log::debug!("Processing input {} with value {:?}", input.name(), value);
        if let Some(replacement) = normalize_number(&value) {
            log::debug!("Setting {} to {}", input.name(), replacement);
            input.set_value(replacement);
        }
    }
}

/// Debug copy of what is about to be submitted.
fn save_snapshot(form: &DomForm, key: &str) {
    let values = submitted_values(form);
    let Some(mut store) = BrowserStorage::local() else {
        return;
    };
    let Ok(json) = serde_json::to_string(&values) else {
        return;
    };
    match store.set_item(key, &json) {
        Ok(()) => log::debug!("Saved form values to localStorage: {}", json),
        Err(e) => log::warn!("form snapshot not saved: {}", e),
    }
}

/// Tags submissions with their source page; added once.
fn append_source_field(form: &HtmlFormElement, name: &str, value: &str) {
    let selector = format!(r#"input[name="{}"]"#, name);
    if form.query_selector(&selector).ok().flatten().is_some() {
        return;
    }
    let Some(document) = dom::document() else {
        return;
    };
    let Some(hidden) = document
        .create_element("input")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    hidden.set_type("hidden");
    hidden.set_name(name);
    hidden.set_value(value);
    let _ = form.append_child(&hidden);
}

pub fn init(config: &ValidationConfig) {
    let Some(form) = dom::by_id::<HtmlFormElement>(&config.form_id) else {
        return;
    };
    log::info!("Filter form found, adding validation");

    let snapshot_key = config.snapshot_key.clone();
    let submit_form = DomForm::new(form.clone());
    dom::listen(&form, "submit", move |_| {
        log::debug!("Form submitted");
        normalize_number_inputs(submit_form.element());
        save_snapshot(&submit_form, &snapshot_key);
    });

    append_source_field(&form, &config.source_field, &config.source_value);
}

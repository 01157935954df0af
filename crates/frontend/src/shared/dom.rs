//! Small DOM helpers shared by the page behaviours.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget};

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// First element matching `selector`, cast to `T`.
pub fn query<T: JsCast>(selector: &str) -> Option<T> {
    document()?
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<T>()
        .ok()
}

/// Element with the given id, cast to `T`.
pub fn by_id<T: JsCast>(id: &str) -> Option<T> {
    document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Runs `f` once the document is parsed: immediately if it already is,
/// otherwise on `DOMContentLoaded`.
pub fn on_ready(f: impl FnOnce() + 'static) {
    let Some(document) = document() else {
        return;
    };
    if document.ready_state() != "loading" {
        f();
        return;
    }
    let callback = Closure::once_into_js(f);
    if document
        .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        .is_err()
    {
        log::warn!("could not attach `DOMContentLoaded` listener");
    }
}

/// Registers `handler` for `event` on `target` for the lifetime of the page.
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("could not attach `{}` listener", event);
    }
    closure.forget(); // Keep the closure alive
}

/// Creates `<tag class="...">`.
pub fn create_with_class(document: &Document, tag: &str, class: &str) -> Option<Element> {
    let element = document.create_element(tag).ok()?;
    element.set_class_name(class);
    Some(element)
}

//! Shared modal scaffolding. Keeps the backdrop/content boilerplate in one
//! place so the feature modals only build their inner markup.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::dom_utils;

/// Ensure a `<div id="{id}" class="modal">` backdrop with a
/// `<div class="modal-content">` child exists and return both.
pub fn ensure_modal(document: &Document, id: &str) -> Result<(Element, Element), JsValue> {
    let backdrop = if let Some(el) = document.get_element_by_id(id) {
        el
    } else {
        let el = document.create_element("div")?;
        el.set_id(id);
        el.set_class_name("modal");
        dom_utils::hide(&el);
        document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?
            .append_child(&el)?;
        el
    };

    let content = if let Some(el) = backdrop.query_selector(".modal-content")? {
        el
    } else {
        let el = document.create_element("div")?;
        el.set_class_name("modal-content");
        backdrop.append_child(&el)?;
        el
    };

    Ok((backdrop, content))
}

pub fn show(backdrop: &Element) {
    dom_utils::show(backdrop);
    dom_utils::focus_first_interactive(backdrop);
}

pub fn hide(backdrop: &Element) {
    dom_utils::hide(backdrop);
}

/// Hide the modal with the given id if it exists.
pub fn hide_by_id(id: &str) {
    if let Some(document) = dom_utils::document() {
        if let Some(el) = document.get_element_by_id(id) {
            hide(&el);
        }
    }
}

//! Thin helpers for repetitive DOM operations so the components do not
//! sprinkle raw attribute pokes everywhere.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement};

/// Make the element visible by toggling CSS classes.
pub fn show(el: &Element) {
    let _ = el.class_list().remove_1("hidden");
    let _ = el.class_list().add_1("visible");
}

/// Hide the element by toggling CSS classes.
pub fn hide(el: &Element) {
    let _ = el.class_list().remove_1("visible");
    let _ = el.class_list().add_1("hidden");
}

/// Mark a nav tab as the active one.
pub fn set_active(btn: &Element) {
    btn.set_class_name("tab-button active");
}

pub fn set_inactive(btn: &Element) {
    btn.set_class_name("tab-button");
}

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

/// Native confirmation dialog. A missing window counts as a decline.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Fetch an `<input>` by id. None when missing or of a different type.
pub fn input_by_id(document: &Document, id: &str) -> Option<HtmlInputElement> {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
}

pub fn select_by_id(document: &Document, id: &str) -> Option<HtmlSelectElement> {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlSelectElement>().ok())
}

pub fn input_value(document: &Document, id: &str) -> String {
    input_by_id(document, id).map(|i| i.value()).unwrap_or_default()
}

/// Remove all children. Cheaper than rebuilding the parent node itself.
pub fn clear_children(el: &Element) {
    el.set_inner_html("");
}

/// Focus the first interactive element inside the container.
pub fn focus_first_interactive(container: &Element) -> bool {
    let selectors =
        "input:not([disabled]), button:not([disabled]), textarea:not([disabled]), select:not([disabled])";
    if let Ok(Some(el)) = container.query_selector(selectors) {
        if let Ok(html_el) = el.dyn_into::<HtmlElement>() {
            return html_el.focus().is_ok();
        }
    }
    false
}

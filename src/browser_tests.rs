//! Browser-only checks for the DOM plumbing the native tests cannot reach.

use wasm_bindgen_test::*;

use crate::components::modal;
use crate::dom_utils;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn toast_mounts_a_single_root() {
    crate::toast::success("first");
    crate::toast::error("second");

    let document = dom_utils::document().unwrap();
    let roots = document.query_selector_all("#toast-root").unwrap();
    assert_eq!(roots.length(), 1);

    let root = document.get_element_by_id("toast-root").unwrap();
    assert_eq!(root.child_element_count(), 2);
}

#[wasm_bindgen_test]
fn ensure_modal_is_idempotent() {
    let document = dom_utils::document().unwrap();

    let (backdrop_a, content_a) = modal::ensure_modal(&document, "test-modal").unwrap();
    let (backdrop_b, content_b) = modal::ensure_modal(&document, "test-modal").unwrap();

    assert_eq!(backdrop_a, backdrop_b);
    assert_eq!(content_a, content_b);
}

#[wasm_bindgen_test]
fn show_and_hide_toggle_classes() {
    let document = dom_utils::document().unwrap();
    let el = document.create_element("div").unwrap();

    dom_utils::show(&el);
    assert!(el.class_list().contains("visible"));

    dom_utils::hide(&el);
    assert!(el.class_list().contains("hidden"));
    assert!(!el.class_list().contains("visible"));
}

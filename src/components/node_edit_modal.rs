//! Node configuration modal: ordered input and output label lists with
//! add / remove-by-index controls. All edits go to the draft in state; the
//! node itself changes only on save.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent};

use crate::dom_utils;
use crate::messages::Message;
use crate::state::{dispatch_global_message, APP_STATE};

const MODAL_ID: &str = "node-edit-modal";

pub fn open() {
    let document = match dom_utils::document() {
        Some(d) => d,
        None => return,
    };
    if let Err(e) = build(&document) {
        web_sys::console::error_1(&format!("node edit modal failed: {:?}", e).into());
    }
}

pub fn close() {
    super::modal::hide_by_id(MODAL_ID);
}

fn build(document: &Document) -> Result<(), JsValue> {
    let (backdrop, content) = super::modal::ensure_modal(document, MODAL_ID)?;
    content.set_inner_html("");

    let title = document.create_element("h3")?;
    title.set_text_content(Some("Configure Step"));
    content.append_child(&title)?;

    for (label, list_id, input_id) in [
        ("Inputs", "node-inputs-list", "node-input-entry"),
        ("Outputs", "node-outputs-list", "node-output-entry"),
    ] {
        let section = document.create_element("div")?;
        section.set_class_name("node-io-section");

        let heading = document.create_element("h4")?;
        heading.set_text_content(Some(label));
        section.append_child(&heading)?;

        let list = document.create_element("ul")?;
        list.set_id(list_id);
        list.set_class_name("node-io-list");
        section.append_child(&list)?;

        let row = add_row(document, input_id, label == "Inputs")?;
        section.append_child(&row)?;
        content.append_child(&section)?;
    }

    let footer = document.create_element("div")?;
    footer.set_class_name("modal-footer");

    let cancel = document.create_element("button")?;
    cancel.set_text_content(Some("Cancel"));
    let cancel_cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(Message::CloseNodeEditModal);
    }) as Box<dyn FnMut(_)>);
    cancel.add_event_listener_with_callback("click", cancel_cb.as_ref().unchecked_ref())?;
    cancel_cb.forget();
    footer.append_child(&cancel)?;

    let save = document.create_element("button")?;
    save.set_class_name("primary-btn");
    save.set_text_content(Some("Save"));
    let save_cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(Message::SaveNodeConfiguration);
    }) as Box<dyn FnMut(_)>);
    save.add_event_listener_with_callback("click", save_cb.as_ref().unchecked_ref())?;
    save_cb.forget();
    footer.append_child(&save)?;
    content.append_child(&footer)?;

    super::modal::show(&backdrop);
    refresh_lists();
    Ok(())
}

fn add_row(document: &Document, input_id: &str, is_input: bool) -> Result<Element, JsValue> {
    let row = document.create_element("div")?;
    row.set_class_name("node-io-add-row");

    let entry = document
        .create_element("input")?
        .dyn_into::<web_sys::HtmlInputElement>()?;
    entry.set_id(input_id);
    entry.set_placeholder("label");
    row.append_child(&entry)?;

    let add = document.create_element("button")?;
    add.set_text_content(Some("Add"));
    let entry_clone = entry.clone();
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        let label = entry_clone.value();
        if label.trim().is_empty() {
            return;
        }
        entry_clone.set_value("");
        let msg = if is_input {
            Message::AddModalInput(label.trim().to_string())
        } else {
            Message::AddModalOutput(label.trim().to_string())
        };
        dispatch_global_message(msg);
    }) as Box<dyn FnMut(_)>);
    add.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    row.append_child(&add)?;

    Ok(row)
}

/// Rebuild both label lists from the draft.
pub fn refresh_lists() {
    let document = match dom_utils::document() {
        Some(d) => d,
        None => return,
    };
    let (inputs, outputs) = APP_STATE.with(|state| {
        let state = state.borrow();
        (
            state.node_modal.draft.inputs.clone(),
            state.node_modal.draft.outputs.clone(),
        )
    });

    let result = fill_list(&document, "node-inputs-list", &inputs, true)
        .and_then(|_| fill_list(&document, "node-outputs-list", &outputs, false));
    if let Err(e) = result {
        web_sys::console::error_1(&format!("node io list failed: {:?}", e).into());
    }
}

fn fill_list(
    document: &Document,
    list_id: &str,
    labels: &[String],
    is_input: bool,
) -> Result<(), JsValue> {
    let list = match document.get_element_by_id(list_id) {
        Some(el) => el,
        None => return Ok(()),
    };
    list.set_inner_html("");

    for (index, label) in labels.iter().enumerate() {
        let item = document.create_element("li")?;

        let text = document.create_element("span")?;
        text.set_text_content(Some(label));
        item.append_child(&text)?;

        let remove = document.create_element("button")?;
        remove.set_class_name("row-action-btn");
        remove.set_text_content(Some("\u{00d7}"));
        let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
            let msg = if is_input {
                Message::RemoveModalInput(index)
            } else {
                Message::RemoveModalOutput(index)
            };
            dispatch_global_message(msg);
        }) as Box<dyn FnMut(_)>);
        remove.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
        item.append_child(&remove)?;

        list.append_child(&item)?;
    }
    Ok(())
}

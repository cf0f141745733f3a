//! Workflow create/edit modal: name, description and schedule.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

use crate::dom_utils;
use crate::messages::Message;
use crate::models::Schedule;
use crate::state::{dispatch_global_message, APP_STATE};

const MODAL_ID: &str = "workflow-form-modal";

pub fn open() {
    let document = match dom_utils::document() {
        Some(d) => d,
        None => return,
    };
    if let Err(e) = build(&document) {
        web_sys::console::error_1(&format!("workflow form modal failed: {:?}", e).into());
    }
}

pub fn close() {
    super::modal::hide_by_id(MODAL_ID);
}

fn build(document: &Document) -> Result<(), JsValue> {
    let (backdrop, content) = super::modal::ensure_modal(document, MODAL_ID)?;
    content.set_inner_html("");

    let editing = APP_STATE.with(|state| {
        let state = state.borrow();
        state
            .workflow_form
            .editing_id
            .as_deref()
            .and_then(|id| state.workflow(id))
            .cloned()
    });

    let title = document.create_element("h3")?;
    title.set_text_content(Some(if editing.is_some() {
        "Edit Workflow"
    } else {
        "New Workflow"
    }));
    content.append_child(&title)?;

    let name = field(
        document,
        "workflow-name-input",
        "Name",
        editing.as_ref().map(|w| w.name.as_str()).unwrap_or(""),
    )?;
    content.append_child(&name)?;
    let description = field(
        document,
        "workflow-description-input",
        "Description",
        editing
            .as_ref()
            .map(|w| w.description.as_str())
            .unwrap_or(""),
    )?;
    content.append_child(&description)?;
    let schedule = schedule_select(
        document,
        editing.as_ref().map(|w| w.schedule).unwrap_or(Schedule::Daily),
    )?;
    content.append_child(&schedule)?;

    let footer = document.create_element("div")?;
    footer.set_class_name("modal-footer");

    let cancel = document.create_element("button")?;
    cancel.set_text_content(Some("Cancel"));
    let cancel_cb = Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
        dispatch_global_message(Message::CloseWorkflowForm);
    }) as Box<dyn FnMut(_)>);
    cancel.add_event_listener_with_callback("click", cancel_cb.as_ref().unchecked_ref())?;
    cancel_cb.forget();
    footer.append_child(&cancel)?;

    let save = document.create_element("button")?;
    save.set_class_name("primary-btn");
    save.set_text_content(Some("Save"));
    let save_cb = Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
        submit_form();
    }) as Box<dyn FnMut(_)>);
    save.add_event_listener_with_callback("click", save_cb.as_ref().unchecked_ref())?;
    save_cb.forget();
    footer.append_child(&save)?;
    content.append_child(&footer)?;

    super::modal::show(&backdrop);
    Ok(())
}

fn submit_form() {
    let document = match dom_utils::document() {
        Some(d) => d,
        None => return,
    };
    let name = dom_utils::input_value(&document, "workflow-name-input");
    if name.trim().is_empty() {
        crate::toast::error("Workflow name is required");
        return;
    }
    let schedule = dom_utils::select_by_id(&document, "workflow-schedule-select")
        .map(|s| Schedule::from_str(&s.value()))
        .unwrap_or(Schedule::Daily);

    dispatch_global_message(Message::SubmitWorkflowForm {
        name: name.trim().to_string(),
        description: dom_utils::input_value(&document, "workflow-description-input"),
        schedule,
    });
}

fn field(document: &Document, id: &str, label: &str, value: &str) -> Result<Element, JsValue> {
    let wrap = document.create_element("div")?;
    wrap.set_class_name("form-field");
    let lbl = document.create_element("label")?;
    lbl.set_text_content(Some(label));
    wrap.append_child(&lbl)?;
    let input = document
        .create_element("input")?
        .dyn_into::<HtmlInputElement>()?;
    input.set_id(id);
    input.set_value(value);
    wrap.append_child(&input)?;
    Ok(wrap)
}

fn schedule_select(document: &Document, selected: Schedule) -> Result<Element, JsValue> {
    let wrap = document.create_element("div")?;
    wrap.set_class_name("form-field");
    let lbl = document.create_element("label")?;
    lbl.set_text_content(Some("Schedule"));
    wrap.append_child(&lbl)?;

    let select = document
        .create_element("select")?
        .dyn_into::<web_sys::HtmlSelectElement>()?;
    select.set_id("workflow-schedule-select");
    for schedule in Schedule::ALL {
        let opt = document.create_element("option")?;
        opt.set_attribute("value", schedule.as_str())?;
        opt.set_text_content(Some(schedule.as_str()));
        if schedule == selected {
            opt.set_attribute("selected", "selected")?;
        }
        select.append_child(&opt)?;
    }
    wrap.append_child(&select)?;
    Ok(wrap)
}

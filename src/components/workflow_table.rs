//! Workflows view: the table with inline status toggles and schedule
//! selects. Row clicks open the canvas editor; the inline controls stop
//! propagation so they never also navigate.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlSelectElement};

use crate::messages::Message;
use crate::models::Schedule;
use crate::state::{dispatch_global_message, APP_STATE};

pub fn render(document: &Document, container: &Element) -> Result<(), JsValue> {
    let header = document.create_element("div")?;
    header.set_class_name("view-header");
    let title = document.create_element("h2")?;
    title.set_text_content(Some("Workflows"));
    header.append_child(&title)?;

    let create_btn = document.create_element("button")?;
    create_btn.set_class_name("primary-btn");
    create_btn.set_text_content(Some("+ New Workflow"));
    let cb = Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
        dispatch_global_message(Message::OpenWorkflowForm(None));
    }) as Box<dyn FnMut(_)>);
    create_btn.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    header.append_child(&create_btn)?;
    container.append_child(&header)?;

    let table = document.create_element("table")?;
    table.set_class_name("data-table");
    table.set_inner_html(
        "<thead><tr>\
         <th>Name</th><th>Description</th><th>Active</th><th>Schedule</th><th>Steps</th><th></th>\
         </tr></thead>",
    );
    let tbody = document.create_element("tbody")?;

    APP_STATE.with(|state| -> Result<(), JsValue> {
        let state = state.borrow();
        if state.workflows.is_empty() {
            let row = document.create_element("tr")?;
            row.set_inner_html("<td colspan='6' class='empty-row'>No workflows yet</td>");
            tbody.append_child(&row)?;
            return Ok(());
        }
        for workflow in &state.workflows {
            let row = document.create_element("tr")?;
            row.set_class_name("workflow-row");

            let name_cell = document.create_element("td")?;
            name_cell.set_text_content(Some(&workflow.name));
            row.append_child(&name_cell)?;

            let desc_cell = document.create_element("td")?;
            desc_cell.set_text_content(Some(&workflow.description));
            row.append_child(&desc_cell)?;

            let toggle = toggle_cell(document, workflow)?;
            row.append_child(&toggle)?;
            let schedule = schedule_cell(document, workflow)?;
            row.append_child(&schedule)?;

            let steps_cell = document.create_element("td")?;
            if workflow.dag.is_empty() {
                steps_cell.set_text_content(Some("empty"));
            } else {
                steps_cell.set_text_content(Some(&workflow.dag.nodes.len().to_string()));
            }
            row.append_child(&steps_cell)?;

            let actions = document.create_element("td")?;
            actions.set_class_name("actions-cell");
            let edit_btn = stopping_button(document, "Edit", {
                let id = workflow.id.clone();
                move || dispatch_global_message(Message::OpenWorkflowForm(Some(id.clone())))
            })?;
            actions.append_child(&edit_btn)?;
            let delete_btn = stopping_button(document, "Delete", {
                let id = workflow.id.clone();
                move || {
                    dispatch_global_message(Message::RequestWorkflowDeletion {
                        workflow_id: id.clone(),
                    })
                }
            })?;
            actions.append_child(&delete_btn)?;
            row.append_child(&actions)?;

            // Anywhere else on the row opens the canvas editor.
            let workflow_id = workflow.id.clone();
            let row_cb = Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
                dispatch_global_message(Message::OpenWorkflowEditor {
                    workflow_id: workflow_id.clone(),
                });
            }) as Box<dyn FnMut(_)>);
            row.add_event_listener_with_callback("click", row_cb.as_ref().unchecked_ref())?;
            row_cb.forget();

            tbody.append_child(&row)?;
        }
        Ok(())
    })?;

    table.append_child(&tbody)?;
    container.append_child(&table)?;
    Ok(())
}

fn toggle_cell(
    document: &Document,
    workflow: &crate::models::Workflow,
) -> Result<Element, JsValue> {
    let cell = document.create_element("td")?;
    let btn = document.create_element("button")?;
    btn.set_class_name(if workflow.status.is_active() {
        "toggle-btn toggle-on"
    } else {
        "toggle-btn toggle-off"
    });
    btn.set_text_content(Some(if workflow.status.is_active() {
        "On"
    } else {
        "Off"
    }));

    let workflow_id = workflow.id.clone();
    let cb = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
        event.stop_propagation();
        dispatch_global_message(Message::ToggleWorkflowStatus {
            workflow_id: workflow_id.clone(),
        });
    }) as Box<dyn FnMut(_)>);
    btn.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();

    cell.append_child(&btn)?;
    Ok(cell)
}

fn schedule_cell(
    document: &Document,
    workflow: &crate::models::Workflow,
) -> Result<Element, JsValue> {
    let cell = document.create_element("td")?;
    let select = document
        .create_element("select")?
        .dyn_into::<HtmlSelectElement>()?;

    for schedule in Schedule::ALL {
        let opt = document.create_element("option")?;
        opt.set_attribute("value", schedule.as_str())?;
        opt.set_text_content(Some(schedule.as_str()));
        if schedule == workflow.schedule {
            opt.set_attribute("selected", "selected")?;
        }
        select.append_child(&opt)?;
    }

    let workflow_id = workflow.id.clone();
    let change_cb = Closure::wrap(Box::new(move |event: web_sys::Event| {
        event.stop_propagation();
        if let Some(select) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
        {
            dispatch_global_message(Message::ChangeWorkflowSchedule {
                workflow_id: workflow_id.clone(),
                schedule: Schedule::from_str(&select.value()),
            });
        }
    }) as Box<dyn FnMut(_)>);
    select.add_event_listener_with_callback("change", change_cb.as_ref().unchecked_ref())?;
    change_cb.forget();

    // Clicks on the select itself must not bubble into row navigation.
    let click_cb = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
        event.stop_propagation();
    }) as Box<dyn FnMut(_)>);
    select.add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref())?;
    click_cb.forget();

    cell.append_child(&select)?;
    Ok(cell)
}

fn stopping_button<F>(document: &Document, label: &str, on_click: F) -> Result<Element, JsValue>
where
    F: FnMut() + 'static,
{
    let btn = document.create_element("button")?;
    btn.set_class_name("row-action-btn");
    btn.set_text_content(Some(label));
    let mut handler = on_click;
    let cb = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
        event.stop_propagation();
        handler();
    }) as Box<dyn FnMut(web_sys::MouseEvent)>);
    btn.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(btn)
}

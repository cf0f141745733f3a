//! Agents view: search-less roster table with chat, edit and delete actions,
//! plus the YAML definition import entry point.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlInputElement};

use crate::messages::Message;
use crate::models::Avatar;
use crate::state::{dispatch_global_message, APP_STATE};

pub fn render(document: &Document, container: &Element) -> Result<(), JsValue> {
    let header = build_header(document)?;
    container.append_child(&header)?;
    let table = build_table(document)?;
    container.append_child(&table)?;
    Ok(())
}

fn build_header(document: &Document) -> Result<Element, JsValue> {
    let header = document.create_element("div")?;
    header.set_class_name("view-header");

    let title = document.create_element("h2")?;
    title.set_text_content(Some("Agents"));
    header.append_child(&title)?;

    let create_btn = document.create_element("button")?;
    create_btn.set_id("create-agent-btn");
    create_btn.set_class_name("primary-btn");
    create_btn.set_text_content(Some("+ New Agent"));
    let cb = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
        dispatch_global_message(Message::OpenAgentForm(None));
    }) as Box<dyn FnMut(_)>);
    create_btn.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    header.append_child(&create_btn)?;

    let import = build_import_input(document)?;
    header.append_child(&import)?;

    Ok(header)
}

/// Hidden multi-file input plus the button that triggers it. Selected YAML
/// files feed the definition bootstrap.
fn build_import_input(document: &Document) -> Result<Element, JsValue> {
    let wrap = document.create_element("span")?;

    let input = document
        .create_element("input")?
        .dyn_into::<HtmlInputElement>()?;
    input.set_id("definitions-file-input");
    input.set_type("file");
    input.set_multiple(true);
    input.set_accept(".yaml,.yml");
    let _ = input.style().set_property("display", "none");

    let change_cb = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let input: HtmlInputElement = match event.target().and_then(|t| t.dyn_into().ok()) {
            Some(i) => i,
            None => return,
        };
        let files = match input.files() {
            Some(f) => f,
            None => return,
        };
        let handles: Vec<web_sys::File> =
            (0..files.length()).filter_map(|i| files.get(i)).collect();
        input.set_value("");

        wasm_bindgen_futures::spawn_local(async move {
            let mut contents = Vec::with_capacity(handles.len());
            for file in handles {
                match JsFuture::from(file.text()).await {
                    Ok(text) => {
                        contents.push((file.name(), text.as_string().unwrap_or_default()))
                    }
                    Err(e) => web_sys::console::error_1(
                        &format!("Failed to read {}: {:?}", file.name(), e).into(),
                    ),
                }
            }
            if !contents.is_empty() {
                dispatch_global_message(Message::ImportDefinitions(contents));
            }
        });
    }) as Box<dyn FnMut(_)>);
    input.add_event_listener_with_callback("change", change_cb.as_ref().unchecked_ref())?;
    change_cb.forget();

    let import_btn = document.create_element("button")?;
    import_btn.set_class_name("secondary-btn");
    import_btn.set_text_content(Some("Import definitions"));
    let input_clone = input.clone();
    let click_cb = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
        input_clone.click();
    }) as Box<dyn FnMut(_)>);
    import_btn.add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref())?;
    click_cb.forget();

    wrap.append_child(&import_btn)?;
    wrap.append_child(&input)?;
    Ok(wrap)
}

fn build_table(document: &Document) -> Result<Element, JsValue> {
    let table = document.create_element("table")?;
    table.set_class_name("data-table");
    table.set_inner_html(
        "<thead><tr>\
         <th></th><th>Name</th><th>Description</th><th>Model</th><th>Status</th><th></th>\
         </tr></thead>",
    );

    let tbody = document.create_element("tbody")?;

    APP_STATE.with(|state| -> Result<(), JsValue> {
        let state = state.borrow();
        if state.agents.is_empty() {
            let row = document.create_element("tr")?;
            row.set_inner_html("<td colspan='6' class='empty-row'>No agents yet</td>");
            tbody.append_child(&row)?;
            return Ok(());
        }
        for agent in &state.agents {
            let row = document.create_element("tr")?;

            let avatar_cell = document.create_element("td")?;
            avatar_cell.set_class_name("avatar-cell");
            match &agent.avatar {
                Avatar::Emoji(glyph) => avatar_cell.set_text_content(Some(glyph)),
                Avatar::Image(data_url) => {
                    let img = document.create_element("img")?;
                    img.set_attribute("src", data_url)?;
                    img.set_class_name("avatar-img");
                    avatar_cell.append_child(&img)?;
                }
            }
            row.append_child(&avatar_cell)?;

            let name_cell = document.create_element("td")?;
            name_cell.set_text_content(Some(&agent.name));
            row.append_child(&name_cell)?;

            let desc_cell = document.create_element("td")?;
            desc_cell.set_text_content(Some(&agent.description));
            row.append_child(&desc_cell)?;

            let model_cell = document.create_element("td")?;
            model_cell.set_text_content(Some(&agent.config.model));
            row.append_child(&model_cell)?;

            let status_cell = document.create_element("td")?;
            let badge = document.create_element("span")?;
            badge.set_class_name(&format!("status-badge status-{}", agent.status.as_str()));
            badge.set_text_content(Some(agent.status.as_str()));
            status_cell.append_child(&badge)?;
            row.append_child(&status_cell)?;

            let actions = document.create_element("td")?;
            actions.set_class_name("actions-cell");
            let chat_btn = action_button(document, "Chat", {
                let id = agent.id.clone();
                move || dispatch_global_message(Message::OpenChat { agent_id: id.clone() })
            })?;
            actions.append_child(&chat_btn)?;
            let edit_btn = action_button(document, "Edit", {
                let id = agent.id.clone();
                move || dispatch_global_message(Message::OpenAgentForm(Some(id.clone())))
            })?;
            actions.append_child(&edit_btn)?;
            let delete_btn = action_button(document, "Delete", {
                let id = agent.id.clone();
                move || {
                    dispatch_global_message(Message::RequestAgentDeletion {
                        agent_id: id.clone(),
                    })
                }
            })?;
            actions.append_child(&delete_btn)?;
            row.append_child(&actions)?;

            tbody.append_child(&row)?;
        }
        Ok(())
    })?;

    table.append_child(&tbody)?;
    Ok(table)
}

fn action_button<F>(document: &Document, label: &str, on_click: F) -> Result<Element, JsValue>
where
    F: FnMut() + 'static,
{
    let btn = document.create_element("button")?;
    btn.set_class_name("row-action-btn");
    btn.set_text_content(Some(label));
    let mut handler = on_click;
    let cb = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| handler())
        as Box<dyn FnMut(web_sys::MouseEvent)>);
    btn.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(btn)
}

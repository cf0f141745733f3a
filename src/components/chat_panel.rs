//! Slide-in chat panel bound to one agent.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlInputElement};

use crate::dom_utils;
use crate::messages::Message;
use crate::models::ChatRole;
use crate::state::{dispatch_global_message, APP_STATE};

const PANEL_ID: &str = "chat-panel";

pub fn open() {
    let document = match dom_utils::document() {
        Some(d) => d,
        None => return,
    };
    if let Err(e) = build(&document) {
        web_sys::console::error_1(&format!("chat panel failed: {:?}", e).into());
    }
}

pub fn close() {
    if let Some(document) = dom_utils::document() {
        if let Some(panel) = document.get_element_by_id(PANEL_ID) {
            dom_utils::hide(&panel);
        }
    }
}

fn build(document: &Document) -> Result<(), JsValue> {
    let panel = match document.get_element_by_id(PANEL_ID) {
        Some(el) => el,
        None => {
            let el = document.create_element("aside")?;
            el.set_id(PANEL_ID);
            el.set_class_name("chat-panel");
            document
                .body()
                .ok_or_else(|| JsValue::from_str("document has no body"))?
                .append_child(&el)?;
            el
        }
    };
    panel.set_inner_html("");

    let agent_name = APP_STATE.with(|state| {
        let state = state.borrow();
        state
            .chat
            .agent_id
            .as_deref()
            .and_then(|id| state.agent(id))
            .map(|a| a.name.clone())
            .unwrap_or_else(|| "Agent".to_string())
    });

    let header = document.create_element("div")?;
    header.set_class_name("chat-header");
    let title = document.create_element("h3")?;
    title.set_text_content(Some(&format!("Chat with {}", agent_name)));
    header.append_child(&title)?;

    let close_btn = document.create_element("button")?;
    close_btn.set_text_content(Some("\u{00d7}"));
    let cb = Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
        dispatch_global_message(Message::CloseChat);
    }) as Box<dyn FnMut(_)>);
    close_btn.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    header.append_child(&close_btn)?;
    panel.append_child(&header)?;

    let messages = document.create_element("div")?;
    messages.set_id("chat-messages");
    messages.set_class_name("chat-messages");
    panel.append_child(&messages)?;

    let input_row = document.create_element("div")?;
    input_row.set_class_name("chat-input-row");

    let input = document
        .create_element("input")?
        .dyn_into::<HtmlInputElement>()?;
    input.set_id("chat-input");
    input.set_placeholder("Type a message...");
    let key_cb = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
        if event.key() == "Enter" {
            send_current_input();
        }
    }) as Box<dyn FnMut(_)>);
    input.add_event_listener_with_callback("keydown", key_cb.as_ref().unchecked_ref())?;
    key_cb.forget();
    input_row.append_child(&input)?;

    let send = document.create_element("button")?;
    send.set_class_name("primary-btn");
    send.set_text_content(Some("Send"));
    let send_cb = Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
        send_current_input();
    }) as Box<dyn FnMut(_)>);
    send.add_event_listener_with_callback("click", send_cb.as_ref().unchecked_ref())?;
    send_cb.forget();
    input_row.append_child(&send)?;
    panel.append_child(&input_row)?;

    dom_utils::show(&panel);
    refresh_messages();
    Ok(())
}

fn send_current_input() {
    let document = match dom_utils::document() {
        Some(d) => d,
        None => return,
    };
    if let Some(input) = dom_utils::input_by_id(&document, "chat-input") {
        let text = input.value();
        if !text.trim().is_empty() {
            input.set_value("");
            dispatch_global_message(Message::SendChatMessage(text));
        }
    }
}

/// Repaint the transcript from state, including the waiting indicator.
pub fn refresh_messages() {
    let document = match dom_utils::document() {
        Some(d) => d,
        None => return,
    };
    let container = match document.get_element_by_id("chat-messages") {
        Some(el) => el,
        None => return,
    };
    container.set_inner_html("");

    let result: Result<(), JsValue> = APP_STATE.with(|state| {
        let state = state.borrow();
        for msg in &state.chat.messages {
            let bubble = document.create_element("div")?;
            bubble.set_class_name(match msg.role {
                ChatRole::User => "chat-bubble chat-user",
                ChatRole::Assistant => "chat-bubble chat-assistant",
            });
            let text = document.create_element("span")?;
            text.set_class_name("chat-text");
            text.set_text_content(Some(&msg.content));
            bubble.append_child(&text)?;
            if !msg.timestamp.is_empty() {
                let stamp = document.create_element("span")?;
                stamp.set_class_name("chat-timestamp");
                stamp.set_text_content(Some(&msg.timestamp));
                bubble.append_child(&stamp)?;
            }
            container.append_child(&bubble)?;
        }
        if state.chat.waiting {
            let pending = document.create_element("div")?;
            pending.set_class_name("chat-bubble chat-assistant chat-pending");
            pending.set_text_content(Some("..."));
            container.append_child(&pending)?;
        }
        Ok(())
    });
    if let Err(e) = result {
        web_sys::console::error_1(&format!("chat transcript failed: {:?}", e).into());
    }

    container.set_scroll_top(container.scroll_height());
}

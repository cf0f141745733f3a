//! Google Drive integration card. Connecting opens the OAuth consent popup
//! and watches for it to close; the backend is asked for the resulting
//! status exactly once, after closure. The watch loop is bounded and
//! generation-checked so an abandoned popup or a second connect attempt
//! never leaves a stale loop dispatching.

use gloo_timers::future::TimeoutFuture;
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent};

use crate::constants::{DRIVE_POLL_INTERVAL_MS, DRIVE_POLL_MAX_ATTEMPTS};
use crate::messages::Message;
use crate::models::IntegrationStatus;
use crate::network::ApiClient;
use crate::state::{dispatch_global_message, APP_STATE};

#[derive(Deserialize)]
struct AuthUrlResponse {
    auth_url: String,
}

pub fn build(document: &Document) -> Result<Element, JsValue> {
    let connected = APP_STATE.with(|state| state.borrow().drive_connected);

    let card = document.create_element("div")?;
    card.set_class_name("integration-card");

    let title = document.create_element("h3")?;
    title.set_text_content(Some("\u{1F4C1} Google Drive"));
    card.append_child(&title)?;

    let desc = document.create_element("p")?;
    desc.set_text_content(Some("Let agents read and write Drive documents."));
    card.append_child(&desc)?;

    let status = if connected {
        IntegrationStatus::Active
    } else {
        IntegrationStatus::Disconnected
    };
    let badge = super::integrations_list::status_badge(document, status)?;
    card.append_child(&badge)?;

    let connect = document.create_element("button")?;
    connect.set_class_name("primary-btn");
    connect.set_text_content(Some(if connected { "Reconnect" } else { "Connect" }));
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        start_connect_flow();
    }) as Box<dyn FnMut(_)>);
    connect.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    card.append_child(&connect)?;

    Ok(card)
}

fn start_connect_flow() {
    // Claim a fresh poll generation; any loop holding an older one stops at
    // its next tick.
    let generation = APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        state.drive_poll_generation = state.drive_poll_generation.wrapping_add(1);
        state.drive_poll_generation
    });

    wasm_bindgen_futures::spawn_local(async move {
        let auth_url = match ApiClient::get_drive_auth_url().await {
            Ok(body) => match serde_json::from_str::<AuthUrlResponse>(&body) {
                Ok(resp) => resp.auth_url,
                Err(e) => {
                    crate::toast::error(&format!("Bad auth URL response: {}", e));
                    return;
                }
            },
            Err(e) => {
                crate::toast::error(&format!(
                    "Could not start Google Drive auth: {:?}",
                    e
                ));
                return;
            }
        };

        let window = match web_sys::window() {
            Some(w) => w,
            None => return,
        };
        let popup = match window.open_with_url_and_target(&auth_url, "_blank") {
            Ok(Some(popup)) => popup,
            _ => {
                crate::toast::error("Popup blocked. Allow popups and try again.");
                return;
            }
        };

        for _ in 0..DRIVE_POLL_MAX_ATTEMPTS {
            TimeoutFuture::new(DRIVE_POLL_INTERVAL_MS).await;

            let current = APP_STATE.with(|state| state.borrow().drive_poll_generation);
            if current != generation {
                return;
            }

            // One status query once the consent window is gone, whether the
            // user granted or cancelled.
            if popup.closed().unwrap_or(true) {
                dispatch_global_message(Message::DriveOauthCompleted);
                return;
            }
        }
        crate::toast::info("Google Drive connection timed out. Try again.");
    });
}

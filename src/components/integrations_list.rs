//! Integrations view: one card per provider with its connection status.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent};

use crate::messages::Message;
use crate::models::IntegrationStatus;
use crate::reducers::integrations::{GOOGLE_DRIVE_PROVIDER, SNOWFLAKE_PROVIDER};
use crate::state::{dispatch_global_message, APP_STATE};

pub fn render(document: &Document, container: &Element) -> Result<(), JsValue> {
    let header = document.create_element("div")?;
    header.set_class_name("view-header");
    let title = document.create_element("h2")?;
    title.set_text_content(Some("Integrations"));
    header.append_child(&title)?;
    container.append_child(&header)?;

    let grid = document.create_element("div")?;
    grid.set_class_name("integration-grid");

    let (snowflake, drive) = APP_STATE.with(|state| {
        let state = state.borrow();
        (
            state.provider_available(SNOWFLAKE_PROVIDER),
            state.provider_available(GOOGLE_DRIVE_PROVIDER),
        )
    });
    if snowflake {
        let card = snowflake_card(document)?;
        grid.append_child(&card)?;
    }
    if drive {
        let card = super::google_drive_card::build(document)?;
        grid.append_child(&card)?;
    }

    container.append_child(&grid)?;
    Ok(())
}

fn snowflake_card(document: &Document) -> Result<Element, JsValue> {
    let (status, integration_id) = APP_STATE.with(|state| {
        let state = state.borrow();
        let existing = state.integration_by_provider(SNOWFLAKE_PROVIDER);
        (
            existing.map(|i| i.status).unwrap_or_default(),
            existing.and_then(|i| i.id.clone()),
        )
    });

    let card = document.create_element("div")?;
    card.set_class_name("integration-card");

    let title = document.create_element("h3")?;
    title.set_text_content(Some("\u{2744}\u{FE0F} Snowflake"));
    card.append_child(&title)?;

    let desc = document.create_element("p")?;
    desc.set_text_content(Some("Query your warehouse from agent steps."));
    card.append_child(&desc)?;

    let badge = status_badge(document, status)?;
    card.append_child(&badge)?;

    let configure = document.create_element("button")?;
    configure.set_class_name("primary-btn");
    configure.set_text_content(Some(if integration_id.is_some() {
        "Configure"
    } else {
        "Connect"
    }));
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        super::integration_modal::open();
    }) as Box<dyn FnMut(_)>);
    configure.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    card.append_child(&configure)?;

    if let Some(id) = integration_id {
        let remove = document.create_element("button")?;
        remove.set_text_content(Some("Remove"));
        let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
            dispatch_global_message(Message::RequestIntegrationDeletion {
                integration_id: id.clone(),
            });
        }) as Box<dyn FnMut(_)>);
        remove.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
        card.append_child(&remove)?;
    }

    Ok(card)
}

pub(super) fn status_badge(
    document: &Document,
    status: IntegrationStatus,
) -> Result<Element, JsValue> {
    let badge = document.create_element("span")?;
    match status {
        IntegrationStatus::Active => {
            badge.set_class_name("status-badge status-active");
            badge.set_text_content(Some("connected"));
        }
        IntegrationStatus::Disconnected => {
            badge.set_class_name("status-badge status-disconnected");
            badge.set_text_content(Some("not connected"));
        }
    }
    Ok(badge)
}

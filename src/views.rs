// src/views.rs
//
// Top-level view switching: the nav bar plus one render function per view.
// `render_active_view` runs as a command executor, so the state borrow it
// takes is always fresh.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::dom_utils;
use crate::messages::Message;
use crate::state::{dispatch_global_message, ActiveView, APP_STATE};

pub fn render_active_view() {
    let document = match dom_utils::document() {
        Some(d) => d,
        None => return,
    };
    if let Err(e) = render(&document) {
        web_sys::console::error_1(&format!("render failed: {:?}", e).into());
    }
}

fn render(document: &Document) -> Result<(), JsValue> {
    let root = match document.get_element_by_id("app-root") {
        Some(el) => el,
        None => {
            let el = document.create_element("div")?;
            el.set_id("app-root");
            document
                .body()
                .ok_or_else(|| JsValue::from_str("document has no body"))?
                .append_child(&el)?;
            el
        }
    };

    let active = APP_STATE.with(|state| state.borrow().active_view.clone());

    dom_utils::clear_children(&root);
    let nav = build_nav(document, &active)?;
    root.append_child(&nav)?;

    let container = document.create_element("div")?;
    container.set_id("view-container");
    container.set_class_name("view-container");
    root.append_child(&container)?;

    match active {
        ActiveView::Agents => crate::components::agent_list::render(document, &container)?,
        ActiveView::Workflows => crate::components::workflow_table::render(document, &container)?,
        ActiveView::WorkflowEditor(_) => {
            crate::components::dag_editor::render(document, &container)?
        }
        ActiveView::Integrations => {
            crate::components::integrations_list::render(document, &container)?
        }
    }

    Ok(())
}

fn build_nav(document: &Document, active: &ActiveView) -> Result<Element, JsValue> {
    let nav = document.create_element("nav")?;
    nav.set_class_name("main-nav");

    let tabs: [(&str, ActiveView); 3] = [
        ("Agents", ActiveView::Agents),
        ("Workflows", ActiveView::Workflows),
        ("Integrations", ActiveView::Integrations),
    ];

    for (label, view) in tabs {
        let btn = document.create_element("button")?;
        btn.set_text_content(Some(label));
        // The editor is reached through the workflows tab, keep that tab lit.
        let is_active = match (&view, active) {
            (ActiveView::Workflows, ActiveView::WorkflowEditor(_)) => true,
            (v, a) => v == a,
        };
        if is_active {
            dom_utils::set_active(&btn);
        } else {
            dom_utils::set_inactive(&btn);
        }

        let target = view.clone();
        let cb = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
            dispatch_global_message(Message::ToggleView(target.clone()));
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();

        nav.append_child(&btn)?;
    }

    Ok(nav)
}

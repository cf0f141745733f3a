//! Canvas-based workflow editor: toolbar, the canvas itself and the mouse
//! handlers that translate pointer events into editor messages.
//!
//! Handlers read the state to decide what the gesture means, drop the
//! borrow, then dispatch. Nothing here mutates state directly.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, MouseEvent};

use crate::canvas::{hit_connect_handle, node_at};
use crate::messages::Message;
use crate::state::{dispatch_global_message, APP_STATE, EditorLoad};

const CANVAS_WIDTH: u32 = 1200;
const CANVAS_HEIGHT: u32 = 700;

pub fn render(document: &Document, container: &Element) -> Result<(), JsValue> {
    let (load, name, dirty) = APP_STATE.with(|state| {
        let state = state.borrow();
        let name = state
            .editor
            .workflow_id
            .as_deref()
            .and_then(|id| state.workflow(id))
            .map(|w| w.name.clone())
            .unwrap_or_default();
        (state.editor.load.clone(), name, state.editor.dirty)
    });

    let toolbar = build_toolbar(document, &name, dirty)?;
    container.append_child(&toolbar)?;

    if load != EditorLoad::Loaded {
        let note = document.create_element("p")?;
        note.set_class_name("editor-loading");
        note.set_text_content(Some("Loading workflow..."));
        container.append_child(&note)?;
        return Ok(());
    }

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    canvas.set_id("editor-canvas");
    canvas.set_width(CANVAS_WIDTH);
    canvas.set_height(CANVAS_HEIGHT);
    container.append_child(&canvas)?;

    let context = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    attach_mouse_handlers(&canvas)?;

    APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        state.editor.canvas = Some(canvas);
        state.editor.context = Some(context);
    });

    refresh();
    Ok(())
}

/// Repaint without rebuilding the DOM. Cheap enough to run per mouse move.
pub fn refresh() {
    APP_STATE.with(|state| {
        let state = state.borrow();
        crate::canvas::renderer::render(&state);
    });
}

fn build_toolbar(document: &Document, name: &str, dirty: bool) -> Result<Element, JsValue> {
    let bar = document.create_element("div")?;
    bar.set_class_name("editor-toolbar");

    let back = document.create_element("button")?;
    back.set_text_content(Some("\u{2190} Workflows"));
    let back_cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(Message::CloseWorkflowEditor);
    }) as Box<dyn FnMut(_)>);
    back.add_event_listener_with_callback("click", back_cb.as_ref().unchecked_ref())?;
    back_cb.forget();
    bar.append_child(&back)?;

    let title = document.create_element("h2")?;
    let shown = if dirty {
        format!("{} *", name)
    } else {
        name.to_string()
    };
    title.set_text_content(Some(&shown));
    bar.append_child(&title)?;

    let picker = build_agent_picker(document)?;
    bar.append_child(&picker)?;

    let save = document.create_element("button")?;
    save.set_id("save-dag-btn");
    save.set_class_name("primary-btn");
    save.set_text_content(Some("Save"));
    let save_cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(Message::SaveWorkflowDag);
    }) as Box<dyn FnMut(_)>);
    save.add_event_listener_with_callback("click", save_cb.as_ref().unchecked_ref())?;
    save_cb.forget();
    bar.append_child(&save)?;

    Ok(bar)
}

/// Select over the agent roster plus an "add node" button.
fn build_agent_picker(document: &Document) -> Result<Element, JsValue> {
    let wrap = document.create_element("span")?;
    wrap.set_class_name("agent-picker");

    let select = document
        .create_element("select")?
        .dyn_into::<web_sys::HtmlSelectElement>()?;
    select.set_id("node-agent-select");
    APP_STATE.with(|state| -> Result<(), JsValue> {
        let state = state.borrow();
        for agent in &state.agents {
            let opt = document.create_element("option")?;
            opt.set_attribute("value", &agent.id)?;
            opt.set_text_content(Some(&agent.name));
            select.append_child(&opt)?;
        }
        Ok(())
    })?;
    wrap.append_child(&select)?;

    let add = document.create_element("button")?;
    add.set_text_content(Some("+ Add agent step"));
    let select_clone = select.clone();
    let add_cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        let agent_id = select_clone.value();
        if !agent_id.is_empty() {
            dispatch_global_message(Message::AddAgentNode { agent_id });
        }
    }) as Box<dyn FnMut(_)>);
    add.add_event_listener_with_callback("click", add_cb.as_ref().unchecked_ref())?;
    add_cb.forget();
    wrap.append_child(&add)?;

    Ok(wrap)
}

fn canvas_coords(canvas: &HtmlCanvasElement, event: &MouseEvent) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (
        event.client_x() as f64 - rect.left(),
        event.client_y() as f64 - rect.top(),
    )
}

fn attach_mouse_handlers(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    // mousedown: connect handle beats node body.
    {
        let canvas_ref = canvas.clone();
        let cb = Closure::wrap(Box::new(move |event: MouseEvent| {
            let (x, y) = canvas_coords(&canvas_ref, &event);
            let decision = APP_STATE.with(|state| {
                let state = state.borrow();
                node_at(&state.editor.nodes, x, y).map(|node| {
                    let pos = node.position();
                    (
                        node.id().to_string(),
                        hit_connect_handle(node, x, y),
                        x - pos.x,
                        y - pos.y,
                    )
                })
            });
            match decision {
                Some((node_id, true, _, _)) => {
                    dispatch_global_message(Message::StartConnection {
                        source_id: node_id,
                        x,
                        y,
                    });
                }
                Some((node_id, false, offset_x, offset_y)) => {
                    dispatch_global_message(Message::StartNodeDrag {
                        node_id,
                        offset_x,
                        offset_y,
                    });
                }
                None => {}
            }
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousedown", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }

    // mousemove: forward to whichever gesture is running.
    {
        let canvas_ref = canvas.clone();
        let cb = Closure::wrap(Box::new(move |event: MouseEvent| {
            let (x, y) = canvas_coords(&canvas_ref, &event);
            let gesture = APP_STATE.with(|state| {
                let state = state.borrow();
                if let Some(drag) = state.editor.dragging.as_ref() {
                    Some(Message::UpdateNodePosition {
                        node_id: drag.node_id.clone(),
                        x: x - drag.offset_x,
                        y: y - drag.offset_y,
                    })
                } else if state.editor.connecting.is_some() {
                    Some(Message::UpdateConnectionCursor { x, y })
                } else {
                    None
                }
            });
            if let Some(msg) = gesture {
                dispatch_global_message(msg);
            }
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }

    // mouseup: land or cancel the connection, stop any drag.
    {
        let canvas_ref = canvas.clone();
        let cb = Closure::wrap(Box::new(move |event: MouseEvent| {
            let (x, y) = canvas_coords(&canvas_ref, &event);
            let finish = APP_STATE.with(|state| {
                let state = state.borrow();
                if state.editor.connecting.is_none() {
                    return None;
                }
                Some(
                    node_at(&state.editor.nodes, x, y)
                        .map(|n| n.id().to_string()),
                )
            });
            match finish {
                Some(Some(target_id)) => {
                    dispatch_global_message(Message::CompleteConnection { target_id })
                }
                Some(None) => dispatch_global_message(Message::CancelConnection),
                None => {}
            }
            dispatch_global_message(Message::StopNodeDrag);
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mouseup", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }

    // dblclick opens the node configuration modal.
    {
        let canvas_ref = canvas.clone();
        let cb = Closure::wrap(Box::new(move |event: MouseEvent| {
            let (x, y) = canvas_coords(&canvas_ref, &event);
            let hit = APP_STATE.with(|state| {
                let state = state.borrow();
                node_at(&state.editor.nodes, x, y).map(|n| n.id().to_string())
            });
            if let Some(node_id) = hit {
                dispatch_global_message(Message::OpenNodeEditModal { node_id });
            }
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("dblclick", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }

    Ok(())
}

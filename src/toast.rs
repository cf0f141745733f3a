//! Tiny toast helper. Creates a `#toast-root` container once per page and
//! appends toast divs that auto-remove after a few seconds.

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, HtmlElement};

#[derive(Debug, Clone, Copy)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

pub fn success(msg: &str) {
    show(msg, ToastKind::Success);
}

pub fn error(msg: &str) {
    show(msg, ToastKind::Error);
}

pub fn info(msg: &str) {
    show(msg, ToastKind::Info);
}

pub fn show(message: &str, kind: ToastKind) {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return,
    };
    let document = match window.document() {
        Some(d) => d,
        None => return,
    };

    let root = match ensure_root(&document) {
        Some(r) => r,
        None => return,
    };

    let toast = match document.create_element("div") {
        Ok(el) => el,
        Err(_) => return,
    };
    toast.set_class_name("toast");
    let modifier = match kind {
        ToastKind::Success => "toast-success",
        ToastKind::Error => "toast-error",
        ToastKind::Info => "toast-info",
    };
    let _ = toast.class_list().add_1(modifier);
    toast.set_text_content(Some(message));

    // Prepend so the newest appears on top.
    let _ = root.prepend_with_node_1(&toast);

    // Auto-remove after 4s.
    let toast_clone: HtmlElement = toast.unchecked_into();
    let cb = Closure::once_into_js(move || {
        if let Some(parent) = toast_clone.parent_node() {
            let _ = parent.remove_child(&toast_clone);
        }
    });
    let _ = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 4000);

    ensure_styles(&document);
}

fn ensure_root(document: &Document) -> Option<Element> {
    if let Some(el) = document.get_element_by_id("toast-root") {
        return Some(el);
    }
    let root = document.create_element("div").ok()?;
    root.set_id("toast-root");
    root.set_class_name("toast-root");
    document.body()?.append_child(&root).ok()?;
    Some(root)
}

fn ensure_styles(document: &Document) {
    if document.get_element_by_id("toast-styles").is_some() {
        return;
    }

    let css = "
.toast-root{position:fixed;top:16px;right:16px;display:flex;flex-direction:column;gap:8px;z-index:9999;font-family:Arial,Helvetica,sans-serif}
.toast{padding:10px 16px;border-radius:4px;color:#fff;box-shadow:0 2px 4px rgba(0,0,0,.1);opacity:0;animation:toast-in .2s forwards}
.toast-success{background:#16a34a}
.toast-error{background:#dc2626}
.toast-info{background:#2563eb}
@keyframes toast-in{to{opacity:1}}
";

    let style = match document.create_element("style") {
        Ok(el) => el,
        Err(_) => return,
    };
    style.set_id("toast-styles");
    style.set_text_content(Some(css));
    match document.query_selector("head") {
        Ok(Some(head)) => {
            let _ = head.append_child(&style);
        }
        _ => {
            if let Some(body) = document.body() {
                let _ = body.append_child(&style);
            }
        }
    }
}

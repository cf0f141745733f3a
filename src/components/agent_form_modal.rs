//! Agent create/edit modal. The avatar section switches between a glyph
//! palette and an image upload; the picked value lives in state so a mode
//! switch never loses it.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, FileReader, HtmlInputElement};

use crate::constants::AVATAR_GLYPHS;
use crate::dom_utils;
use crate::messages::{AvatarMode, Message};
use crate::models::{AgentFormData, Avatar, ModelConfig};
use crate::state::{dispatch_global_message, APP_STATE};

const MODAL_ID: &str = "agent-form-modal";

pub fn open() {
    let document = match dom_utils::document() {
        Some(d) => d,
        None => return,
    };
    if let Err(e) = build(&document) {
        web_sys::console::error_1(&format!("agent form modal failed: {:?}", e).into());
    }
}

pub fn close() {
    super::modal::hide_by_id(MODAL_ID);
}

fn build(document: &Document) -> Result<(), JsValue> {
    let (backdrop, content) = super::modal::ensure_modal(document, MODAL_ID)?;
    content.set_inner_html("");

    let (editing, models) = APP_STATE.with(|state| {
        let state = state.borrow();
        let agent = state
            .agent_form
            .editing_id
            .as_deref()
            .and_then(|id| state.agent(id))
            .cloned();
        (agent, state.available_models.clone())
    });

    let title = document.create_element("h3")?;
    title.set_text_content(Some(if editing.is_some() {
        "Edit Agent"
    } else {
        "New Agent"
    }));
    content.append_child(&title)?;

    let config = editing
        .as_ref()
        .map(|a| a.config.clone())
        .unwrap_or_default();

    let name = text_field(
        document,
        "agent-name-input",
        "Name",
        editing.as_ref().map(|a| a.name.as_str()).unwrap_or(""),
    )?;
    content.append_child(&name)?;
    let description = text_field(
        document,
        "agent-description-input",
        "Description",
        editing
            .as_ref()
            .map(|a| a.description.as_str())
            .unwrap_or(""),
    )?;
    content.append_child(&description)?;
    let narrative = textarea_field(
        document,
        "agent-narrative-input",
        "Narrative",
        editing.as_ref().map(|a| a.narrative.as_str()).unwrap_or(""),
    )?;
    content.append_child(&narrative)?;
    let model = model_select(document, &models, Some(config.model.as_str()))?;
    content.append_child(&model)?;
    let temperature = text_field(
        document,
        "agent-temperature-input",
        "Temperature",
        &config.temperature.to_string(),
    )?;
    content.append_child(&temperature)?;
    let max_tokens = text_field(
        document,
        "agent-max-tokens-input",
        "Max tokens",
        &config
            .max_tokens
            .map(|t| t.to_string())
            .unwrap_or_default(),
    )?;
    content.append_child(&max_tokens)?;
    let rag = checkbox_field(
        document,
        "agent-use-rag-input",
        "Use RAG",
        config.use_rag.unwrap_or(false),
    )?;
    content.append_child(&rag)?;
    let direct_query = checkbox_field(
        document,
        "agent-use-direct-query-input",
        "Use direct query",
        config.use_direct_query.unwrap_or(false),
    )?;
    content.append_child(&direct_query)?;

    let avatar_section = document.create_element("div")?;
    avatar_section.set_id("avatar-section");
    content.append_child(&avatar_section)?;
    render_avatar_section(document, &avatar_section)?;

    let footer = document.create_element("div")?;
    footer.set_class_name("modal-footer");

    let cancel = document.create_element("button")?;
    cancel.set_text_content(Some("Cancel"));
    let cancel_cb = Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
        dispatch_global_message(Message::CloseAgentForm);
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
    let name = dom_utils::input_value(&document, "agent-name-input");
    if name.trim().is_empty() {
        crate::toast::error("Agent name is required");
        return;
    }

    let avatar = APP_STATE.with(|state| state.borrow().agent_form.avatar.clone());
    let model = dom_utils::select_by_id(&document, "agent-model-select")
        .map(|s| s.value())
        .unwrap_or_else(|| ModelConfig::default().model);
    let temperature = dom_utils::input_value(&document, "agent-temperature-input")
        .parse::<f64>()
        .unwrap_or(ModelConfig::default().temperature);
    let max_tokens = dom_utils::input_value(&document, "agent-max-tokens-input")
        .trim()
        .parse::<u32>()
        .ok();

    let form = AgentFormData {
        name: name.trim().to_string(),
        description: dom_utils::input_value(&document, "agent-description-input"),
        narrative: textarea_value(&document, "agent-narrative-input"),
        avatar,
        config: ModelConfig {
            model,
            temperature,
            max_tokens,
            use_rag: Some(checkbox_checked(&document, "agent-use-rag-input")),
            use_direct_query: Some(checkbox_checked(&document, "agent-use-direct-query-input")),
        },
    };
    dispatch_global_message(Message::SubmitAgentForm(form));
}

/// Rebuild only the avatar portion of the form. Runs on open and again on
/// every mode switch or pick.
pub fn refresh_avatar_section() {
    let document = match dom_utils::document() {
        Some(d) => d,
        None => return,
    };
    if let Some(section) = document.get_element_by_id("avatar-section") {
        if let Err(e) = render_avatar_section(&document, &section) {
            web_sys::console::error_1(&format!("avatar section failed: {:?}", e).into());
        }
    }
}

fn render_avatar_section(document: &Document, section: &Element) -> Result<(), JsValue> {
    section.set_inner_html("");

    let (mode, avatar) = APP_STATE.with(|state| {
        let state = state.borrow();
        (state.agent_form.avatar_mode, state.agent_form.avatar.clone())
    });

    let tabs = document.create_element("div")?;
    tabs.set_class_name("avatar-tabs");
    for (label, target) in [("Glyph", AvatarMode::Glyph), ("Upload", AvatarMode::Upload)] {
        let btn = document.create_element("button")?;
        btn.set_text_content(Some(label));
        if mode == target {
            dom_utils::set_active(&btn);
        } else {
            dom_utils::set_inactive(&btn);
        }
        let cb = Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
            dispatch_global_message(Message::SetAvatarMode(target));
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
        tabs.append_child(&btn)?;
    }
    section.append_child(&tabs)?;

    let preview = document.create_element("div")?;
    preview.set_class_name("avatar-preview");
    match &avatar {
        Avatar::Emoji(glyph) => preview.set_text_content(Some(glyph)),
        Avatar::Image(data_url) => {
            let img = document.create_element("img")?;
            img.set_attribute("src", data_url)?;
            img.set_class_name("avatar-img");
            preview.append_child(&img)?;
        }
    }
    section.append_child(&preview)?;

    match mode {
        AvatarMode::Glyph => {
            let palette = document.create_element("div")?;
            palette.set_class_name("avatar-palette");
            for glyph in AVATAR_GLYPHS {
                let btn = document.create_element("button")?;
                btn.set_class_name("avatar-glyph-btn");
                btn.set_text_content(Some(glyph));
                let picked = glyph.to_string();
                let cb = Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
                    dispatch_global_message(Message::AvatarPicked(Avatar::Emoji(picked.clone())));
                }) as Box<dyn FnMut(_)>);
                btn.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
                cb.forget();
                palette.append_child(&btn)?;
            }
            section.append_child(&palette)?;
        }
        AvatarMode::Upload => {
            let input = document
                .create_element("input")?
                .dyn_into::<HtmlInputElement>()?;
            input.set_type("file");
            input.set_accept("image/*");
            let cb = Closure::wrap(Box::new(move |event: web_sys::Event| {
                if let Some(input) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                {
                    if let Some(file) = input.files().and_then(|f| f.get(0)) {
                        read_avatar_file(&file);
                    }
                }
            }) as Box<dyn FnMut(_)>);
            input.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())?;
            cb.forget();
            section.append_child(&input)?;
        }
    }

    Ok(())
}

/// Read the chosen image as a data URL and store it as the avatar.
fn read_avatar_file(file: &web_sys::File) {
    let reader = match FileReader::new() {
        Ok(r) => r,
        Err(_) => return,
    };
    let reader_clone = reader.clone();
    let onload = Closure::wrap(Box::new(move |_event: web_sys::ProgressEvent| {
        if let Ok(result) = reader_clone.result() {
            if let Some(data_url) = result.as_string() {
                dispatch_global_message(Message::AvatarPicked(Avatar::Image(data_url)));
            }
        }
    }) as Box<dyn FnMut(_)>);
    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();
    let _ = reader.read_as_data_url(file);
}

// ---------------- small form builders ----------------

fn text_field(
    document: &Document,
    id: &str,
    label: &str,
    value: &str,
) -> Result<Element, JsValue> {
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

fn checkbox_field(
    document: &Document,
    id: &str,
    label: &str,
    checked: bool,
) -> Result<Element, JsValue> {
    let wrap = document.create_element("div")?;
    wrap.set_class_name("form-field form-checkbox");
    let input = document
        .create_element("input")?
        .dyn_into::<HtmlInputElement>()?;
    input.set_type("checkbox");
    input.set_id(id);
    input.set_checked(checked);
    wrap.append_child(&input)?;
    let lbl = document.create_element("label")?;
    lbl.set_text_content(Some(label));
    lbl.set_attribute("for", id)?;
    wrap.append_child(&lbl)?;
    Ok(wrap)
}

fn checkbox_checked(document: &Document, id: &str) -> bool {
    dom_utils::input_by_id(document, id)
        .map(|i| i.checked())
        .unwrap_or(false)
}

fn textarea_field(
    document: &Document,
    id: &str,
    label: &str,
    value: &str,
) -> Result<Element, JsValue> {
    let wrap = document.create_element("div")?;
    wrap.set_class_name("form-field");
    let lbl = document.create_element("label")?;
    lbl.set_text_content(Some(label));
    wrap.append_child(&lbl)?;
    let area = document
        .create_element("textarea")?
        .dyn_into::<web_sys::HtmlTextAreaElement>()?;
    area.set_id(id);
    area.set_value(value);
    wrap.append_child(&area)?;
    Ok(wrap)
}

fn textarea_value(document: &Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
        .map(|a| a.value())
        .unwrap_or_default()
}

fn model_select(
    document: &Document,
    models: &[String],
    selected: Option<&str>,
) -> Result<Element, JsValue> {
    let wrap = document.create_element("div")?;
    wrap.set_class_name("form-field");
    let lbl = document.create_element("label")?;
    lbl.set_text_content(Some("Model"));
    wrap.append_child(&lbl)?;

    let select = document
        .create_element("select")?
        .dyn_into::<web_sys::HtmlSelectElement>()?;
    select.set_id("agent-model-select");

    let defaults = [crate::constants::DEFAULT_MODEL.to_string()];
    let options = if models.is_empty() { &defaults[..] } else { models };
    for model in options {
        let opt = document.create_element("option")?;
        opt.set_attribute("value", model)?;
        opt.set_text_content(Some(model));
        if Some(model.as_str()) == selected {
            opt.set_attribute("selected", "selected")?;
        }
        select.append_child(&opt)?;
    }
    wrap.append_child(&select)?;
    Ok(wrap)
}

//! Snowflake configuration modal. "Test connection" runs the local required
//! field check first; only a complete config is sent to the backend.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, MouseEvent};

use crate::dom_utils;
use crate::messages::Message;
use crate::models::{Integration, SnowflakeConfig};
use crate::reducers::integrations::SNOWFLAKE_PROVIDER;
use crate::state::{dispatch_global_message, APP_STATE};

const MODAL_ID: &str = "snowflake-modal";

const FIELDS: [(&str, &str, bool); 6] = [
    ("snowflake-account", "Account", false),
    ("snowflake-username", "Username", false),
    ("snowflake-password", "Password", true),
    ("snowflake-database", "Database", false),
    ("snowflake-schema", "Schema", false),
    ("snowflake-warehouse", "Warehouse", false),
];

pub fn open() {
    let document = match dom_utils::document() {
        Some(d) => d,
        None => return,
    };
    if let Err(e) = build(&document) {
        web_sys::console::error_1(&format!("snowflake modal failed: {:?}", e).into());
    }
}

pub fn close() {
    super::modal::hide_by_id(MODAL_ID);
}

fn build(document: &Document) -> Result<(), JsValue> {
    let (backdrop, content) = super::modal::ensure_modal(document, MODAL_ID)?;
    content.set_inner_html("");

    let existing = APP_STATE.with(|state| {
        state
            .borrow()
            .integration_by_provider(SNOWFLAKE_PROVIDER)
            .cloned()
    });
    let config = existing
        .as_ref()
        .map(|i| SnowflakeConfig::from_config_map(&i.config))
        .unwrap_or_default();

    let title = document.create_element("h3")?;
    title.set_text_content(Some("Snowflake Connection"));
    content.append_child(&title)?;

    let values = [
        config.account.as_str(),
        config.username.as_str(),
        config.password.as_str(),
        config.database.as_str(),
        config.schema.as_str(),
        config.warehouse.as_str(),
    ];
    for ((id, label, secret), value) in FIELDS.iter().zip(values) {
        let row = field(document, id, label, value, *secret)?;
        content.append_child(&row)?;
    }

    let footer = document.create_element("div")?;
    footer.set_class_name("modal-footer");

    let cancel = document.create_element("button")?;
    cancel.set_text_content(Some("Cancel"));
    let cancel_cb = Closure::wrap(Box::new(move |_e: MouseEvent| close()) as Box<dyn FnMut(_)>);
    cancel.add_event_listener_with_callback("click", cancel_cb.as_ref().unchecked_ref())?;
    cancel_cb.forget();
    footer.append_child(&cancel)?;

    let test = document.create_element("button")?;
    test.set_text_content(Some("Test connection"));
    let test_cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(Message::TestSnowflakeConnection(Box::new(collect_config())));
    }) as Box<dyn FnMut(_)>);
    test.add_event_listener_with_callback("click", test_cb.as_ref().unchecked_ref())?;
    test_cb.forget();
    footer.append_child(&test)?;

    let save = document.create_element("button")?;
    save.set_class_name("primary-btn");
    save.set_text_content(Some("Save"));
    let existing_id = existing.and_then(|i| i.id);
    let save_cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        let config = collect_config();
        let mut config_map = serde_json::Map::new();
        if let Ok(serde_json::Value::Object(map)) = serde_json::to_value(&config) {
            config_map = map;
        }
        let integration = Integration {
            id: existing_id.clone(),
            provider: SNOWFLAKE_PROVIDER.to_string(),
            name: "Snowflake".to_string(),
            kind: "warehouse".to_string(),
            description: String::new(),
            status: Default::default(),
            config: config_map,
        };
        dispatch_global_message(Message::SaveIntegration(Box::new(integration)));
        close();
    }) as Box<dyn FnMut(_)>);
    save.add_event_listener_with_callback("click", save_cb.as_ref().unchecked_ref())?;
    save_cb.forget();
    footer.append_child(&save)?;

    content.append_child(&footer)?;
    super::modal::show(&backdrop);
    Ok(())
}

fn collect_config() -> SnowflakeConfig {
    let document = match dom_utils::document() {
        Some(d) => d,
        None => return SnowflakeConfig::default(),
    };
    SnowflakeConfig {
        account: dom_utils::input_value(&document, "snowflake-account"),
        username: dom_utils::input_value(&document, "snowflake-username"),
        password: dom_utils::input_value(&document, "snowflake-password"),
        database: dom_utils::input_value(&document, "snowflake-database"),
        schema: dom_utils::input_value(&document, "snowflake-schema"),
        warehouse: dom_utils::input_value(&document, "snowflake-warehouse"),
    }
}

fn field(
    document: &Document,
    id: &str,
    label: &str,
    value: &str,
    secret: bool,
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
    if secret {
        input.set_type("password");
    }
    input.set_value(value);
    wrap.append_child(&input)?;
    Ok(wrap)
}

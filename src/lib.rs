use wasm_bindgen::prelude::*;

/// Console tracing for development builds. Compiles to nothing in release.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(debug_assertions)]
        web_sys::console::log_1(&format!($($arg)*).into());
    }};
}

mod bootstrap;
mod canvas;
mod command_executors;
mod components;
mod constants;
mod dom_utils;
mod messages;
mod models;
mod network;
mod reducers;
mod state;
mod toast;
mod update;
mod views;

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests;

use messages::Command;

// Main entry point for the WASM application.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    // A compile-time API_BASE_URL wins; otherwise talk to the origin we
    // were served from.
    if let Ok(cfg) = network::ApiConfig::from_env() {
        network::init_api_config(cfg.base_url());
    } else {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let location = window.location();
        let base_url = format!("{}//{}", location.protocol()?, location.host()?);
        network::init_api_config(&base_url);
    }

    debug_log!("agent console starting");

    // Paint the default view, then load everything it and the editor need.
    command_executors::execute(Command::Render);
    command_executors::execute(Command::FetchAgents);
    command_executors::execute(Command::FetchModels);
    command_executors::execute(Command::FetchWorkflows);
    command_executors::execute(Command::FetchIntegrations);

    Ok(())
}

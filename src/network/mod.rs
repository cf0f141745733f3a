// Network layer: base-URL configuration and the REST client.

pub mod api_client;
pub mod config;

pub use api_client::ApiClient;
pub use config::ApiConfig;

use lazy_static::lazy_static;
use std::sync::RwLock;

lazy_static! {
    static ref API_CONFIG: RwLock<ApiConfig> = RwLock::new(ApiConfig::default());
}

/// Install the base URL once during startup.
pub fn init_api_config(base_url: &str) {
    if let Ok(mut cfg) = API_CONFIG.write() {
        *cfg = ApiConfig::from_url(base_url);
    }
}

/// Build a full URL under the versioned API prefix.
pub fn api_url(path: &str) -> String {
    match API_CONFIG.read() {
        Ok(cfg) => cfg.url(path),
        Err(_) => ApiConfig::default().url(path),
    }
}

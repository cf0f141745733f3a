/// API route configuration.
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    /// Points at the local development backend. Startup calls
    /// `init_api_config()` with the real URL; the default only covers unit
    /// tests and the window before that happens.
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
        }
    }
}

impl ApiConfig {
    /// Build from the `API_BASE_URL` compile-time environment variable.
    pub fn from_env() -> Result<Self, &'static str> {
        match option_env!("API_BASE_URL") {
            Some(url) => Ok(Self::from_url(url)),
            None => Err("API_BASE_URL environment variable is not set"),
        }
    }

    pub fn from_url(url: &str) -> Self {
        Self {
            base_url: url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a path under the versioned API prefix.
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let cfg = ApiConfig::from_url("https://console.example.com/");
        assert_eq!(cfg.base_url(), "https://console.example.com");
        assert_eq!(
            cfg.url("/agents"),
            "https://console.example.com/api/v1/agents"
        );
    }
}

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::api_url;

/// REST client for the console backend. Every method returns the raw
/// response body; callers decode JSON themselves.
pub struct ApiClient;

impl ApiClient {
    // ---------------- Agents ----------------

    pub async fn get_agents() -> Result<String, JsValue> {
        Self::fetch_json(&api_url("/agents"), "GET", None).await
    }

    pub async fn get_agent(agent_id: &str) -> Result<String, JsValue> {
        let url = api_url(&format!("/agents/{}", agent_id));
        Self::fetch_json(&url, "GET", None).await
    }

    pub async fn get_models() -> Result<String, JsValue> {
        Self::fetch_json(&api_url("/llm/models"), "GET", None).await
    }

    pub async fn create_agent(agent_data: &str) -> Result<String, JsValue> {
        Self::fetch_json(&api_url("/agents"), "POST", Some(agent_data)).await
    }

    pub async fn update_agent(agent_id: &str, agent_data: &str) -> Result<String, JsValue> {
        let url = api_url(&format!("/agents/{}", agent_id));
        Self::fetch_json(&url, "PUT", Some(agent_data)).await
    }

    pub async fn delete_agent(agent_id: &str) -> Result<(), JsValue> {
        let url = api_url(&format!("/agents/{}", agent_id));
        let _ = Self::fetch_json(&url, "DELETE", None).await?;
        Ok(())
    }

    pub async fn send_chat(agent_id: &str, chat_data: &str) -> Result<String, JsValue> {
        let url = api_url(&format!("/agents/{}/chat", agent_id));
        Self::fetch_json(&url, "POST", Some(chat_data)).await
    }

    // ---------------- Workflows ----------------

    pub async fn get_workflows() -> Result<String, JsValue> {
        Self::fetch_json(&api_url("/workflows"), "GET", None).await
    }

    pub async fn get_workflow(workflow_id: &str) -> Result<String, JsValue> {
        let url = api_url(&format!("/workflows/{}", workflow_id));
        Self::fetch_json(&url, "GET", None).await
    }

    pub async fn create_workflow(workflow_data: &str) -> Result<String, JsValue> {
        Self::fetch_json(&api_url("/workflows"), "POST", Some(workflow_data)).await
    }

    pub async fn update_workflow(workflow_id: &str, workflow_data: &str) -> Result<String, JsValue> {
        let url = api_url(&format!("/workflows/{}", workflow_id));
        Self::fetch_json(&url, "PUT", Some(workflow_data)).await
    }

    pub async fn delete_workflow(workflow_id: &str) -> Result<(), JsValue> {
        let url = api_url(&format!("/workflows/{}", workflow_id));
        let _ = Self::fetch_json(&url, "DELETE", None).await?;
        Ok(())
    }

    // ---------------- Integrations ----------------

    pub async fn get_integrations() -> Result<String, JsValue> {
        Self::fetch_json(&api_url("/integrations"), "GET", None).await
    }

    pub async fn create_integration(integration_data: &str) -> Result<String, JsValue> {
        Self::fetch_json(&api_url("/integrations"), "POST", Some(integration_data)).await
    }

    pub async fn update_integration(
        integration_id: &str,
        integration_data: &str,
    ) -> Result<String, JsValue> {
        let url = api_url(&format!("/integrations/{}", integration_id));
        Self::fetch_json(&url, "PUT", Some(integration_data)).await
    }

    pub async fn delete_integration(integration_id: &str) -> Result<(), JsValue> {
        let url = api_url(&format!("/integrations/{}", integration_id));
        let _ = Self::fetch_json(&url, "DELETE", None).await?;
        Ok(())
    }

    pub async fn get_available_integrations() -> Result<String, JsValue> {
        Self::fetch_json(&api_url("/integrations/available"), "GET", None).await
    }

    pub async fn test_snowflake(config_data: &str) -> Result<String, JsValue> {
        let url = api_url("/integrations/snowflake/test");
        Self::fetch_json(&url, "POST", Some(config_data)).await
    }

    pub async fn get_drive_auth_url() -> Result<String, JsValue> {
        let url = api_url("/integrations/google-drive/auth");
        Self::fetch_json(&url, "GET", None).await
    }

    pub async fn get_drive_status() -> Result<String, JsValue> {
        let url = api_url("/integrations/google-drive/status");
        Self::fetch_json(&url, "GET", None).await
    }

    // ---------------- Shared fetch helper ----------------

    pub async fn fetch_json(url: &str, method: &str, body: Option<&str>) -> Result<String, JsValue> {
        use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new()?;
        if let Some(data) = body {
            opts.set_body(&JsValue::from_str(data));
            headers.append("Content-Type", "application/json")?;
        }
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(url, &opts)?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;

        if !resp.ok() {
            return Err(JsValue::from_str(&format!(
                "API request failed: {} {}",
                resp.status(),
                resp.status_text()
            )));
        }

        let text = JsFuture::from(resp.text()?).await?;
        Ok(text.as_string().unwrap_or_default())
    }
}

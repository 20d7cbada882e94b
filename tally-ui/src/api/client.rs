//! HTTP API Client
//!
//! Functions for communicating with the Tally REST API.

use gloo_net::http::{Request, Response};

use crate::state::global::DashboardView;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8082/api/v1";

const API_URL_KEY: &str = "tally_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_KEY, url.trim_end_matches('/'));
        }
    }
}

/// Health endpoint lives beside the versioned API, not under it
pub fn health_url(api_base: &str) -> String {
    match api_base.strip_suffix("/api/v1") {
        Some(root) => format!("{}/health", root),
        None => format!("{}/health", api_base),
    }
}

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub employees: usize,
    pub ws_connections: usize,
    pub uptime_seconds: u64,
    pub version: String,
}

#[derive(Debug, serde::Serialize)]
struct AddEmployeeRequest<'a> {
    name: &'a str,
    sales: f64,
}

// ============ API Functions ============

/// Turn a non-success response into the server's error message
async fn error_message(response: Response, fallback: &str) -> String {
    match response.json::<ApiError>().await {
        Ok(body) => body.error.message,
        Err(_) => format!("{} ({})", fallback, response.status()),
    }
}

/// Fetch the formatted dashboard view
pub async fn fetch_dashboard() -> Result<DashboardView, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/dashboard", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Unable to load dashboard").await);
    }

    response.json().await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Add one employee; the server applies the commission rule
pub async fn add_employee(name: &str, sales: f64) -> Result<(), String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/employees", api_base))
        .json(&AddEmployeeRequest { name, sales })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Unable to add employee").await);
    }

    Ok(())
}

/// Remove every employee. Callers must have asked the user first.
pub async fn clear_employees() -> Result<(), String> {
    let api_base = get_api_base();

    let response = Request::delete(&format!("{}/employees?confirm=true", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Clear failed").await);
    }

    Ok(())
}

/// Check API health
pub async fn check_health() -> Result<HealthResponse, String> {
    let response = Request::get(&health_url(&get_api_base()))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err("API is not healthy".to_string());
    }

    response.json().await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Export the ranked view as CSV or JSON text
pub async fn export_ranking(format: &str) -> Result<String, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/export?format={}", api_base, format))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Export failed").await);
    }

    response.text().await
        .map_err(|e| format!("Parse error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_url() {
        assert_eq!(
            health_url("http://localhost:8082/api/v1"),
            "http://localhost:8082/health"
        );
        assert_eq!(health_url("http://tally.local"), "http://tally.local/health");
    }

    #[test]
    fn test_error_body_parses() {
        let json = r#"{"error": {"code": "VALIDATION_ERROR", "message": "Employee name cannot be empty"}, "request_id": "abc"}"#;
        let parsed: ApiError = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.error.code, "VALIDATION_ERROR");
    }
}

//! HTTP client adapter for the metric API.
//!
//! Fixed base URL and timeout, JSON in and out. Every failure is logged here
//! and returned as [`ApiError`] so the caller decides what the user sees.

use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::callback::Timeout;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const REQUEST_TIMEOUT_MS: u32 = 8000;

static API_CONFIG: Lazy<ApiConfig> = Lazy::new(ApiConfig::from_env);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u32,
}

impl ApiConfig {
    pub fn new(base_url: &str, timeout_ms: u32) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            timeout_ms,
        }
    }

    /// Base URL is baked in at build time from `METRICONE_API_BASE_URL`
    pub fn from_env() -> Self {
        let base_url = option_env!("METRICONE_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL);
        Self::new(base_url, REQUEST_TIMEOUT_MS)
    }

    /// Join `path` onto the base with exactly one `/`, append the encoded query
    pub fn url(&self, path: &str, query: Option<&str>) -> String {
        let path = path.trim_start_matches('/');
        match query {
            Some(q) if !q.is_empty() => format!("{}/{}?{}", self.base_url, path, q),
            _ => format!("{}/{}", self.base_url, path),
        }
    }
}

pub fn api_config() -> &'static ApiConfig {
    &API_CONFIG
}

/// Full URL for an API path, without a query string
///
/// ```ignore
/// let url = api_url("/metrics/7");
/// ```
pub fn api_url(path: &str) -> String {
    api_config().url(path, None)
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {0} ms")]
    Timeout(u32),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    Decode(String),
    #[error("{0}")]
    InvalidInput(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }

    /// Short text for a failure notice
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) | ApiError::Timeout(_) => {
                "Network error, please try again".to_string()
            }
            ApiError::Status { status: 404, .. } => "Not found".to_string(),
            ApiError::Status { status, .. } => format!("Request failed (HTTP {})", status),
            ApiError::Decode(_) => "Unexpected server response".to_string(),
            ApiError::InvalidInput(msg) => msg.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Transport-independent description of one API call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    /// Already encoded query string, without `?`
    pub query: Option<String>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            query: None,
            body: None,
        }
    }

    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: None,
        }
    }

    /// Encode filter params; `None` fields are skipped by their serde attrs
    pub fn with_query<Q: Serialize>(mut self, params: &Q) -> Self {
        match serde_qs::to_string(params) {
            Ok(q) if !q.is_empty() => self.query = Some(q),
            Ok(_) => self.query = None,
            Err(e) => log::warn!("failed to encode query for {}: {}", self.path, e),
        }
        self
    }

    pub fn with_body(mut self, body: Option<serde_json::Value>) -> Self {
        self.body = body;
        self
    }

    pub fn url(&self, config: &ApiConfig) -> String {
        config.url(&self.path, self.query.as_deref())
    }
}

/// Decode a response body; empty bodies (204 on delete) become `Null`
pub fn decode_body(text: &str) -> Result<serde_json::Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
    match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Patch => Request::patch(url),
        HttpMethod::Delete => Request::delete(url),
    }
}

/// Send a request with the configured timeout.
pub async fn send(request: &ApiRequest) -> Result<serde_json::Value, ApiError> {
    let config = api_config();
    let url = request.url(config);
    log::debug!("{} {}", request.method.as_str(), url);

    let controller = web_sys::AbortController::new()
        .map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    let signal = controller.signal();
    let timed_out = Rc::new(Cell::new(false));
    let timer = {
        let timed_out = timed_out.clone();
        Timeout::new(config.timeout_ms, move || {
            timed_out.set(true);
            controller.abort();
        })
    };

    let builder = builder(request.method, &url)
        .header("Accept", "application/json")
        .abort_signal(Some(&signal));
    let sent = match &request.body {
        Some(body) => match builder.json(body) {
            Ok(req) => req.send().await,
            Err(e) => return Err(ApiError::InvalidInput(e.to_string())),
        },
        None => builder.send().await,
    };
    drop(timer);

    let response = match sent {
        Ok(r) => r,
        Err(e) => {
            let err = if timed_out.get() {
                ApiError::Timeout(config.timeout_ms)
            } else {
                ApiError::Network(e.to_string())
            };
            log::error!("Network error {} {}: {}", request.method.as_str(), url, err);
            return Err(err);
        }
    };

    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    if !response.ok() {
        log::error!("API error {} {}", status, text);
        return Err(ApiError::Status { status, body: text });
    }
    decode_body(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_metric::aggregate::MetricListFilters;

    #[test]
    fn test_base_url_normalized() {
        let config = ApiConfig::new("http://api.local/api///", 8000);
        assert_eq!(config.base_url, "http://api.local/api");
        assert_eq!(config.url("/metrics", None), "http://api.local/api/metrics");
        assert_eq!(config.url("metrics/7", Some("")), "http://api.local/api/metrics/7");
    }

    #[test]
    fn test_api_url_uses_global_config() {
        let expected = format!("{}/metrics/7", api_config().base_url);
        assert_eq!(api_url("/metrics/7"), expected);
        assert_eq!(api_url("metrics/7"), expected);
    }

    #[test]
    fn test_default_config() {
        let config = ApiConfig::new(DEFAULT_API_BASE_URL, REQUEST_TIMEOUT_MS);
        assert_eq!(config.timeout_ms, 8000);
        assert_eq!(config.url("calibers", None), "http://localhost:8000/api/calibers");
    }

    #[test]
    fn test_query_skips_unset_filters() {
        let filters = MetricListFilters {
            keyword: Some("gmv".into()),
            subject_area: None,
            sensitivity: Some("secret".into()),
        };
        let request = ApiRequest::get("metrics").with_query(&filters);
        assert_eq!(request.query.as_deref(), Some("keyword=gmv&sensitivity=secret"));

        let empty = ApiRequest::get("metrics").with_query(&MetricListFilters::default());
        assert_eq!(empty.query, None);
        let config = ApiConfig::new("http://h/api", 8000);
        assert_eq!(empty.url(&config), "http://h/api/metrics");
    }

    #[test]
    fn test_decode_empty_body_is_null() {
        assert_eq!(decode_body("").unwrap(), serde_json::Value::Null);
        assert_eq!(decode_body("  \n").unwrap(), serde_json::Value::Null);
        assert_eq!(decode_body("[1]").unwrap(), serde_json::json!([1]));
        assert!(matches!(decode_body("{oops"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_error_classification() {
        let not_found = ApiError::Status { status: 404, body: "{\"detail\":\"Metric not found\"}".into() };
        assert!(not_found.is_not_found());
        assert_eq!(not_found.user_message(), "Not found");
        assert!(!ApiError::Timeout(8000).is_not_found());
        assert_eq!(
            ApiError::Status { status: 500, body: String::new() }.user_message(),
            "Request failed (HTTP 500)"
        );
    }
}

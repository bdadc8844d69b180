//! # API Client
//!
//! Thin JSON-over-HTTP client for the MicroShop backend.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  get / post / put / delete (path)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  base_url + path segments ── Authorization: Bearer <token> (if set)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  reqwest ──► 2xx ──► body is {success,...}? ─yes─► envelope            │
//! │       │                     │                                           │
//! │       │                     no ──► body is the payload                 │
//! │       │                                                                 │
//! │       ├──► non-2xx ──► error field of body, or "Request failed ..."    │
//! │       └──► transport failure ──► "Network error: ..."                  │
//! │                                                                         │
//! │  Every branch ends as ApiResponse<T>; nothing is returned as Err.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};
use url::Url;

use microshop_core::ApiResponse;

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};

/// Shared HTTP client. Clones share the connection pool and the token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    auth_token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Builds a client for `config.base_url`.
    ///
    /// Fails only when the base URL is not an absolute http(s) URL or the
    /// TLS backend cannot initialise.
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        debug!(base_url = %base_url, "API client ready");

        Ok(ApiClient {
            http,
            base_url,
            auth_token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sets or clears the bearer token sent with every request.
    pub fn set_auth_token(&self, token: Option<String>) {
        let mut guard = match self.auth_token.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = token;
    }

    pub fn auth_token(&self) -> Option<String> {
        match self.auth_token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Absolute URL for an endpoint path. Path segments are appended to
    /// any prefix in the base URL and percent-encoded.
    pub fn url(&self, path: &str) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?;
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        Ok(url)
    }

    // =========================================================================
    // Verbs
    // =========================================================================

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResponse<T> {
        let request = self.request(Method::GET, path);
        flatten("GET", path, self.execute(request).await)
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path).map(|r| r.json(body));
        flatten("POST", path, self.execute(request).await)
    }

    /// POST without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResponse<T> {
        let request = self.request(Method::POST, path);
        flatten("POST", path, self.execute(request).await)
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::PUT, path).map(|r| r.json(body));
        flatten("PUT", path, self.execute(request).await)
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResponse<T> {
        let request = self.request(Method::DELETE, path);
        flatten("DELETE", path, self.execute(request).await)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let url = self.url(path)?;
        debug!(method = %method, url = %url, "API request");

        let mut request = self.http.request(method, url);
        if let Some(token) = self.auth_token() {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: ClientResult<RequestBuilder>,
    ) -> ClientResult<T> {
        let response = request?.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        decode_payload(status.as_u16(), &body)
    }
}

/// Reads a 2xx body: either an `ApiResponse` envelope or the bare payload.
fn decode_payload<T: DeserializeOwned>(status: u16, body: &str) -> ClientResult<T> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))?;

    let is_envelope = value
        .get("success")
        .map(serde_json::Value::is_boolean)
        .unwrap_or(false);

    if !is_envelope {
        return serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()));
    }

    let envelope: ApiResponse<T> =
        serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))?;
    match envelope {
        ApiResponse {
            success: true,
            data: Some(data),
            ..
        } => Ok(data),
        ApiResponse {
            success: true,
            data: None,
            ..
        } => Err(ClientError::Decode("response has no data".to_string())),
        ApiResponse { error, .. } => Err(ClientError::Status {
            status,
            message: error.unwrap_or_else(|| "Request failed".to_string()),
        }),
    }
}

fn flatten<T>(method: &str, path: &str, result: ClientResult<T>) -> ApiResponse<T> {
    match result {
        Ok(data) => ApiResponse::ok(data),
        Err(e) => {
            warn!(method, path, status = ?e.status(), error = %e, "API request failed");
            ApiResponse::err(e.to_string())
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

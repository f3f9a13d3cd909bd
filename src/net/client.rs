//! HTTP plumbing shared by every endpoint wrapper.
//!
//! ARCHITECTURE
//! ============
//! One `ApiClient` owns the `reqwest::Client` and the backend base URL. The
//! bearer credential is read from the durable mirror at send time, so any
//! session change is visible to the next request without rebuilding the
//! client. Endpoint methods live in sibling modules as `impl ApiClient` blocks.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures map to `ApiError::Network`, non-2xx answers to
//! `ApiError::Status` with the raw body kept for presentation.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::util::storage::{KeyValueStore, TOKEN_KEY};

/// Typed client for the foody REST backend.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn KeyValueStore>,
}

impl ApiClient {
    /// Build a client from config. `store` is the durable mirror the bearer
    /// token is read from.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone(), store })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =========================================================================
    // REQUEST BUILDING
    // =========================================================================

    /// Start a request carrying the mirrored bearer token, if any.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let token = self.store.get(TOKEN_KEY);
        self.request_with_token(method, path, token.as_deref())
    }

    /// Start a request carrying an explicit credential instead of the mirror's.
    pub(crate) fn request_with_token(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, join_url(&self.base_url, path));
        match bearer_value(token) {
            Some(value) => builder.header(reqwest::header::AUTHORIZATION, value),
            None => builder,
        }
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    pub(crate) fn patch(&self, path: &str) -> RequestBuilder {
        self.request(Method::PATCH, path)
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    // =========================================================================
    // RESPONSE HANDLING
    // =========================================================================

    async fn send(request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "request rejected");
            return Err(ApiError::Status { status: status.as_u16(), body });
        }
        Ok(response)
    }

    /// Send and decode a JSON body.
    pub(crate) async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = Self::send(request).await?;
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;
        decode_json(&text)
    }

    /// Send and return the body as plain text. Many mutations answer with a
    /// bare message string.
    pub(crate) async fn text(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = Self::send(request).await?;
        response
            .text()
            .await
            .map_err(|e| ApiError::from_transport(&e))
    }
}

/// Join the base URL and an endpoint path with exactly one slash between them.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// `Authorization` header value for a token; blank tokens send nothing.
pub(crate) fn bearer_value(token: Option<&str>) -> Option<String> {
    token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| format!("Bearer {t}"))
}

/// Drop unset query parameters, keeping the order of the rest.
pub(crate) fn query_pairs(params: &[(&'static str, Option<String>)]) -> Vec<(&'static str, String)> {
    params
        .iter()
        .filter_map(|(key, value)| value.clone().map(|v| (*key, v)))
        .collect()
}

pub(crate) fn decode_json<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

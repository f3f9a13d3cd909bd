//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for ClientTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend root, without a trailing slash.
    pub base_url: String,
    pub timeouts: ClientTimeouts,
}

impl ClientConfig {
    /// Build a config for `base_url` with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL has no `http`/`https` scheme.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self { base_url: normalize_base_url(base_url)?, timeouts: ClientTimeouts::default() })
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `FOODY_API_BASE_URL`: default `http://localhost:8080`
    /// - `FOODY_REQUEST_TIMEOUT_SECS`: default 30
    /// - `FOODY_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), but with an explicit base URL.
    /// `FOODY_API_BASE_URL` is not read.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is malformed.
    pub fn from_env_with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Self::from_vars_with_base_url(base_url, |key| std::env::var(key).ok())
    }

    pub(crate) fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("FOODY_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        Self::from_vars_with_base_url(&base_url, lookup)
    }

    pub(crate) fn from_vars_with_base_url<F>(base_url: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeouts = ClientTimeouts {
            request_secs: parse_u64(lookup("FOODY_REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(lookup("FOODY_CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Ok(Self { base_url: normalize_base_url(base_url)?, timeouts })
    }
}

fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

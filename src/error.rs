//! Failure types shared by every remote call.
//!
//! ERROR HANDLING
//! ==============
//! The session core forwards `ApiError` values unchanged; turning them into
//! user-facing text is the job of `util::error_message`.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors produced by HTTP calls against the foody backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No response was received (connect failure, timeout, transport error).
    #[error("network request failed: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("server responded with status {status}")]
    Status { status: u16, body: String },

    /// A success body could not be parsed into the expected type.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the server responded at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` when the server rejected the credential (401 or 403).
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    pub(crate) fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Errors produced while reading client configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The base URL does not start with `http://` or `https://`.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

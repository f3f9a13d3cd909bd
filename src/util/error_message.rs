//! User-facing text for API failures.
//!
//! The session core never formats errors itself; stores and the CLI call
//! `show_error` at the point where a message is shown to a person.

#[cfg(test)]
#[path = "error_message_test.rs"]
mod error_message_test;

use serde_json::Value;

use crate::error::ApiError;

const NETWORK_MESSAGE: &str = "Check your network connection.";

/// Translate an error into a message suitable for display.
#[must_use]
pub fn describe(err: &ApiError) -> String {
    match err {
        ApiError::Network(_) => NETWORK_MESSAGE.to_owned(),
        ApiError::Status { status, body } => {
            server_message(body).unwrap_or_else(|| default_for_status(*status))
        }
        ApiError::Decode(_) | ApiError::HttpClientBuild(_) => err.to_string(),
    }
}

/// Log `err` with optional call-site context.
pub fn log_error(err: &ApiError, context: Option<&str>) {
    match err {
        ApiError::Status { status, body } => {
            tracing::error!(context = context.unwrap_or("-"), status, body = %body, "request failed");
        }
        other => tracing::error!(context = context.unwrap_or("-"), error = %other, "request failed"),
    }
}

/// Log and describe in one step.
#[must_use]
pub fn show_error(err: &ApiError, context: Option<&str>) -> String {
    log_error(err, context);
    describe(err)
}

/// Pull a confirmation message out of a success body, falling back to
/// `default`.
#[must_use]
pub fn extract_success_message(body: &str, default: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        if let Some(Value::String(message)) = map.get("message") {
            if !message.is_empty() {
                return message.clone();
            }
        }
        return default.to_owned();
    }
    let trimmed = body.trim();
    if trimmed.is_empty() { default.to_owned() } else { trimmed.to_owned() }
}

// =============================================================================
// BODY EXTRACTION
// =============================================================================

fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<Value>(trimmed) else {
        return Some(trimmed.to_owned());
    };

    match value {
        Value::Object(map) => {
            if let Some(message) = map.get("message").and_then(non_empty_text) {
                return Some(message);
            }
            let validation: Vec<String> = map
                .iter()
                .filter(|(key, _)| *key != "message" && *key != "error")
                .filter_map(|(_, v)| non_empty_text(v))
                .collect();
            // An object carrying only `error` falls through to the status text.
            (!validation.is_empty()).then(|| validation.join(", "))
        }
        Value::String(text) if !text.is_empty() => Some(text),
        _ => None,
    }
}

fn non_empty_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn default_for_status(status: u16) -> String {
    match status {
        400 => "Bad request.".to_owned(),
        401 => "Login required.".to_owned(),
        403 => "Access denied.".to_owned(),
        404 => "The requested resource was not found.".to_owned(),
        409 => "Duplicate data already exists.".to_owned(),
        500 => "A server error occurred.".to_owned(),
        other => format!("An error occurred. ({other})"),
    }
}

//! Email verification and the public (token-free) lookups used at signup.

use super::client::{ApiClient, query_pairs};
use super::types::{ActivityLevelResponse, EmailRequest};
use crate::error::ApiError;

impl ApiClient {
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn send_verification_code(&self, email: &str) -> Result<String, ApiError> {
        let body = serde_json::json!({ "email": email });
        self.text(self.post("/email/send").json(&body)).await
    }

    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn verify_email_code(&self, request: &EmailRequest) -> Result<String, ApiError> {
        self.text(self.post("/email/verify").json(request)).await
    }

    /// `true` when `email` is already registered.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn check_email_duplicate(&self, email: &str) -> Result<bool, ApiError> {
        let query = query_pairs(&[("email", Some(email.to_owned()))]);
        self.json(self.get("/email/check-email").query(&query)).await
    }

    /// Activity levels offered on the signup form.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn public_activity_levels(&self) -> Result<Vec<ActivityLevelResponse>, ApiError> {
        self.json(self.get("/account/activitylevels")).await
    }
}

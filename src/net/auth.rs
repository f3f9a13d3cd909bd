//! Account endpoints: signup, login/logout, and account recovery.

use super::client::{ApiClient, query_pairs};
use super::types::{FindAccountRequest, LoginRequest, LoginResponse, SignupRequest};
use crate::error::ApiError;

impl ApiClient {
    /// Register a new account via `POST /account/signup`.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn signup(&self, request: &SignupRequest) -> Result<String, ApiError> {
        self.text(self.post("/account/signup").json(request)).await
    }

    /// Exchange credentials for an access token via `POST /account/login`.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call; rejected
    /// credentials surface as `ApiError::Status`.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.json(self.post("/account/login").json(request)).await
    }

    /// Invalidate the current token server-side via `POST /account/logout`.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn logout(&self) -> Result<String, ApiError> {
        self.text(self.post("/account/logout")).await
    }

    /// `true` when `id` is already taken.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn check_id_duplicate(&self, id: &str) -> Result<bool, ApiError> {
        let query = query_pairs(&[("id", Some(id.to_owned()))]);
        self.json(self.get("/account/check-id").query(&query)).await
    }

    /// Send an account-recovery code to `email` (find-id flow).
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn send_find_id_code(&self, email: &str) -> Result<String, ApiError> {
        let body = serde_json::json!({ "email": email });
        self.text(self.post("/account/find-id/send").json(&body)).await
    }

    /// Verify a find-id code and return the account id.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn verify_find_id(&self, request: &FindAccountRequest) -> Result<String, ApiError> {
        self.text(self.post("/account/find-id/verify").json(request)).await
    }

    /// Send a password-reset code for `id`/`email`.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn send_find_password_code(&self, id: &str, email: &str) -> Result<String, ApiError> {
        let body = serde_json::json!({ "id": id, "email": email });
        self.text(self.post("/account/find-pw/send").json(&body)).await
    }

    /// Verify a reset code; the server issues a temporary password.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn reset_password(&self, request: &FindAccountRequest) -> Result<String, ApiError> {
        self.text(self.post("/account/find-pw/verify").json(request)).await
    }
}

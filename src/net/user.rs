//! Endpoints for the signed-in user's own account. All require a token.

use reqwest::Method;

use super::client::ApiClient;
use super::types::{ChangePasswordRequest, UserResponse, UserUpdateRequest};
use crate::error::ApiError;

const MY_INFO_PATH: &str = "/user";

impl ApiClient {
    /// Fetch the signed-in user's profile via `GET /user`.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn my_info(&self) -> Result<UserResponse, ApiError> {
        self.json(self.get(MY_INFO_PATH)).await
    }

    /// Fetch the profile for an explicit token, bypassing the mirror.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call; an expired or
    /// revoked token surfaces as `ApiError::Status`.
    pub async fn my_info_with_token(&self, token: &str) -> Result<UserResponse, ApiError> {
        self.json(self.request_with_token(Method::GET, MY_INFO_PATH, Some(token)))
            .await
    }

    /// Update profile fields via `PATCH /user`.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn update_my_info(&self, request: &UserUpdateRequest) -> Result<String, ApiError> {
        self.text(self.patch(MY_INFO_PATH).json(request)).await
    }

    /// Change password via `POST /user/change-pw`.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<String, ApiError> {
        self.text(self.post("/user/change-pw").json(request)).await
    }

    /// Delete the account via `DELETE /user`.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn delete_account(&self) -> Result<String, ApiError> {
        self.text(self.delete(MY_INFO_PATH)).await
    }
}

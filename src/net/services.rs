//! Remote collaborator seams consumed by the client-side stores.
//!
//! DESIGN
//! ======
//! The stores depend on these traits rather than on `ApiClient`, so tests can
//! swap in fakes and embedders can route calls through their own transport.

use async_trait::async_trait;

use super::client::ApiClient;
use super::types::{
    FavoriteCodeResponse, FavoriteRequest, FavoriteResponse, LoginRequest, LoginResponse, PageResponse, UserResponse,
};
use crate::error::ApiError;

/// Credential exchange and server-side session teardown.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;
    async fn logout(&self) -> Result<(), ApiError>;
}

/// Profile lookup used to verify a token.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn fetch_my_profile(&self, token: &str) -> Result<UserResponse, ApiError>;
}

/// Favorites listing and mutation.
#[async_trait]
pub trait FavoritesService: Send + Sync {
    async fn favorite_page(&self, page: u32, filter: Option<&str>)
    -> Result<PageResponse<FavoriteResponse>, ApiError>;
    async fn favorite_codes(&self) -> Result<Vec<FavoriteCodeResponse>, ApiError>;
    async fn add_favorite(&self, request: &FavoriteRequest) -> Result<String, ApiError>;
    async fn delete_favorite(&self, favorite_id: i64) -> Result<String, ApiError>;
}

#[async_trait]
impl AuthService for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        ApiClient::login(self, request).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        ApiClient::logout(self).await.map(|_| ())
    }
}

#[async_trait]
impl UserService for ApiClient {
    async fn fetch_my_profile(&self, token: &str) -> Result<UserResponse, ApiError> {
        self.my_info_with_token(token).await
    }
}

#[async_trait]
impl FavoritesService for ApiClient {
    async fn favorite_page(
        &self,
        page: u32,
        filter: Option<&str>,
    ) -> Result<PageResponse<FavoriteResponse>, ApiError> {
        self.favorite_list(page, filter).await
    }

    async fn favorite_codes(&self) -> Result<Vec<FavoriteCodeResponse>, ApiError> {
        ApiClient::favorite_codes(self).await
    }

    async fn add_favorite(&self, request: &FavoriteRequest) -> Result<String, ApiError> {
        ApiClient::add_favorite(self, request).await
    }

    async fn delete_favorite(&self, favorite_id: i64) -> Result<String, ApiError> {
        ApiClient::delete_favorite(self, favorite_id).await
    }
}

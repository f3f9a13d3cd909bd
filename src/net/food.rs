//! Food catalog, image analysis, and favorites endpoints.

use reqwest::multipart::{Form, Part};

use super::client::{ApiClient, query_pairs};
use super::types::{
    AiFoodResponse, FavoriteCodeResponse, FavoriteRequest, FavoriteResponse, FoodResponse, PageResponse,
};
use crate::error::ApiError;

const FAVORITE_PATH: &str = "/food/auth/favorite";

impl ApiClient {
    /// Page through the food catalog, optionally filtered by keyword and
    /// category.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn food_list(
        &self,
        page: u32,
        keyword: Option<&str>,
        category: Option<&str>,
    ) -> Result<PageResponse<FoodResponse>, ApiError> {
        let query = query_pairs(&[
            ("page", Some(page.to_string())),
            ("keyword", keyword.map(str::to_owned)),
            ("category", category.map(str::to_owned)),
        ]);
        self.json(self.get("/food/").query(&query)).await
    }

    /// Upload a meal photo for nutrition estimation.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn analyze_food(&self, file_name: &str, image: Vec<u8>) -> Result<AiFoodResponse, ApiError> {
        let part = Part::bytes(image).file_name(file_name.to_owned());
        let form = Form::new().part("image", part);
        self.json(self.post("/food/analyze").multipart(form)).await
    }

    /// List food categories. No token required.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn categories(&self) -> Result<Vec<String>, ApiError> {
        self.json(self.get("/food/categories")).await
    }

    /// Page through foods the user registered themselves.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn user_food_list(&self, page: u32) -> Result<PageResponse<FoodResponse>, ApiError> {
        let query = query_pairs(&[("page", Some(page.to_string()))]);
        self.json(self.get("/food/auth/user-food").query(&query))
            .await
    }

    /// Add a food to favorites.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn add_favorite(&self, request: &FavoriteRequest) -> Result<String, ApiError> {
        self.text(self.post(FAVORITE_PATH).json(request)).await
    }

    /// Page through favorites.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn favorite_list(
        &self,
        page: u32,
        filter: Option<&str>,
    ) -> Result<PageResponse<FavoriteResponse>, ApiError> {
        let query = query_pairs(&[("page", Some(page.to_string())), ("filter", filter.map(str::to_owned))]);
        self.json(self.get(FAVORITE_PATH).query(&query)).await
    }

    /// Every favorite's code and id, across all pages.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn favorite_codes(&self) -> Result<Vec<FavoriteCodeResponse>, ApiError> {
        self.json(self.get("/food/auth/favorite/codes")).await
    }

    /// Remove a favorite by id.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn delete_favorite(&self, favorite_id: i64) -> Result<String, ApiError> {
        let query = query_pairs(&[("favoriteId", Some(favorite_id.to_string()))]);
        self.text(self.delete(FAVORITE_PATH).query(&query)).await
    }
}

//! Favorite foods of the signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `favorites` holds only the first page for display. `favorite_map` covers
//! every favorite so "is this food starred?" can be answered for any food on
//! any page. Backend foods are keyed by their food code, user-registered
//! foods by `custom-<userFoodCode>`.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is recorded as display text in `error()`. `fetch_favorites`
//! swallows its error after recording it; mutations record and propagate.

#[cfg(test)]
#[path = "favorites_test.rs"]
mod favorites_test;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::ApiError;
use crate::net::services::FavoritesService;
use crate::net::types::{FavoriteCodeResponse, FavoriteRequest, FavoriteResponse, PageResponse};
use crate::util::error_message::show_error;

const CUSTOM_PREFIX: &str = "custom-";

#[derive(Debug, Default)]
struct Inner {
    favorites: Vec<FavoriteResponse>,
    favorite_map: HashMap<String, i64>,
    is_loading: bool,
    error: String,
}

pub struct FavoritesStore {
    service: Arc<dyn FavoritesService>,
    inner: RwLock<Inner>,
}

impl FavoritesStore {
    #[must_use]
    pub fn new(service: Arc<dyn FavoritesService>) -> Self {
        Self { service, inner: RwLock::new(Inner::default()) }
    }

    // =========================================================================
    // READS
    // =========================================================================

    #[must_use]
    pub fn favorites(&self) -> Vec<FavoriteResponse> {
        self.read(|inner| inner.favorites.clone())
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read(|inner| inner.is_loading)
    }

    /// Last recorded failure message, empty when none.
    #[must_use]
    pub fn error(&self) -> String {
        self.read(|inner| inner.error.clone())
    }

    #[must_use]
    pub fn find_favorite_id_by_code(&self, code: &str) -> Option<i64> {
        self.read(|inner| inner.favorite_map.get(code).copied())
    }

    #[must_use]
    pub fn is_favorite(&self, code: &str) -> bool {
        self.read(|inner| inner.favorite_map.contains_key(code))
    }

    pub fn clear_error(&self) {
        self.write(|inner| inner.error.clear());
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Reload the first page and the full code map. Failures are recorded,
    /// not returned.
    pub async fn fetch_favorites(&self) {
        self.begin();
        if let Err(e) = self.reload().await {
            let message = show_error(&e, Some("fetch_favorites"));
            self.write(|inner| inner.error = message);
        }
        self.write(|inner| inner.is_loading = false);
    }

    /// Fetch any page without touching the store.
    ///
    /// # Errors
    ///
    /// Returns the service error unchanged.
    pub async fn fetch_favorites_page(
        &self,
        page: u32,
        filter: Option<&str>,
    ) -> Result<PageResponse<FavoriteResponse>, ApiError> {
        self.service.favorite_page(page, filter).await
    }

    /// Star a food by its display code, then reload.
    ///
    /// # Errors
    ///
    /// Returns the service error after recording its message.
    pub async fn add_favorite(&self, code: &str) -> Result<(), ApiError> {
        self.begin();
        let request = favorite_request(code);
        if request.food_code.is_none() && request.user_food_code.is_none() {
            tracing::warn!(code, "favorite request carries no food code");
        }
        tracing::debug!(?request, "adding favorite");

        let result = self.service.add_favorite(&request).await;
        self.write(|inner| inner.is_loading = false);
        if let Err(e) = result {
            return Err(self.record(e, "add_favorite"));
        }

        self.fetch_favorites().await;
        Ok(())
    }

    /// Remove a favorite by id and drop it from local state.
    ///
    /// # Errors
    ///
    /// Returns the service error after recording its message.
    pub async fn remove_favorite(&self, favorite_id: i64) -> Result<(), ApiError> {
        self.begin();
        let result = self.service.delete_favorite(favorite_id).await;
        self.write(|inner| {
            inner.is_loading = false;
            if result.is_ok() {
                inner.favorites.retain(|fav| fav.id != favorite_id);
                inner.favorite_map.retain(|_, id| *id != favorite_id);
            }
        });
        match result {
            Ok(_) => Ok(()),
            Err(e) => Err(self.record(e, "remove_favorite")),
        }
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    async fn reload(&self) -> Result<(), ApiError> {
        let page = self.service.favorite_page(1, None).await?;
        self.write(|inner| inner.favorites = page.content);

        let codes = self.service.favorite_codes().await?;
        let map: HashMap<String, i64> = codes
            .iter()
            .filter_map(|entry| favorite_key(entry).map(|key| (key, entry.favorite_id)))
            .collect();
        tracing::debug!(count = map.len(), "favorite codes loaded");
        self.write(|inner| inner.favorite_map = map);
        Ok(())
    }

    fn begin(&self) {
        self.write(|inner| {
            inner.is_loading = true;
            inner.error.clear();
        });
    }

    fn record(&self, err: ApiError, context: &str) -> ApiError {
        let message = show_error(&err, Some(context));
        self.write(|inner| inner.error = message);
        err
    }

    fn read<T>(&self, f: impl FnOnce(&Inner) -> T) -> T {
        f(&self.inner.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn write<T>(&self, f: impl FnOnce(&mut Inner) -> T) -> T {
        f(&mut self.inner.write().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Map key for a code listing entry: the food code, else `custom-<n>`.
fn favorite_key(entry: &FavoriteCodeResponse) -> Option<String> {
    match (&entry.food_code, entry.user_food_code) {
        (Some(code), _) if !code.is_empty() => Some(code.clone()),
        (_, Some(user_code)) => Some(format!("{CUSTOM_PREFIX}{user_code}")),
        _ => None,
    }
}

/// `custom-<n>` and all-digit codes name user foods; anything else is a
/// backend food code.
fn favorite_request(code: &str) -> FavoriteRequest {
    let code = code.trim();
    if let Some(suffix) = code.strip_prefix(CUSTOM_PREFIX) {
        return FavoriteRequest { food_code: None, user_food_code: suffix.parse().ok() };
    }
    if !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit()) {
        return FavoriteRequest { food_code: None, user_food_code: code.parse().ok() };
    }
    FavoriteRequest { food_code: Some(code.to_owned()), user_food_code: None }
}

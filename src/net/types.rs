//! Wire DTOs for the foody backend.
//!
//! DESIGN
//! ======
//! Field names follow the backend's camelCase JSON so serde round-trips stay
//! lossless. Optional backend fields are `Option` with `#[serde(default)]`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// ACCOUNT / USER
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub id: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub user_id: String,
    pub name: String,
    pub role: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub id: String,
    pub password: String,
    pub name: String,
    pub age: u32,
    pub email: String,
    pub height: f64,
    pub weight: f64,
    pub gender: Gender,
    pub activity_level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_diabetes: Option<bool>,
}

/// Profile returned by `GET /user`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub activity_level: i32,
    #[serde(default)]
    pub is_diabetes: Option<bool>,
    pub role: String,
    #[serde(default)]
    pub std_weight: Option<f64>,
    #[serde(default)]
    pub std_kcal: Option<f64>,
    #[serde(default)]
    pub std_carb: Option<f64>,
    #[serde(default)]
    pub std_protein: Option<f64>,
    #[serde(default)]
    pub std_fat: Option<f64>,
    #[serde(default)]
    pub std_sugar: Option<f64>,
    #[serde(default)]
    pub std_natrium: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub email: String,
    pub height: f64,
    pub weight: f64,
    pub gender: Gender,
    pub activity_level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_diabetes: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Verification payload for the find-id / find-password flows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindAccountRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

// =============================================================================
// FOOD / FAVORITES
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FoodResponse {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub standard: String,
    pub kcal: f64,
    pub carb: f64,
    pub protein: f64,
    pub fat: f64,
    pub sugar: f64,
    pub natrium: f64,
}

/// Nutrition estimate returned by image analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiFoodResponse {
    pub name: String,
    #[serde(default)]
    pub standard: String,
    pub kcal: f64,
    pub carb: f64,
    pub protein: f64,
    pub fat: f64,
    pub sugar: f64,
    pub natrium: f64,
}

/// Exactly one of the two codes is expected to be set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub food_code: Option<String>,
    pub user_food_code: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub id: i64,
    pub user_id: String,
    #[serde(default)]
    pub food_code: Option<String>,
    #[serde(default)]
    pub user_food_code: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub food: Option<FoodResponse>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCodeResponse {
    pub favorite_id: i64,
    #[serde(default)]
    pub food_code: Option<String>,
    #[serde(default)]
    pub user_food_code: Option<i64>,
}

// =============================================================================
// CHARACTERS / CHAT
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterResponse {
    pub id: i64,
    pub name: String,
    pub img: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRoom {
    pub id: String,
    pub user_id: String,
    pub expert_id: String,
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: i64,
    pub room_id: String,
    pub sender_id: String,
    pub message: String,
    pub sent_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRoomResponse {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub report_id: i64,
    pub created_at: String,
}

// =============================================================================
// REPORTS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFoodItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_code: Option<String>,
    pub name: String,
    pub eaten_weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard: Option<f64>,
    pub kcal: f64,
    pub carb: f64,
    pub protein: f64,
    pub fat: f64,
    pub sugar: f64,
    pub natrium: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMealItem {
    pub meal_type: MealType,
    pub foods: Vec<ReportFoodItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub is_waited: bool,
    pub meals: Vec<ReportMealItem>,
}

/// One page of a paginated listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportListResponse {
    pub id: i64,
    pub user_id: String,
    #[serde(default)]
    pub score: Option<i32>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub character_id: Option<i64>,
    #[serde(default)]
    pub is_waited: Option<bool>,
    #[serde(default)]
    pub total_kcal: Option<f64>,
    #[serde(default)]
    pub total_carb: Option<f64>,
    #[serde(default)]
    pub total_protein: Option<f64>,
    #[serde(default)]
    pub total_fat: Option<f64>,
    #[serde(default)]
    pub total_sugar: Option<f64>,
    #[serde(default)]
    pub total_natrium: Option<f64>,
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealFoodResponse {
    pub id: i64,
    pub eaten_weight: f64,
    pub food_name: String,
    #[serde(default)]
    pub food_category: Option<String>,
    #[serde(default)]
    pub user_food_name: Option<String>,
    pub eaten_kcal: f64,
    pub eaten_carb: f64,
    pub eaten_protein: f64,
    pub eaten_fat: f64,
    pub eaten_sugar: f64,
    pub eaten_natrium: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealResponse {
    pub id: i64,
    pub meal_type: MealType,
    pub total_kcal: f64,
    pub total_carb: f64,
    pub total_protein: f64,
    pub total_fat: f64,
    pub total_sugar: f64,
    pub total_natrium: f64,
    #[serde(default)]
    pub meal_foods: Vec<MealFoodResponse>,
}

/// Full report with daily totals, the user's snapshot, and per-meal detail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: i64,
    pub user_id: String,
    pub score: i32,
    pub comment: String,
    pub character_id: i64,
    pub is_waited: bool,
    pub is_shared: bool,
    #[serde(default)]
    pub expert_id: Option<String>,
    #[serde(default)]
    pub expert_name: Option<String>,

    pub total_kcal: f64,
    pub total_carb: f64,
    pub total_protein: f64,
    pub total_fat: f64,
    pub total_sugar: f64,
    pub total_natrium: f64,

    pub user_age: u32,
    pub user_height: f64,
    pub user_weight: f64,
    pub user_gender: String,
    pub user_activity_level: i32,
    pub user_is_diabetes: bool,

    pub user_std_weight: f64,
    pub user_std_kcal: f64,
    pub user_std_carb: f64,
    pub user_std_protein: f64,
    pub user_std_fat: f64,
    pub user_std_sugar: f64,
    pub user_std_natrium: f64,

    pub created_at: String,
    #[serde(default)]
    pub meals: Vec<MealResponse>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportComment {
    pub id: i64,
    pub report_id: i64,
    pub author: String,
    pub comment: String,
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub report_id: i64,
    pub comment: String,
}

// =============================================================================
// ADMIN
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    pub user_id: String,
    pub role: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FoodRequest {
    pub code: String,
    pub name: String,
    pub category: String,
    pub standard: String,
    pub kcal: f64,
    pub carb: f64,
    pub protein: f64,
    pub fat: f64,
    pub sugar: f64,
    pub natrium: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivityLevelResponse {
    pub level: i32,
    pub value: f64,
    pub description: String,
}

pub type UpdateActivityLevelRequest = ActivityLevelResponse;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingReportResponse {
    pub id: i64,
    pub user_id: String,
    pub user_name: String,
    pub created_at: String,
    pub total_kcal: f64,
    pub total_carb: f64,
    pub total_protein: f64,
    pub total_fat: f64,
    pub total_sugar: f64,
    pub total_natrium: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWaitingReportRequest {
    pub id: i64,
    pub score: i32,
    pub character_id: i64,
    pub comment: String,
}

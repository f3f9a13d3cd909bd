//! Administrator endpoints. The backend requires `ROLE_ADMIN` for all of them.

use super::client::{ApiClient, query_pairs};
use super::types::{
    ActivityLevelResponse, FoodRequest, UpdateActivityLevelRequest, UpdateRoleRequest, UpdateWaitingReportRequest,
    WaitingReportResponse,
};
use crate::error::ApiError;

fn admin_food_path(code: &str) -> String {
    format!("/admin/{code}")
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn update_user_role(&self, request: &UpdateRoleRequest) -> Result<String, ApiError> {
        self.text(self.patch("/admin").json(request)).await
    }

    /// Add a food to the shared catalog.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn add_food(&self, request: &FoodRequest) -> Result<String, ApiError> {
        self.text(self.post("/admin").json(request)).await
    }

    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn update_food(&self, request: &FoodRequest) -> Result<String, ApiError> {
        self.text(self.patch("/admin/food").json(request)).await
    }

    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn delete_food(&self, code: &str) -> Result<String, ApiError> {
        self.text(self.delete(&admin_food_path(code))).await
    }

    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn activity_levels(&self) -> Result<Vec<ActivityLevelResponse>, ApiError> {
        self.json(self.get("/admin/activitylevel")).await
    }

    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn update_activity_level(&self, request: &UpdateActivityLevelRequest) -> Result<String, ApiError> {
        self.text(self.patch("/admin/activitylevel").json(request))
            .await
    }

    /// Reports waiting for an expert score.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn waiting_reports(&self, page: u32) -> Result<Vec<WaitingReportResponse>, ApiError> {
        let query = query_pairs(&[("page", Some(page.to_string()))]);
        self.json(self.get("/admin/report").query(&query)).await
    }

    /// Attach score, character, and comment to a waiting report.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn update_waiting_report(&self, request: &UpdateWaitingReportRequest) -> Result<String, ApiError> {
        self.text(self.patch("/admin/report").json(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_food_path_embeds_code() {
        assert_eq!(admin_food_path("D101"), "/admin/D101");
    }
}

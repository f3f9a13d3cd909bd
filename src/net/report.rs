//! Diet report endpoints. All require a token.

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;

use super::client::{ApiClient, query_pairs};
use super::types::{
    CommentRequest, PageResponse, ReportComment, ReportListResponse, ReportRequest, ReportResponse,
};
use crate::error::ApiError;

fn report_path(report_id: i64) -> String {
    format!("/report/{report_id}")
}

fn report_share_path(report_id: i64) -> String {
    format!("/report/{report_id}/share")
}

fn report_comments_path(report_id: i64) -> String {
    format!("/report/{report_id}/comment")
}

fn comment_path(comment_id: i64) -> String {
    format!("/report/comment/{comment_id}")
}

impl ApiClient {
    /// Submit a day's meals for scoring.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn create_report(&self, request: &ReportRequest) -> Result<String, ApiError> {
        self.text(self.post("/report").json(request)).await
    }

    /// Page through the user's reports, optionally bounded by `YYYY-MM-DD`
    /// dates.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn report_list(
        &self,
        page: u32,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<PageResponse<ReportListResponse>, ApiError> {
        let query = query_pairs(&[
            ("page", Some(page.to_string())),
            ("startDate", start_date.map(str::to_owned)),
            ("endDate", end_date.map(str::to_owned)),
        ]);
        self.json(self.get("/report").query(&query)).await
    }

    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn report_detail(&self, report_id: i64) -> Result<ReportResponse, ApiError> {
        self.json(self.get(&report_path(report_id))).await
    }

    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn delete_report(&self, report_id: i64) -> Result<String, ApiError> {
        self.text(self.delete(&report_path(report_id))).await
    }

    /// Flip the report's shared flag.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn toggle_share(&self, report_id: i64) -> Result<String, ApiError> {
        self.text(self.patch(&report_share_path(report_id))).await
    }

    /// Page through reports other users have shared.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn shared_reports(&self, page: u32) -> Result<PageResponse<ReportResponse>, ApiError> {
        let query = query_pairs(&[("page", Some(page.to_string()))]);
        self.json(self.get("/report/shared").query(&query)).await
    }

    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn add_comment(&self, request: &CommentRequest) -> Result<String, ApiError> {
        self.text(self.post("/report/comment").json(request)).await
    }

    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn comments(&self, report_id: i64) -> Result<Vec<ReportComment>, ApiError> {
        self.json(self.get(&report_comments_path(report_id))).await
    }

    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn delete_comment(&self, comment_id: i64) -> Result<String, ApiError> {
        self.text(self.delete(&comment_path(comment_id))).await
    }
}

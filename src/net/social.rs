//! Character and expert-chat endpoints.

use super::client::ApiClient;
use super::types::{CharacterResponse, ChatMessage, ChatRoom, ChatRoomResponse};
use crate::error::ApiError;

fn room_messages_path(room_id: &str) -> String {
    format!("/chat/room/{room_id}/messages")
}

impl ApiClient {
    /// Every character the app can award.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn all_characters(&self) -> Result<Vec<CharacterResponse>, ApiError> {
        self.json(self.get("/character")).await
    }

    /// Characters the signed-in user has collected.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn my_characters(&self) -> Result<Vec<CharacterResponse>, ApiError> {
        self.json(self.get("/character/my-foody")).await
    }

    /// Open (or reuse) the expert chat room attached to a report.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn create_or_get_room(&self, report_id: i64) -> Result<ChatRoom, ApiError> {
        let body = serde_json::json!({ "reportId": report_id });
        self.json(self.post("/chat/room").json(&body)).await
    }

    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn room_messages(&self, room_id: &str) -> Result<Vec<ChatMessage>, ApiError> {
        self.json(self.get(&room_messages_path(room_id))).await
    }

    /// Rooms assigned to the signed-in expert.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the call.
    pub async fn expert_rooms(&self) -> Result<Vec<ChatRoomResponse>, ApiError> {
        self.json(self.get("/chat/expert/rooms")).await
    }
}

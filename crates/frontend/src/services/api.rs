use chrono::NaiveDate;
use gloo_net::http::Request;
use shared_types::{
    CreateRoomRequest, DateSelection, Room, ToggleSelectionRequest, ToggleSelectionResponse,
    VerifyPasswordRequest, VerifyPasswordResponse,
};

const API_BASE_URL: &str = "/api";

/// Header carrying the admin password on protected routes.
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

pub struct ApiService;

impl ApiService {
    pub async fn verify_password(password: String) -> Result<bool, String> {
        let url = format!("{}/admin/verify", API_BASE_URL);

        let response = Request::post(&url)
            .json(&VerifyPasswordRequest { password })
            .map_err(|e| format!("Failed to serialize request: {:?}", e))?
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        if !response.ok() {
            return Err(format!("HTTP error: {}", response.status()));
        }

        let body: VerifyPasswordResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {:?}", e))?;

        Ok(body.valid)
    }

    pub async fn create_room(admin_password: &str, name: String) -> Result<Room, String> {
        let url = format!("{}/rooms", API_BASE_URL);

        let response = Request::post(&url)
            .header(ADMIN_PASSWORD_HEADER, admin_password)
            .json(&CreateRoomRequest { name })
            .map_err(|e| format!("Failed to serialize request: {:?}", e))?
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        if !response.ok() {
            return Err(format!("HTTP error: {}", response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {:?}", e))
    }

    /// Fetch a room. Returns Ok(None) on 404 so the page can render its
    /// not-found state.
    pub async fn get_room(room_id: &str) -> Result<Option<Room>, String> {
        let url = format!("{}/rooms/{}", API_BASE_URL, room_id);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        if response.status() == 404 {
            return Ok(None);
        }
        if !response.ok() {
            return Err(format!("HTTP error: {}", response.status()));
        }

        response
            .json()
            .await
            .map(Some)
            .map_err(|e| format!("Failed to parse response: {:?}", e))
    }

    pub async fn list_selections(room_id: &str) -> Result<Vec<DateSelection>, String> {
        let url = format!("{}/rooms/{}/selections", API_BASE_URL, room_id);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        if !response.ok() {
            return Err(format!("HTTP error: {}", response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {:?}", e))
    }

    pub async fn toggle_selection(
        room_id: &str,
        name: String,
        date: NaiveDate,
    ) -> Result<ToggleSelectionResponse, String> {
        let url = format!("{}/rooms/{}/selections/toggle", API_BASE_URL, room_id);

        let response = Request::post(&url)
            .json(&ToggleSelectionRequest { name, date })
            .map_err(|e| format!("Failed to serialize request: {:?}", e))?
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        if !response.ok() {
            return Err(format!("HTTP error: {}", response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {:?}", e))
    }

    /// URL of the change feed for a room, for an EventSource subscription.
    pub fn room_events_url(room_id: &str) -> String {
        format!("{}/rooms/{}/events", API_BASE_URL, room_id)
    }
}

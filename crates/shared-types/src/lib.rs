use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub mod availability;

pub use availability::{tally, AvailabilityBoard, DateTally};

/// Room record matching database column order exactly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct Room {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// One participant's availability on one calendar date within a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct DateSelection {
    pub id: i32,
    pub room_id: String,
    pub name: String,
    pub selected_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoomRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ToggleSelectionRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,

    pub date: NaiveDate,
}

/// What a toggle did to the (room, name, date) tuple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleOutcome {
    Added,
    Removed,
}

impl ToggleOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            ToggleOutcome::Added => "added",
            ToggleOutcome::Removed => "removed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleSelectionResponse {
    pub outcome: ToggleOutcome,
    pub name: String,
    pub date: NaiveDate,
}

/// Room plus the aggregated availability picture, as served by the overview
/// endpoint and rendered by the status board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomOverviewResponse {
    pub room: Room,
    pub participants: Vec<String>,
    pub dates: Vec<DateTally>,
    pub unanimous_dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPasswordRequest {
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPasswordResponse {
    pub valid: bool,
}

/// Change notification published to room subscribers.
///
/// Events are refetch hints: subscribers reload the selection list on any
/// event rather than applying the payload as a delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoomEvent {
    SelectionAdded { name: String, date: NaiveDate },
    SelectionRemoved { name: String, date: NaiveDate },
    RoomDeleted,
}

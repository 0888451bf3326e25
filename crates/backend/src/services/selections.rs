//! Selection toggling and room overview assembly.
//!
//! Extracts business logic from HTTP handlers for better testability and reuse.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use diesel_async::AsyncPgConnection;
use shared_types::{availability, Room, RoomEvent, RoomOverviewResponse, ToggleOutcome};

use crate::db::selections;
use crate::models::NewDateSelection;
use crate::notify::RoomHub;

/// Service for selection-related business logic
pub struct SelectionService;

impl SelectionService {
    /// Toggle a participant's availability on a date.
    ///
    /// An existing (room, name, date) tuple is removed; otherwise one is
    /// inserted. Either way a change event goes out to room subscribers. A
    /// concurrent insert of the same tuple collapses into a single row and a
    /// single event.
    pub async fn toggle(
        conn: &mut AsyncPgConnection,
        hub: &RoomHub,
        room: &Room,
        participant: &str,
        date: NaiveDate,
    ) -> Result<ToggleOutcome> {
        let removed = selections::remove(conn, &room.id, participant, date)
            .await
            .context("Failed to remove selection")?;

        if removed {
            hub.publish(
                &room.id,
                &RoomEvent::SelectionRemoved {
                    name: participant.to_string(),
                    date,
                },
            );
            return Ok(ToggleOutcome::Removed);
        }

        let inserted = selections::insert(
            conn,
            NewDateSelection {
                room_id: room.id.clone(),
                name: participant.to_string(),
                selected_date: date,
            },
        )
        .await
        .context("Failed to add selection")?;

        if inserted.is_some() {
            hub.publish(
                &room.id,
                &RoomEvent::SelectionAdded {
                    name: participant.to_string(),
                    date,
                },
            );
        }

        Ok(ToggleOutcome::Added)
    }

    /// Assemble the aggregated availability picture for a room.
    pub async fn overview(
        conn: &mut AsyncPgConnection,
        room: Room,
    ) -> Result<RoomOverviewResponse> {
        let items = selections::list_for_room(conn, &room.id)
            .await
            .context("Failed to load selections")?;

        let board = availability::tally(&items);

        Ok(RoomOverviewResponse {
            room,
            participants: board.participants,
            dates: board.dates,
            unanimous_dates: board.unanimous_dates,
        })
    }
}

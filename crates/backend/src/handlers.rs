use std::convert::Infallible;

use axum::{
    extract::{Json, Path, State},
    http::{HeaderMap, StatusCode},
    response::sse::{Event, KeepAlive, Sse},
};
use diesel_async::AsyncPgConnection;
use futures::stream::{self, Stream};
use shared_types::{
    CreateRoomRequest, DateSelection, Room, RoomEvent, RoomOverviewResponse,
    ToggleSelectionRequest, ToggleSelectionResponse, VerifyPasswordRequest,
    VerifyPasswordResponse,
};
use tokio::sync::broadcast;
use uuid::Uuid;
use validator::Validate;

use crate::auth;
use crate::db::{rooms, selections};
use crate::error::{ApiError, ApiResult};
use crate::services::selections::SelectionService;
use crate::AppState;

const ROOM_ID_LEN: usize = 8;
const ROOM_ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a shareable room id: eight lowercase alphanumeric characters,
/// drawn from UUID randomness.
fn generate_room_id() -> String {
    Uuid::new_v4()
        .as_bytes()
        .iter()
        .take(ROOM_ID_LEN)
        .map(|b| ROOM_ID_ALPHABET[*b as usize % ROOM_ID_ALPHABET.len()] as char)
        .collect()
}

async fn load_room(conn: &mut AsyncPgConnection, room_id: &str) -> ApiResult<Room> {
    rooms::get_by_id(conn, room_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Room"))
}

// Admin handlers

pub async fn verify_password(
    State(state): State<AppState>,
    Json(payload): Json<VerifyPasswordRequest>,
) -> Json<VerifyPasswordResponse> {
    Json(VerifyPasswordResponse {
        valid: state.admin.verify(&payload.password),
    })
}

// Room handlers

pub async fn list_rooms(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Room>>> {
    auth::require_admin(&headers, &state.admin)?;

    let mut conn = state.pool.get().await?;
    let items = rooms::list_all(&mut conn).await?;

    Ok(Json(items))
}

pub async fn create_room(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateRoomRequest>,
) -> ApiResult<Json<Room>> {
    auth::require_admin(&headers, &state.admin)?;
    payload.validate()?;

    let mut conn = state.pool.get().await?;
    let room = rooms::create(&mut conn, &generate_room_id(), payload.name.trim()).await?;

    tracing::info!("Created room {} ({})", room.id, room.name);

    Ok(Json(room))
}

pub async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> ApiResult<Json<Room>> {
    let mut conn = state.pool.get().await?;
    let room = load_room(&mut conn, &room_id).await?;

    Ok(Json(room))
}

pub async fn delete_room(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(room_id): Path<String>,
) -> ApiResult<StatusCode> {
    auth::require_admin(&headers, &state.admin)?;

    let mut conn = state.pool.get().await?;
    let removed = selections::delete_for_room(&mut conn, &room_id).await?;
    let deleted = rooms::delete(&mut conn, &room_id).await?;

    if !deleted {
        return Err(ApiError::not_found("Room"));
    }

    tracing::info!("Deleted room {} and {} selections", room_id, removed);

    state.hub.publish(&room_id, &RoomEvent::RoomDeleted);
    state.hub.remove(&room_id);

    Ok(StatusCode::NO_CONTENT)
}

// Selection handlers

pub async fn list_selections(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> ApiResult<Json<Vec<DateSelection>>> {
    let mut conn = state.pool.get().await?;
    load_room(&mut conn, &room_id).await?;

    let items = selections::list_for_room(&mut conn, &room_id).await?;

    Ok(Json(items))
}

pub async fn room_overview(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> ApiResult<Json<RoomOverviewResponse>> {
    let mut conn = state.pool.get().await?;
    let room = load_room(&mut conn, &room_id).await?;

    let overview = SelectionService::overview(&mut conn, room).await?;

    Ok(Json(overview))
}

pub async fn toggle_selection(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Json(payload): Json<ToggleSelectionRequest>,
) -> ApiResult<Json<ToggleSelectionResponse>> {
    payload.validate()?;

    let mut conn = state.pool.get().await?;
    let room = load_room(&mut conn, &room_id).await?;

    let outcome =
        SelectionService::toggle(&mut conn, &state.hub, &room, &payload.name, payload.date)
            .await?;

    Ok(Json(ToggleSelectionResponse {
        outcome,
        name: payload.name,
        date: payload.date,
    }))
}

// Change feed

/// SSE stream of change events for a room.
///
/// Clients treat every event as a refetch hint, so a lagged receiver just
/// folds into the next hint instead of erroring the stream.
pub async fn room_events(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    {
        let mut conn = state.pool.get().await?;
        load_room(&mut conn, &room_id).await?;
    }

    let rx = state.hub.subscribe(&room_id);

    let events = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let data =
                        serde_json::to_string(&event).unwrap_or_else(|_| "{}".to_string());
                    return Some((Ok(Event::default().event("change").data(data)), rx));
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_shape() {
        let id = generate_room_id();
        assert_eq!(id.len(), ROOM_ID_LEN);
        assert!(id.bytes().all(|b| ROOM_ID_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_room_ids_vary() {
        let ids: std::collections::HashSet<String> =
            (0..32).map(|_| generate_room_id()).collect();
        assert!(ids.len() > 1);
    }
}

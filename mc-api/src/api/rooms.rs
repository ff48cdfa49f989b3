//! Room endpoints
//!
//! `GET /api/room` lists every stored room. `GET /api/get-room?code=` returns
//! one room and whether the caller hosts it. Both are read-only.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    Json,
};
use chrono::{DateTime, Utc};
use mc_common::code::is_valid_code;
use mc_common::db::Room;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ApiError;
use crate::AppState;

/// Cookie carrying the caller's session key
pub const SESSION_COOKIE: &str = "sessionid";

/// Wire representation of a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomResponse {
    pub id: i64,
    pub code: String,
    pub host: String,
    pub guest_can_pause: bool,
    pub votes_to_skip: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            code: room.code,
            host: room.host,
            guest_can_pause: room.guest_can_pause,
            votes_to_skip: room.votes_to_skip,
            created_at: room.created_at,
        }
    }
}

/// Single room plus whether the requesting session hosts it
#[derive(Debug, Clone, Serialize)]
pub struct RoomDetailResponse {
    #[serde(flatten)]
    pub room: RoomResponse,
    pub is_host: bool,
}

/// Query parameters for room lookup
#[derive(Debug, Deserialize)]
pub struct GetRoomQuery {
    pub code: Option<String>,
}

/// GET /api/room
///
/// Returns every stored room, in storage order.
pub async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<RoomResponse>>, ApiError> {
    let rooms = crate::db::list_rooms(&state.db).await?;
    debug!("Listing {} room(s)", rooms.len());

    Ok(Json(rooms.into_iter().map(RoomResponse::from).collect()))
}

/// GET /api/get-room?code=XXXXXX
pub async fn get_room(
    State(state): State<AppState>,
    Query(query): Query<GetRoomQuery>,
    headers: HeaderMap,
) -> Result<Json<RoomDetailResponse>, ApiError> {
    let code = match query.code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => {
            return Err(ApiError::BadRequest(
                "Code parameter not found in request".to_string(),
            ))
        }
    };

    // Anything that cannot be a room code cannot match a stored room
    if !is_valid_code(&code) {
        return Err(ApiError::NotFound(code));
    }

    let room = crate::db::find_room_by_code(&state.db, &code)
        .await?
        .ok_or_else(|| ApiError::NotFound(code.clone()))?;

    let is_host = session_key(&headers).is_some_and(|key| key == room.host);

    Ok(Json(RoomDetailResponse {
        room: room.into(),
        is_host,
    }))
}

/// Extract the session key from the `Cookie` header(s)
pub fn session_key(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

//! Database models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One listening room, as stored in the `rooms` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Room {
    pub id: i64,
    /// Join code handed out to guests
    pub code: String,
    /// Session key of the host who owns the room
    pub host: String,
    pub guest_can_pause: bool,
    pub votes_to_skip: i64,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to create a room; `code` and `created_at` are assigned on insert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRoom {
    pub host: String,
    pub guest_can_pause: bool,
    pub votes_to_skip: i64,
}

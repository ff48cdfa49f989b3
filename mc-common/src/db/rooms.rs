//! Room creation queries
//!
//! Read paths used by the HTTP service live in `mc-api`; this module holds the
//! write side used for provisioning rooms.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::code::generate_code;
use crate::db::models::{NewRoom, Room};
use crate::{Error, Result};

/// Whether any room already uses `code`
pub async fn code_exists(pool: &SqlitePool, code: &str) -> Result<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM rooms WHERE code = ?)")
        .bind(code)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}

/// Whether `host` already owns a room
pub async fn host_has_room(pool: &SqlitePool, host: &str) -> Result<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM rooms WHERE host = ?)")
        .bind(host)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}

/// Draw room codes until one is not in use
pub async fn generate_unique_code(pool: &SqlitePool) -> Result<String> {
    loop {
        let code = generate_code(&mut rand::thread_rng());
        if !code_exists(pool, &code).await? {
            return Ok(code);
        }
        debug!("Room code {} already taken, retrying", code);
    }
}

/// Insert a new room with a freshly generated code
pub async fn create_room(pool: &SqlitePool, new_room: &NewRoom) -> Result<Room> {
    if new_room.votes_to_skip < 1 {
        return Err(Error::InvalidInput(format!(
            "votes_to_skip must be at least 1, got {}",
            new_room.votes_to_skip
        )));
    }

    if new_room.host.trim().is_empty() {
        return Err(Error::InvalidInput("host must not be empty".to_string()));
    }

    if host_has_room(pool, &new_room.host).await? {
        return Err(Error::InvalidInput(format!(
            "host {} already owns a room",
            new_room.host
        )));
    }

    let code = generate_unique_code(pool).await?;

    let room = sqlx::query_as::<_, Room>(
        r#"
        INSERT INTO rooms (code, host, guest_can_pause, votes_to_skip, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, code, host, guest_can_pause, votes_to_skip, created_at
        "#,
    )
    .bind(&code)
    .bind(&new_room.host)
    .bind(new_room.guest_can_pause)
    .bind(new_room.votes_to_skip)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(room)
}

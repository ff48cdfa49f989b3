//! Room read queries

use mc_common::db::Room;
use mc_common::Result;
use sqlx::SqlitePool;

/// All rooms, oldest first (insertion order)
pub async fn list_rooms(pool: &SqlitePool) -> Result<Vec<Room>> {
    let rooms = sqlx::query_as::<_, Room>(
        r#"
        SELECT id, code, host, guest_can_pause, votes_to_skip, created_at
        FROM rooms
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rooms)
}

/// Look up a room by its join code
pub async fn find_room_by_code(pool: &SqlitePool, code: &str) -> Result<Option<Room>> {
    let room = sqlx::query_as::<_, Room>(
        r#"
        SELECT id, code, host, guest_can_pause, votes_to_skip, created_at
        FROM rooms
        WHERE code = ?
        "#,
    )
    .bind(code)
    .fetch_optional(pool)
    .await?;

    Ok(room)
}

/// Number of stored rooms
pub async fn count_rooms(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

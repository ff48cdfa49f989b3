//! HTTP API handlers for mc-api

pub mod error;
pub mod health;
pub mod rooms;

pub use error::ApiError;
pub use health::health_routes;
pub use rooms::{get_room, list_rooms};

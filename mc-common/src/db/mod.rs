//! Database models, initialization and room queries

pub mod init;
pub mod migrations;
pub mod models;
pub mod rooms;

pub use init::*;
pub use migrations::*;
pub use models::*;

//! # Music Controller Common Library
//!
//! Shared code for the music controller services:
//! - Room model and room code generation
//! - Database initialization and schema migrations
//! - Configuration loading and root folder resolution
//! - Common error type

pub mod code;
pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};

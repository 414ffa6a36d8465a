//! Pastebin - A minimal pastebin service
//!
//! Create, read, update and delete text pastes through a JSON API backed by
//! PostgreSQL.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::{create_router, AppState};
pub use config::{Config, StorageKind};
pub use error::PasteError;
pub use store::{MemoryStore, PasteStore, PgStore};

//! Storage Module
//!
//! The storage accessor the router talks to. Handlers only ever see the
//! [`PasteStore`] trait; the concrete backend is chosen at startup.

mod memory;
mod postgres;


use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Paste, PasteDraft};

pub use memory::MemoryStore;
pub use postgres::PgStore;

// == Public Constants ==
/// Number of rows returned by the recent pastes query
pub const RECENT_LIMIT: i64 = 10;

// == Paste Store Trait ==
/// Executes the statements the router needs against the `pastes` table.
///
/// Each method issues exactly one statement. Absence is reported as an empty
/// result, never as an error; `Err` is reserved for storage failures.
#[async_trait]
pub trait PasteStore: Send + Sync + 'static {
    /// All pastes, in storage default order.
    async fn list_all(&self) -> Result<Vec<Paste>>;

    /// Up to `limit` pastes, most recently created first.
    async fn list_recent(&self, limit: i64) -> Result<Vec<Paste>>;

    async fn get_by_id(&self, id: i32) -> Result<Option<Paste>>;

    /// Inserts a new paste and returns it with its generated `id` and
    /// `creation_date`.
    async fn insert(&self, draft: &PasteDraft) -> Result<Paste>;

    /// Replaces title and body of paste `id`, returning the updated row.
    async fn update(&self, id: i32, draft: &PasteDraft) -> Result<Option<Paste>>;

    /// Removes paste `id`, returning the deleted row.
    async fn delete(&self, id: i32) -> Result<Option<Paste>>;

    /// Releases any held connections. Called once at shutdown.
    async fn close(&self) {}
}

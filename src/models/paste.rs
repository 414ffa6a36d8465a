//! Paste Model
//!
//! The single entity the service stores.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `pastes` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Paste {
    /// Storage-generated identifier, never reused
    pub id: i32,
    /// Optional title, `None` instead of an empty string
    pub title: Option<String>,
    /// Paste contents, never empty
    pub body: String,
    /// Insert time assigned by storage
    pub creation_date: NaiveDateTime,
}

/// Validated title and body ready to be written by a store.
///
/// Only constructed through [`PasteDraft::new`], so a draft always carries a
/// non-empty body and never an empty title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteDraft {
    title: Option<String>,
    body: String,
}

impl PasteDraft {
    /// Normalizes an empty title to `None`. Returns `None` if `body` is empty.
    pub fn new(title: Option<String>, body: String) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        let title = title.filter(|t| !t.is_empty());
        Some(Self { title, body })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

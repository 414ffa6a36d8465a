//! Request DTOs for the pastebin API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::error::{PasteError, Result};
use crate::models::PasteDraft;

/// Request body for `POST /pastes` and `PUT /pastes/:id`
///
/// Both fields are optional at the wire level so that a missing `body` is
/// reported the same way as an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PasteRequest {
    /// Optional title; `""` is stored as null
    #[serde(default)]
    pub title: Option<String>,
    /// Paste contents; must be non-empty
    #[serde(default)]
    pub body: Option<String>,
}

impl PasteRequest {
    /// Validates the request and converts it into a storable draft.
    pub fn into_draft(self) -> Result<PasteDraft> {
        PasteDraft::new(self.title, self.body.unwrap_or_default()).ok_or(PasteError::EmptyBody)
    }
}

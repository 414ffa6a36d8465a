//! Response DTOs for the pastebin API
//!
//! Every JSON response from the paste endpoints is wrapped in an [`Envelope`].

use serde::Serialize;

use crate::models::Paste;

/// Outcome marker carried by every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Success,
    Failed,
}

/// `{status, data|message}` wrapper used on every paste response.
///
/// Successful responses carry either `data` or `message`. Failed responses
/// carry an empty `data` array together with the `message`.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Paste>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    /// Successful response carrying rows
    pub fn data(pastes: Vec<Paste>) -> Self {
        Self {
            status: Status::Success,
            data: Some(pastes),
            message: None,
        }
    }

    /// Successful response carrying only a confirmation message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Failed response
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: Status::Failed,
            data: Some(Vec::new()),
            message: Some(message.into()),
        }
    }
}

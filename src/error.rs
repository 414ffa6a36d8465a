//! Error types for the pastebin server
//!
//! Provides unified error handling using thiserror. Every error renders as the
//! same `{status, data, message}` envelope the successful responses use.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::Envelope;

// == Paste Error Enum ==
/// Unified error type for the pastebin server.
#[derive(Error, Debug)]
pub enum PasteError {
    /// Create or update attempted with an empty body
    #[error("Cannot submit a paste with an empty body.")]
    EmptyBody,

    /// Path segment is not an integer paste ID
    #[error("Invalid paste ID '{0}'.")]
    InvalidId(String),

    /// Request body could not be decoded
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No paste has the requested ID
    #[error("There is no paste with ID {0}.")]
    NotFound(i32),

    /// The database failed to execute a statement
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl PasteError {
    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PasteError::EmptyBody => StatusCode::BAD_REQUEST,
            PasteError::InvalidId(_) => StatusCode::BAD_REQUEST,
            PasteError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            PasteError::NotFound(_) => StatusCode::NOT_FOUND,
            PasteError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for PasteError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // storage details stay in the log, clients get a generic message
        let message = match &self {
            PasteError::Storage(source) => {
                error!("storage failure: {}", source);
                "Internal server error.".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(Envelope::failed(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the pastebin server.
pub type Result<T> = std::result::Result<T, PasteError>;

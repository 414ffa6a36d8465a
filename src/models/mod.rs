//! Data models for the pastebin server
//!
//! The persisted `Paste` row plus the DTOs used for
//! serializing/deserializing HTTP request and response bodies.

pub mod paste;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use paste::{Paste, PasteDraft};
pub use requests::PasteRequest;
pub use responses::{Envelope, Status};

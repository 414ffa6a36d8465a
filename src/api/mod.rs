//! API Module
//!
//! HTTP handlers and routing for the pastebin REST API.
//!
//! # Endpoints
//! - `GET /` - Landing page
//! - `GET /pastes` - List all pastes
//! - `GET /pastes/recent` - List the ten most recent pastes
//! - `GET /pastes/:id` - Fetch one paste
//! - `POST /pastes` - Create a paste
//! - `PUT /pastes/:id` - Replace a paste's title and body
//! - `DELETE /pastes/:id` - Delete a paste
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

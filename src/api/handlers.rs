//! API Handlers
//!
//! HTTP request handlers for each pastebin endpoint. Every handler issues at
//! most one storage call; validation failures return before reaching storage.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::{debug, info};

use crate::error::{PasteError, Result};
use crate::models::{Envelope, PasteRequest};
use crate::store::{PasteStore, RECENT_LIMIT};

/// The landing page served at `/`.
const INDEX_PAGE: &str = include_str!("../../public/index.html");

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Storage accessor
    pub store: Arc<dyn PasteStore>,
}

impl AppState {
    /// Creates a new AppState owning the given store.
    pub fn new(store: impl PasteStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Creates a new AppState from a store that is also held elsewhere.
    pub fn from_shared(store: Arc<dyn PasteStore>) -> Self {
        Self { store }
    }
}

/// Parses a path segment into a paste ID.
///
/// Only the canonical decimal spelling is accepted: no `+` sign, no leading
/// zeros and no `-0`, so each paste is reachable through exactly one URL.
fn parse_id(raw: &str) -> Result<i32> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    let canonical = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (!digits.starts_with('0') || (digits == "0" && digits.len() == raw.len()));

    if !canonical {
        return Err(PasteError::InvalidId(raw.to_string()));
    }
    raw.parse().map_err(|_| PasteError::InvalidId(raw.to_string()))
}

/// Unwraps the `:id` path segment, turning axum's rejection into an envelope
/// error before parsing it.
fn path_id(path: std::result::Result<Path<String>, PathRejection>) -> Result<i32> {
    let Path(raw) =
        path.map_err(|rejection| PasteError::InvalidRequest(rejection.body_text()))?;
    parse_id(&raw)
}

/// Unwraps a JSON body, turning axum's rejection into an envelope error.
fn parse_body(
    payload: std::result::Result<Json<PasteRequest>, JsonRejection>,
) -> Result<PasteRequest> {
    payload
        .map(|Json(req)| req)
        .map_err(|rejection| PasteError::InvalidRequest(rejection.body_text()))
}

/// Handler for GET /
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// Handler for GET /pastes
pub async fn list_handler(State(state): State<AppState>) -> Result<Json<Envelope>> {
    let pastes = state.store.list_all().await?;
    Ok(Json(Envelope::data(pastes)))
}

/// Handler for GET /pastes/recent
pub async fn recent_handler(State(state): State<AppState>) -> Result<Json<Envelope>> {
    let pastes = state.store.list_recent(RECENT_LIMIT).await?;
    Ok(Json(Envelope::data(pastes)))
}

/// Handler for GET /pastes/:id
pub async fn get_handler(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Envelope>> {
    let id = path_id(path)?;

    match state.store.get_by_id(id).await? {
        Some(paste) => Ok(Json(Envelope::data(vec![paste]))),
        None => {
            debug!("paste {} not found", id);
            Err(PasteError::NotFound(id))
        }
    }
}

/// Handler for POST /pastes
///
/// Responds 201 with the created row, including its generated id.
pub async fn create_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PasteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope>)> {
    let draft = parse_body(payload)?.into_draft()?;

    let paste = state.store.insert(&draft).await?;
    info!("created paste {} ({} bytes)", paste.id, paste.body.len());

    Ok((StatusCode::CREATED, Json(Envelope::data(vec![paste]))))
}

/// Handler for PUT /pastes/:id
pub async fn update_handler(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
    payload: std::result::Result<Json<PasteRequest>, JsonRejection>,
) -> Result<Json<Envelope>> {
    let id = path_id(path)?;
    let draft = parse_body(payload)?.into_draft()?;

    match state.store.update(id, &draft).await? {
        Some(paste) => {
            info!("updated paste {}", id);
            Ok(Json(Envelope::data(vec![paste])))
        }
        None => Err(PasteError::NotFound(id)),
    }
}

/// Handler for DELETE /pastes/:id
pub async fn delete_handler(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Envelope>> {
    let id = path_id(path)?;

    match state.store.delete(id).await? {
        Some(_) => {
            info!("deleted paste {}", id);
            Ok(Json(Envelope::message(format!("Paste {} was deleted.", id))))
        }
        None => Err(PasteError::NotFound(id)),
    }
}

/// Handler for GET /health
pub async fn health_handler() -> Json<Envelope> {
    Json(Envelope::message("healthy"))
}

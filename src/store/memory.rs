//! In-memory Paste Store
//!
//! Keeps pastes in a `BTreeMap` behind a tokio `RwLock`. Mirrors the
//! PostgreSQL store's semantics: ids come from a counter that is never
//! rewound, and `creation_date` is stamped on insert.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::{Paste, PasteDraft};
use crate::store::PasteStore;

/// Paste storage held entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    /// Rows keyed by id
    rows: BTreeMap<i32, Paste>,
    /// Last id handed out
    last_id: i32,
    /// Newest creation date handed out
    last_created: Option<NaiveDateTime>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored pastes
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    /// Returns true if no pastes are stored
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.rows.is_empty()
    }
}

#[async_trait]
impl PasteStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Paste>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Paste>> {
        let inner = self.inner.read().await;
        let mut pastes: Vec<Paste> = inner.rows.values().cloned().collect();
        pastes.sort_by(|a, b| {
            b.creation_date
                .cmp(&a.creation_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        pastes.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(pastes)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Paste>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn insert(&self, draft: &PasteDraft) -> Result<Paste> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;

        // a clock step backwards must not reorder recent pastes
        let now = Utc::now().naive_utc();
        let creation_date = inner.last_created.map_or(now, |last| now.max(last));
        inner.last_created = Some(creation_date);

        let paste = Paste {
            id: inner.last_id,
            title: draft.title().map(str::to_owned),
            body: draft.body().to_owned(),
            creation_date,
        };
        inner.rows.insert(paste.id, paste.clone());

        Ok(paste)
    }

    async fn update(&self, id: i32, draft: &PasteDraft) -> Result<Option<Paste>> {
        let mut inner = self.inner.write().await;
        let Some(paste) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };

        paste.title = draft.title().map(str::to_owned);
        paste.body = draft.body().to_owned();

        Ok(Some(paste.clone()))
    }

    async fn delete(&self, id: i32) -> Result<Option<Paste>> {
        let mut inner = self.inner.write().await;
        Ok(inner.rows.remove(&id))
    }
}

//! PostgreSQL Paste Store
//!
//! Runs one parameterized statement per call against the `pastes` table.
//! Client-supplied values are always bound positionally, never formatted into
//! the SQL text.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::models::{Paste, PasteDraft};
use crate::store::PasteStore;

/// Paste storage backed by a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects to the database described by `config`.
    ///
    /// Fails if the server cannot be reached, so a process that starts
    /// successfully always holds at least one live connection.
    pub async fn connect(config: &DatabaseConfig) -> std::result::Result<Self, sqlx::Error> {
        let options = config.connect_options()?;
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        info!(
            "Connected to PostgreSQL (max_connections={})",
            config.max_connections
        );
        Ok(Self::from_pool(pool))
    }

    /// Wraps an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PasteStore for PgStore {
    async fn list_all(&self) -> Result<Vec<Paste>> {
        let pastes =
            sqlx::query_as::<_, Paste>("SELECT id, title, body, creation_date FROM pastes")
                .fetch_all(&self.pool)
                .await?;
        Ok(pastes)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Paste>> {
        let pastes = sqlx::query_as::<_, Paste>(
            "SELECT id, title, body, creation_date FROM pastes \
             ORDER BY creation_date DESC, id DESC LIMIT $1",
        )
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;
        Ok(pastes)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Paste>> {
        let paste = sqlx::query_as::<_, Paste>(
            "SELECT id, title, body, creation_date FROM pastes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(paste)
    }

    async fn insert(&self, draft: &PasteDraft) -> Result<Paste> {
        let paste = sqlx::query_as::<_, Paste>(
            "INSERT INTO pastes (title, body) VALUES ($1, $2) \
             RETURNING id, title, body, creation_date",
        )
        .bind(draft.title())
        .bind(draft.body())
        .fetch_one(&self.pool)
        .await?;
        Ok(paste)
    }

    async fn update(&self, id: i32, draft: &PasteDraft) -> Result<Option<Paste>> {
        let paste = sqlx::query_as::<_, Paste>(
            "UPDATE pastes SET title = $1, body = $2 WHERE id = $3 \
             RETURNING id, title, body, creation_date",
        )
        .bind(draft.title())
        .bind(draft.body())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(paste)
    }

    async fn delete(&self, id: i32) -> Result<Option<Paste>> {
        let paste = sqlx::query_as::<_, Paste>(
            "DELETE FROM pastes WHERE id = $1 RETURNING id, title, body, creation_date",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(paste)
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("PostgreSQL pool closed");
    }
}

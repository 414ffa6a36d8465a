//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;

/// Default pool size when `DATABASE_MAX_CONNECTIONS` is unset
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

// == Config Error ==
/// Reasons the environment cannot be turned into a [`Config`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required variable is unset
    #[error("Missing {0} environment variable. Set it in .env file.")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed
    #[error("Invalid value '{value}' for {name}")]
    Invalid { name: &'static str, value: String },
}

/// Which [`PasteStore`](crate::store::PasteStore) backend to run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for StorageKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageKind::Postgres),
            "memory" => Ok(StorageKind::Memory),
            _ => Err(()),
        }
    }
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Connection string; `None` lets sqlx read the libpq `PG*` variables
    pub url: Option<String>,
    /// TLS behaviour for the database link
    pub ssl_mode: PgSslMode,
    /// Upper bound on pooled connections
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Builds sqlx connect options from the URL and TLS setting.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        let options = match &self.url {
            Some(url) => url.parse::<PgConnectOptions>()?,
            None => PgConnectOptions::new(),
        };
        Ok(options.ssl_mode(self.ssl_mode))
    }
}

/// Server configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub port: u16,
    /// Storage backend
    pub storage: StorageKind,
    /// Database settings, used when `storage` is `Postgres`
    pub database: DatabaseConfig,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (required)
    /// - `DATABASE_URL` - PostgreSQL connection string
    /// - `LOCAL` - if set, connect to the database without TLS
    /// - `DATABASE_SSL_MODE` - libpq-style sslmode (default: require)
    /// - `DATABASE_MAX_CONNECTIONS` - pool size (default: 5)
    /// - `STORAGE` - `postgres` or `memory` (default: postgres)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_var(&lookup, "PORT")?.ok_or(ConfigError::Missing("PORT"))?;

        let storage = match lookup("STORAGE") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "STORAGE",
                value,
            })?,
            None => StorageKind::default(),
        };

        // LOCAL wins over any explicit mode: local databases rarely speak TLS
        let ssl_mode = if lookup("LOCAL").is_some() {
            PgSslMode::Disable
        } else {
            parse_var(&lookup, "DATABASE_SSL_MODE")?.unwrap_or(PgSslMode::Require)
        };

        let max_connections = parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")?
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                name: "DATABASE_MAX_CONNECTIONS",
                value: max_connections.to_string(),
            });
        }

        Ok(Self {
            port,
            storage,
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
                ssl_mode,
                max_connections,
            },
        })
    }
}

/// Parses an optional variable, treating unparseable values as errors.
fn parse_var<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(None),
    }
}

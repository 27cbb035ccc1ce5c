//! Storage backend configuration.
//!
//! When `DATABASE_URL` is unset the API runs on the in-memory store, which is
//! what the integration tests and local demos use.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: Postgres connection string (optional)
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
//! - `DATABASE_RUN_MIGRATIONS`: Apply `migrations/` on startup (default: true)

use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_connections),
            run_migrations: env::var("DATABASE_RUN_MIGRATIONS")
                .ok()
                .map(|s| !matches!(s.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(defaults.run_migrations),
        }
    }
}

//! # HandyHub DB
//!
//! The [`MarketplaceStore`] seam and its two backends.
//!
//! # Example
//!
//! ```ignore
//! use handyhub_config::DatabaseConfig;
//! use handyhub_db::open_store;
//!
//! let store = open_store(&DatabaseConfig::from_env()).await?;
//! tracing::info!(backend = store.backend_name(), "Store ready");
//! ```

pub mod memory;
pub mod postgres;
pub mod store;

use std::sync::Arc;

use handyhub_config::DatabaseConfig;

pub use memory::InMemoryStore;
pub use postgres::PgStore;
pub use sqlx::PgPool;
pub use store::{MarketplaceStore, SLOT_TAKEN, StoreError, StoreResult};

/// Picks the backend from configuration.
///
/// Without `DATABASE_URL` the in-memory store is used and nothing persists
/// across restarts.
pub async fn open_store(config: &DatabaseConfig) -> StoreResult<Arc<dyn MarketplaceStore>> {
    match config.url {
        Some(_) => Ok(Arc::new(PgStore::connect(config).await?)),
        None => {
            tracing::warn!("DATABASE_URL not set; using the in-memory store");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}

//! # HandyHub Config
//!
//! Configuration types for the HandyHub API.
//!
//! Every structure is loaded from environment variables with defaults:
//!
//! - [`jwt`]: JWT signing configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: Storage backend selection and Postgres pool settings
//! - [`portal`]: Per-portal role allow-lists
//! - [`server`]: Listener address
//!
//! # Example
//!
//! ```ignore
//! use handyhub_config::{CorsConfig, DatabaseConfig, JwtConfig, PortalConfig};
//!
//! dotenvy::dotenv().ok();
//! let jwt_config = JwtConfig::from_env();
//! let portal_config = PortalConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod portal;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use portal::PortalConfig;
pub use server::ServerConfig;

/// Splits a comma separated list, trimming entries and dropping empty ones.
pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

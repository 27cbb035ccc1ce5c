use std::sync::Arc;

use handyhub_auth::AccessControl;
use handyhub_config::{CorsConfig, DatabaseConfig, JwtConfig, PortalConfig};
use handyhub_db::{MarketplaceStore, open_store};

/// Shared by every handler. Cloning is cheap: the store and the access
/// policy sit behind `Arc`s and are never mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MarketplaceStore>,
    pub access: Arc<AccessControl>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn MarketplaceStore>,
        access: AccessControl,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            store,
            access: Arc::new(access),
            jwt_config,
            cors_config,
        }
    }
}

/// Builds state from the environment.
///
/// Fails if the portal allow-lists break the partition rules or the
/// configured database cannot be reached.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let access = AccessControl::from_config(&PortalConfig::from_env())?;
    let store = open_store(&DatabaseConfig::from_env()).await?;

    tracing::info!(backend = store.backend_name(), "Storage backend ready");

    Ok(AppState::new(
        store,
        access,
        JwtConfig::from_env(),
        CorsConfig::from_env(),
    ))
}

//! Administrative commands that bypass the HTTP surface.

use handyhub_auth::Role;
use handyhub_core::hash_password;
use handyhub_db::{MarketplaceStore, StoreError};
use handyhub_models::{NewUser, User};

/// Creates an administrator account.
///
/// This is the only way an `admin` comes into existence; registration over
/// HTTP refuses the role.
pub async fn create_admin(
    store: &dyn MarketplaceStore,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<User> {
    if password.len() < 8 {
        anyhow::bail!("Password must be at least 8 characters");
    }

    let password_hash =
        hash_password(password).map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e.error))?;

    let created = store
        .create_user(NewUser {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            password_hash,
            role: Role::Admin,
        })
        .await;

    match created {
        Ok(user) => Ok(user),
        Err(StoreError::Conflict(_)) => anyhow::bail!("User with this email already exists"),
        Err(err) => Err(err.into()),
    }
}

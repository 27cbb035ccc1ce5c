use handyhub_auth::{Role, create_access_token, normalize_role};
use handyhub_core::{AccessError, AppError, hash_password, verify_password};
use handyhub_models::{LoginRequest, LoginResponse, MeResponse, NewUser, RegisterRequest, User};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub struct AuthService;

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn log_portal_denied(portal: Option<&str>, role: Role, operation: &'static str) {
    tracing::warn!(portal = portal.unwrap_or("-"), role = %role, operation, "Portal admission denied");
}

impl AuthService {
    /// Registration runs the same admission gate as login with the
    /// requested role. Administrator accounts are never self-registered.
    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn register_user(
        state: &AppState,
        portal: Option<&str>,
        dto: RegisterRequest,
    ) -> Result<User, AppError> {
        let role = normalize_role(dto.role.as_deref());

        if let Err(err) = state.access.admit(portal, dto.role.as_deref()) {
            log_portal_denied(portal, role, "register");
            return Err(err.into());
        }

        if role == Role::Admin {
            tracing::warn!("Rejected self-registration of an administrator account");
            return Err(AppError::forbidden(
                "Administrator accounts cannot be registered through the API",
            ));
        }

        let password_hash = hash_password(&dto.password)?;

        let user = state
            .store
            .create_user(NewUser {
                first_name: dto.first_name.trim().to_string(),
                last_name: dto.last_name.trim().to_string(),
                email: normalize_email(&dto.email),
                password_hash,
                role,
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Credentials are checked before portal admission so a wrong portal
    /// does not reveal whether an account exists.
    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn login_user(
        state: &AppState,
        portal: Option<&str>,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let credentials = state
            .store
            .find_credentials_by_email(&normalize_email(&dto.email))
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !verify_password(&dto.password, &credentials.password_hash)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let user = credentials.user;

        if !state.access.is_role_allowed_for_portal(portal, Some(user.role.as_str())) {
            log_portal_denied(portal, user.role, "login");
            return Err(AccessError::PortalDenied.into());
        }

        let access_token = create_access_token(
            user.id.into_inner(),
            &user.email,
            user.role,
            &state.jwt_config,
        )?;
        let permissions = *state.access.permissions_for(user.role);

        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(LoginResponse {
            access_token,
            user,
            permissions,
        })
    }

    #[instrument(skip(state, auth_user), fields(user_id = %auth_user.principal.user_id))]
    pub async fn me(state: &AppState, auth_user: &AuthUser) -> Result<MeResponse, AppError> {
        let user = state.store.get_user(auth_user.user_id()).await?;
        let role = auth_user.role();

        Ok(MeResponse {
            user_id: user.id,
            email: user.email,
            role,
            role_display_name: role.display_name().to_string(),
            permissions: *state.access.permissions_for(role),
        })
    }
}

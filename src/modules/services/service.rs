use handyhub_auth::Role;
use handyhub_core::{AppError, Capability};
use handyhub_models::{
    CreateServiceDto, NewService, Service, ServiceId, UpdateAvailabilityDto,
    authorize_service_management, resolve_service_owner,
};
use tracing::instrument;

use crate::middleware::auth::{AuthUser, log_access_denied};
use crate::state::AppState;

pub struct CatalogService;

impl CatalogService {
    /// Available services for everyone; callers managing all services also
    /// see unavailable ones.
    #[instrument(skip(state, auth_user), fields(role = %auth_user.role()))]
    pub async fn list_services(
        state: &AppState,
        auth_user: &AuthUser,
    ) -> Result<Vec<Service>, AppError> {
        let only_available = !state
            .access
            .has_permission(auth_user.role(), Capability::ManageAllServices);
        Ok(state.store.list_services(only_available).await?)
    }

    #[instrument(skip(state, auth_user, dto), fields(user_id = %auth_user.principal.user_id))]
    pub async fn create_service(
        state: &AppState,
        auth_user: &AuthUser,
        dto: CreateServiceDto,
    ) -> Result<Service, AppError> {
        let provider_id = resolve_service_owner(&state.access, &auth_user.principal, dto.provider_id)
            .inspect_err(|err| {
                if let Some(access_err) = err.access_error() {
                    log_access_denied(&auth_user.principal, access_err, "service.create");
                }
            })?;

        if provider_id != auth_user.user_id() {
            let provider = state.store.get_user(provider_id).await?;
            if provider.role != Role::ServiceProvider {
                return Err(AppError::unprocessable(
                    "provider_id must reference a service provider account",
                ));
            }
        }

        let service = state
            .store
            .create_service(NewService {
                provider_id,
                name: dto.name.trim().to_string(),
                description: dto.description,
                price_cents: dto.price_cents,
            })
            .await?;

        tracing::info!(service_id = %service.id, provider_id = %service.provider_id, "Service created");
        Ok(service)
    }

    #[instrument(skip(state, auth_user, dto), fields(user_id = %auth_user.principal.user_id))]
    pub async fn update_availability(
        state: &AppState,
        auth_user: &AuthUser,
        id: ServiceId,
        dto: UpdateAvailabilityDto,
    ) -> Result<Service, AppError> {
        let service = state.store.get_service(id).await?;

        authorize_service_management(&state.access, &auth_user.principal, &service)
            .inspect_err(|err| log_access_denied(&auth_user.principal, err, "service.availability"))?;

        Ok(state
            .store
            .set_service_availability(id, dto.is_available)
            .await?)
    }
}

use handyhub_auth::Role;
use handyhub_core::PermissionSet;
use handyhub_models::{
    Booking, BookingId, BookingStatus, CreateBookingDto, CreateServiceDto, LoginRequest,
    LoginResponse, MeResponse, RegisterRequest, Service, ServiceId, UpdateAvailabilityDto,
    UpdateBookingStatusDto, User, UserId,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_me,
        crate::modules::services::controller::list_services,
        crate::modules::services::controller::create_service,
        crate::modules::services::controller::update_availability,
        crate::modules::bookings::controller::create_booking,
        crate::modules::bookings::controller::list_bookings,
        crate::modules::bookings::controller::get_booking,
        crate::modules::bookings::controller::update_booking_status,
    ),
    components(
        schemas(
            UserId,
            ServiceId,
            BookingId,
            Role,
            PermissionSet,
            User,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            MeResponse,
            Service,
            CreateServiceDto,
            UpdateAvailabilityDto,
            Booking,
            BookingStatus,
            CreateBookingDto,
            UpdateBookingStatusDto,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and caller permissions"),
        (name = "Services", description = "Services offered by providers"),
        (name = "Bookings", description = "Booking creation and lifecycle")
    ),
    info(
        title = "HandyHub API",
        version = "0.1.0",
        description = "Home-services marketplace backend: customers book services offered by providers, administrators oversee the marketplace.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

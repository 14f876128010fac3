//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{audit, auth, bookings, equipment, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus Booking API",
        version = "1.0.0",
        description = "Campus equipment booking and approval workflow REST API",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "Campus Booking Team")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::signup,
        auth::login,
        auth::me,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::set_equipment_availability,
        equipment::delete_equipment,
        // Bookings
        bookings::create_booking,
        bookings::my_bookings,
        bookings::pending_bookings,
        bookings::list_bookings,
        bookings::update_booking_status,
        // Users
        users::list_users,
        // Audit log
        audit::list_audit_log,
    ),
    components(
        schemas(
            // Auth
            auth::AuthResponse,
            crate::models::user::User,
            crate::models::user::SignupRequest,
            crate::models::user::LoginRequest,
            // Enums
            crate::models::enums::UserRole,
            crate::models::enums::BookingStatus,
            crate::models::enums::Priority,
            crate::models::enums::AuditAction,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::SetAvailability,
            crate::models::equipment::EquipmentQuery,
            // Bookings
            crate::models::booking::Booking,
            crate::models::booking::BookingDetails,
            crate::models::booking::CreateBooking,
            crate::models::booking::UpdateBookingStatus,
            crate::models::booking::BookingQuery,
            // Audit log
            crate::models::audit::AuditLogDetails,
            audit::AuditLogQuery,
            audit::AuditLogResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "equipment", description = "Equipment catalog"),
        (name = "bookings", description = "Booking requests and approval workflow"),
        (name = "users", description = "User management"),
        (name = "audit", description = "Booking lifecycle audit log")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

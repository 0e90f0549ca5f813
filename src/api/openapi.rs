//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, health, stats, vehicles};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fleetride API",
        version = "1.0.0",
        description = "Car Rental Marketplace Booking & Fare REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Fleetride Team", email = "dev@fleetride.in")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Bookings
        bookings::create_booking,
        bookings::get_booking,
        bookings::list_bookings,
        bookings::start_ride,
        bookings::complete_ride,
        bookings::cancel_booking,
        bookings::assign_driver,
        // Vehicles
        vehicles::create_vehicle,
        vehicles::get_vehicle,
        vehicles::check_availability,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            // Bookings
            bookings::CreateBookingRequest,
            bookings::CompleteRideRequest,
            bookings::AssignDriverRequest,
            bookings::BookingWithStatus,
            bookings::CreateBookingResponse,
            bookings::BookingDetailsResponse,
            bookings::TransitionResponse,
            bookings::CompleteRideResponse,
            bookings::CancelBookingResponse,
            bookings::BookingListResponse,
            // Vehicles
            vehicles::CreateVehicleRequest,
            crate::services::availability::AvailabilityReport,
            // Stats
            stats::StatsResponse,
            stats::BookingCounts,
            stats::RevenueStats,
            // Models
            crate::models::Booking,
            crate::models::Vehicle,
            crate::models::enums::BookingType,
            crate::models::enums::BookingStatus,
            crate::models::enums::ActorRole,
            crate::engine::fare::FareBreakdown,
            crate::engine::filter::BookingFilter,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "bookings", description = "Booking lifecycle and fares"),
        (name = "vehicles", description = "Vehicle pricing source and availability"),
        (name = "stats", description = "Fleet statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

//! Booking lifecycle endpoints

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    engine::{fare::FareBreakdown, filter::BookingFilter, status},
    error::AppResult,
    models::{ActorRole, Booking, BookingStatus, BookingType},
};

use super::validate_payload;

/// Create booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    /// Vehicle to reserve
    #[validate(range(min = 1))]
    pub vehicle_id: i32,
    /// Customer making the reservation
    #[validate(range(min = 1))]
    pub customer_id: i32,
    /// First rental day (inclusive, ISO 8601 date)
    pub start_date: NaiveDate,
    /// Last rental day (inclusive, ISO 8601 date)
    pub end_date: NaiveDate,
    /// Pricing mode for this booking
    pub booking_type: BookingType,
    /// Air-conditioned ride (10% surcharge on the base fare)
    pub is_ac: bool,
    /// Externally determined penalty if the booking is cancelled
    pub cancellation_fine: Option<Decimal>,
}

/// Complete ride request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CompleteRideRequest {
    /// Distance travelled, in km
    pub km_travelled: Decimal,
    /// Day the vehicle actually came back (ISO 8601 date)
    pub actual_return_date: NaiveDate,
    /// Externally determined penalty for returning after the booked end date
    pub late_return_fine: Option<Decimal>,
}

/// Assign driver request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignDriverRequest {
    #[validate(range(min = 1))]
    pub driver_id: i32,
}

/// Query parameters for the role-scoped booking listing
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListBookingsQuery {
    /// Dashboard role requesting the listing
    pub role: ActorRole,
    /// Acting customer/driver/owner id; ignored for admin
    pub actor_id: Option<i32>,
    /// Bucket to filter on (defaults to `all`)
    pub filter: Option<BookingFilter>,
}

/// A booking together with its resolved lifecycle status
#[derive(Serialize, ToSchema)]
pub struct BookingWithStatus {
    pub booking: Booking,
    pub status: BookingStatus,
}

/// Response for booking creation
#[derive(Serialize, ToSchema)]
pub struct CreateBookingResponse {
    pub booking: Booking,
    pub status: BookingStatus,
    /// Estimate from the same calculator that will produce the final
    /// amount; the distance is not yet known for per-km bookings
    pub fare_estimate: FareBreakdown,
}

/// Response for a single-booking lookup
#[derive(Serialize, ToSchema)]
pub struct BookingDetailsResponse {
    pub booking: Booking,
    pub status: BookingStatus,
    pub fare: FareBreakdown,
}

/// Response for start/assign transitions
#[derive(Serialize, ToSchema)]
pub struct TransitionResponse {
    pub id: i32,
    pub status: BookingStatus,
    pub message: String,
}

/// Response for ride completion
#[derive(Serialize, ToSchema)]
pub struct CompleteRideResponse {
    pub booking: Booking,
    pub fare: FareBreakdown,
    /// Amount persisted as the booking's total
    pub final_amount: Decimal,
}

/// Response for booking cancellation
#[derive(Serialize, ToSchema)]
pub struct CancelBookingResponse {
    pub booking: Booking,
    pub fare: FareBreakdown,
    pub cancellation_fine: Decimal,
}

/// Role-filtered booking listing with per-bucket badge counts
#[derive(Serialize, ToSchema)]
pub struct BookingListResponse {
    pub items: Vec<BookingWithStatus>,
    pub counts: BTreeMap<String, i64>,
}

fn with_status(booking: Booking) -> BookingWithStatus {
    let status = status::resolve(&booking, Utc::now().date_naive());
    BookingWithStatus { booking, status }
}

/// Create a new booking
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = CreateBookingResponse),
        (status = 400, description = "Invalid date range or request"),
        (status = 404, description = "Vehicle not found"),
        (status = 409, description = "Vehicle unavailable for the requested period")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<CreateBookingResponse>)> {
    validate_payload(&request)?;

    let (booking, fare_estimate) = state.services.bookings.create_booking(request).await?;
    let status = status::resolve(&booking, Utc::now().date_naive());

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            booking,
            status,
            fare_estimate,
        }),
    ))
}

/// Get a booking with its resolved status and current fare view
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking details", body = BookingDetailsResponse),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookingDetailsResponse>> {
    let (booking, status, fare) = state.services.bookings.get_booking(id).await?;

    Ok(Json(BookingDetailsResponse {
        booking,
        status,
        fare,
    }))
}

/// List bookings for a dashboard actor
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    params(ListBookingsQuery),
    responses(
        (status = 200, description = "Filtered bookings with bucket counts", body = BookingListResponse),
        (status = 400, description = "Missing actor_id or filter not valid for role")
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    Query(query): Query<ListBookingsQuery>,
) -> AppResult<Json<BookingListResponse>> {
    let filter = query.filter.unwrap_or(BookingFilter::All);
    let view = state
        .services
        .bookings
        .get_bookings_for_actor(query.role, query.actor_id, filter)
        .await?;

    Ok(Json(BookingListResponse {
        items: view.items.into_iter().map(with_status).collect(),
        counts: view.counts,
    }))
}

/// Start the ride (vehicle picked up)
#[utoipa::path(
    post,
    path = "/bookings/{id}/start",
    tag = "bookings",
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Ride started", body = TransitionResponse),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Booking is cancelled, completed or already started")
    )
)]
pub async fn start_ride(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<TransitionResponse>> {
    let booking = state.services.bookings.start_ride(id).await?;
    let status = status::resolve(&booking, Utc::now().date_naive());

    Ok(Json(TransitionResponse {
        id: booking.id,
        status,
        message: "Ride started".to_string(),
    }))
}

/// Complete the ride (vehicle returned)
#[utoipa::path(
    post,
    path = "/bookings/{id}/complete",
    tag = "bookings",
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    request_body = CompleteRideRequest,
    responses(
        (status = 200, description = "Ride completed, final amount computed", body = CompleteRideResponse),
        (status = 400, description = "Invalid distance, fine or return date"),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Ride not started or booking already terminal")
    )
)]
pub async fn complete_ride(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<CompleteRideRequest>,
) -> AppResult<Json<CompleteRideResponse>> {
    validate_payload(&request)?;

    let (booking, fare) = state.services.bookings.complete_ride(id, request).await?;
    let final_amount = fare.chargeable;

    Ok(Json(CompleteRideResponse {
        booking,
        fare,
        final_amount,
    }))
}

/// Cancel a booking before pickup
#[utoipa::path(
    post,
    path = "/bookings/{id}/cancel",
    tag = "bookings",
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking cancelled", body = CancelBookingResponse),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Booking already started or terminal")
    )
)]
pub async fn cancel_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CancelBookingResponse>> {
    let (booking, fare) = state.services.bookings.cancel_booking(id).await?;
    let cancellation_fine = fare.cancellation_fine;

    Ok(Json(CancelBookingResponse {
        booking,
        fare,
        cancellation_fine,
    }))
}

/// Assign a driver to a booking ahead of pickup
#[utoipa::path(
    post,
    path = "/bookings/{id}/driver",
    tag = "bookings",
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    request_body = AssignDriverRequest,
    responses(
        (status = 200, description = "Driver assigned", body = TransitionResponse),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Booking already started or terminal")
    )
)]
pub async fn assign_driver(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<AssignDriverRequest>,
) -> AppResult<Json<TransitionResponse>> {
    validate_payload(&request)?;

    let booking = state
        .services
        .bookings
        .assign_driver(id, request.driver_id)
        .await?;
    let status = status::resolve(&booking, Utc::now().date_naive());

    Ok(Json(TransitionResponse {
        id: booking.id,
        status,
        message: "Driver assigned".to_string(),
    }))
}

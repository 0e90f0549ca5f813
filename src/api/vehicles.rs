//! Vehicle endpoints: pricing-source registration and availability

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    engine::dates::RentalPeriod,
    error::{AppError, AppResult},
    models::Vehicle,
    services::availability::AvailabilityReport,
};

use super::validate_payload;

/// Register vehicle request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVehicleRequest {
    /// Owner of the vehicle in the marketplace's user store
    #[validate(range(min = 1))]
    pub owner_id: i32,
    /// Display name, e.g. "Maruti Swift VXI"
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Registration plate, unique per vehicle
    #[validate(length(min = 1, max = 32))]
    pub registration_no: String,
    /// Day rate for per-day bookings and the per-km floor
    pub price_per_day: Decimal,
    /// Distance rate for per-km bookings
    pub price_per_km: Decimal,
}

/// Query parameters for an availability check
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    /// First requested day (inclusive, ISO 8601 date)
    pub start_date: NaiveDate,
    /// Last requested day (inclusive, ISO 8601 date)
    pub end_date: NaiveDate,
}

/// Register a vehicle with its rental rates
#[utoipa::path(
    post,
    path = "/vehicles",
    tag = "vehicles",
    request_body = CreateVehicleRequest,
    responses(
        (status = 201, description = "Vehicle registered", body = Vehicle),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Registration number already exists")
    )
)]
pub async fn create_vehicle(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> AppResult<(StatusCode, Json<Vehicle>)> {
    validate_payload(&request)?;

    let vehicle = state.services.vehicles.register_vehicle(request).await?;

    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// Get vehicle details by ID
#[utoipa::path(
    get,
    path = "/vehicles/{id}",
    tag = "vehicles",
    params(
        ("id" = i32, Path, description = "Vehicle ID")
    ),
    responses(
        (status = 200, description = "Vehicle details", body = Vehicle),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn get_vehicle(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vehicle>> {
    let vehicle = state.services.vehicles.get_vehicle(id).await?;
    Ok(Json(vehicle))
}

/// Check whether a vehicle is free for a period
#[utoipa::path(
    get,
    path = "/vehicles/{id}/availability",
    tag = "vehicles",
    params(
        ("id" = i32, Path, description = "Vehicle ID"),
        AvailabilityQuery
    ),
    responses(
        (status = 200, description = "Availability with any conflicting bookings", body = AvailabilityReport),
        (status = 400, description = "Invalid period"),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn check_availability(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityReport>> {
    if query.end_date < query.start_date {
        return Err(AppError::Validation(
            "end date is before start date".to_string(),
        ));
    }

    let period = RentalPeriod::new(query.start_date, query.end_date);
    let report = state.services.availability.check(id, period).await?;

    Ok(Json(report))
}

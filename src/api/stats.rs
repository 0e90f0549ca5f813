//! Statistics endpoints

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Fleet statistics response
#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    /// Booking counts by resolved lifecycle state
    pub bookings: BookingCounts,
    /// Collected amounts
    pub revenue: RevenueStats,
}

#[derive(Serialize, ToSchema)]
pub struct BookingCounts {
    /// All bookings ever created
    pub total: i64,
    /// Rides in progress
    pub active: i64,
    /// Not started, pickup in the future
    pub upcoming: i64,
    /// Pickup date reached but ride not started
    pub pending: i64,
    /// Finished rides
    pub completed: i64,
    /// Cancelled bookings
    pub cancelled: i64,
}

#[derive(Serialize, ToSchema)]
pub struct RevenueStats {
    /// Final amounts of completed rides
    pub completed: Decimal,
    /// Late return fines included in completed amounts
    pub late_return_fines: Decimal,
    /// Fines charged on cancelled bookings
    pub cancellation_fines: Decimal,
    /// Everything collected: completed amounts plus cancellation fines
    pub total: Decimal,
}

/// Get fleet-wide booking statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Fleet statistics", body = StatsResponse)
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
) -> AppResult<Json<StatsResponse>> {
    let stats = state.services.stats.booking_stats().await?;
    Ok(Json(stats))
}

//! Booking model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::BookingType;

/// Booking record from the database.
///
/// `price_per_day`/`price_per_km` are snapshots of the vehicle's rates at
/// creation time; later rate changes never affect an existing booking.
/// The three lifecycle flags are only ever mutated by the guarded
/// transition statements in the bookings repository.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: i32,
    pub vehicle_id: i32,
    pub customer_id: i32,
    pub driver_id: Option<i32>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub actual_return_date: Option<NaiveDate>,
    pub booking_type: BookingType,
    pub is_ac: bool,
    pub km_travelled: Decimal,
    pub price_per_day: Decimal,
    pub price_per_km: Decimal,
    pub late_return_fine: Decimal,
    pub cancellation_fine: Decimal,
    pub total_amount: Option<Decimal>,
    pub is_started: bool,
    pub is_completed: bool,
    pub is_cancelled: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new booking, assembled by the bookings service
/// after date validation and vehicle pricing lookup
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub vehicle_id: i32,
    pub customer_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub booking_type: BookingType,
    pub is_ac: bool,
    pub price_per_day: Decimal,
    pub price_per_km: Decimal,
    pub cancellation_fine: Decimal,
}

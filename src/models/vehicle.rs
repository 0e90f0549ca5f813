//! Vehicle model and related types
//!
//! Vehicles are owned by the surrounding marketplace system; this server
//! only needs them as the pricing source snapshotted at booking creation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Vehicle record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Vehicle {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub registration_no: String,
    pub price_per_day: Decimal,
    pub price_per_km: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for registering a vehicle
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub owner_id: i32,
    pub name: String,
    pub registration_no: String,
    pub price_per_day: Decimal,
    pub price_per_km: Decimal,
}

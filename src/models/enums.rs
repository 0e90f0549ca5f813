//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// BookingType
// ---------------------------------------------------------------------------

/// The two mutually exclusive pricing modes selectable at booking creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "booking_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingType {
    /// Billed as price_per_day x rental days
    PerDay,
    /// Billed by distance, floored at one day's fare
    PerKm,
}

impl std::fmt::Display for BookingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookingType::PerDay => "per_day",
            BookingType::PerKm => "per_km",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// BookingStatus
// ---------------------------------------------------------------------------

/// Canonical lifecycle state of a booking, derived from its persisted
/// flags and dates by `engine::status::resolve`. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Cancelled before pickup (terminal)
    Cancelled,
    /// Ride finished, return recorded (terminal)
    Completed,
    /// Ride in progress
    Active,
    /// Not started, pickup date still in the future
    Upcoming,
    /// Pickup date reached but the ride has not started
    Pending,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
            BookingStatus::Active => "active",
            BookingStatus::Upcoming => "upcoming",
            BookingStatus::Pending => "pending",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// ActorRole
// ---------------------------------------------------------------------------

/// Dashboard role requesting a booking listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Customer,
    Driver,
    Owner,
    Admin,
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ActorRole::Customer => "customer",
            ActorRole::Driver => "driver",
            ActorRole::Owner => "owner",
            ActorRole::Admin => "admin",
        };
        write!(f, "{}", label)
    }
}

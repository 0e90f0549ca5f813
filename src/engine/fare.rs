//! Fare computation
//!
//! One implementation serves both the creation-time estimate (no distance
//! yet) and the authoritative final amount at completion or cancellation.
//! Clients only ever display what this module returns.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::PricingConfig;
use crate::engine::dates::RentalPeriod;
use crate::models::{Booking, BookingType};

/// Inputs to a fare computation. Prices are the per-booking snapshots,
/// fines are externally determined amounts.
#[derive(Debug, Clone)]
pub struct FareInputs {
    pub booking_type: BookingType,
    pub price_per_day: Decimal,
    pub price_per_km: Decimal,
    pub rental_days: i64,
    pub km_travelled: Decimal,
    pub is_ac: bool,
    pub late_return_fine: Decimal,
    pub cancellation_fine: Decimal,
    pub is_cancelled: bool,
}

impl FareInputs {
    /// Inputs for the current state of a persisted booking
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            booking_type: booking.booking_type,
            price_per_day: booking.price_per_day,
            price_per_km: booking.price_per_km,
            rental_days: RentalPeriod::new(booking.start_date, booking.end_date).days(),
            km_travelled: booking.km_travelled,
            is_ac: booking.is_ac,
            late_return_fine: booking.late_return_fine,
            cancellation_fine: booking.cancellation_fine,
            is_cancelled: booking.is_cancelled,
        }
    }
}

/// Itemized fare, returned to clients and persisted as `total_amount`
/// via its `chargeable` field
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FareBreakdown {
    pub base: Decimal,
    pub ac_surcharge: Decimal,
    pub late_return_fine: Decimal,
    pub cancellation_fine: Decimal,
    pub chargeable: Decimal,
}

/// Compute the itemized fare for a booking.
///
/// A per-km booking guarantees the owner at least one day's fare: short
/// trips pay the per-day price, long trips pay the true per-km amount.
/// On cancellation only the cancellation fine is chargeable.
pub fn calculate(policy: &PricingConfig, inputs: &FareInputs) -> FareBreakdown {
    let base = match inputs.booking_type {
        BookingType::PerDay => inputs.price_per_day * Decimal::from(inputs.rental_days),
        BookingType::PerKm => {
            if inputs.km_travelled > Decimal::ZERO {
                (inputs.km_travelled * inputs.price_per_km).max(inputs.price_per_day)
            } else {
                // Distance not yet known (estimate) or zero: day floor
                inputs.price_per_day
            }
        }
    };

    let ac_surcharge = if inputs.is_ac {
        (base * policy.ac_surcharge_rate)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    } else {
        Decimal::ZERO
    };

    let chargeable = if inputs.is_cancelled {
        inputs.cancellation_fine
    } else {
        base + ac_surcharge + inputs.late_return_fine
    };

    FareBreakdown {
        base,
        ac_surcharge,
        late_return_fine: inputs.late_return_fine,
        cancellation_fine: inputs.cancellation_fine,
        chargeable,
    }
}

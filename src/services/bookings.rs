//! Booking lifecycle service
//!
//! Orchestrates the engine components around the repository: date
//! validation and fare policy on the way in, status resolution and
//! role filtering on the way out.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::{
    api::bookings::{CompleteRideRequest, CreateBookingRequest},
    config::PricingConfig,
    engine::{
        dates::{validate_range, RentalPeriod},
        fare::{self, FareBreakdown, FareInputs},
        filter::{filter_for_role, BookingFilter, FilteredBookings},
        status,
    },
    error::{AppError, AppResult},
    models::{
        booking::{Booking, NewBooking},
        enums::{ActorRole, BookingStatus},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
    pricing: PricingConfig,
}

impl BookingsService {
    pub fn new(repository: Repository, pricing: PricingConfig) -> Self {
        Self { repository, pricing }
    }

    /// Create a booking: validate the date range, snapshot the vehicle's
    /// rates, and insert under the per-vehicle availability discipline.
    /// Returns the booking together with its fare estimate.
    pub async fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> AppResult<(Booking, FareBreakdown)> {
        let today = Utc::now().date_naive();
        let period = RentalPeriod::new(request.start_date, request.end_date);
        let check = validate_range(period, today, self.pricing.max_rental_days)?;

        let cancellation_fine = request.cancellation_fine.unwrap_or(Decimal::ZERO);
        if cancellation_fine < Decimal::ZERO {
            return Err(AppError::Validation(
                "cancellation fine cannot be negative".to_string(),
            ));
        }

        let vehicle = self.repository.vehicles.get_by_id(request.vehicle_id).await?;

        let new = NewBooking {
            vehicle_id: vehicle.id,
            customer_id: request.customer_id,
            start_date: period.start,
            end_date: period.end,
            booking_type: request.booking_type,
            is_ac: request.is_ac,
            price_per_day: vehicle.price_per_day,
            price_per_km: vehicle.price_per_km,
            cancellation_fine,
        };

        let booking = self.repository.bookings.create(&new).await?;
        let estimate = fare::calculate(&self.pricing, &FareInputs::from_booking(&booking));

        tracing::info!(
            booking_id = booking.id,
            vehicle_id = booking.vehicle_id,
            rental_days = check.rental_days,
            "booking created"
        );

        Ok((booking, estimate))
    }

    /// Mark the ride as started (vehicle picked up)
    pub async fn start_ride(&self, id: i32) -> AppResult<Booking> {
        let booking = self.repository.bookings.start(id).await?;
        tracing::info!(booking_id = id, "ride started");
        Ok(booking)
    }

    /// Record the drop-off and compute the authoritative final amount
    pub async fn complete_ride(
        &self,
        id: i32,
        request: CompleteRideRequest,
    ) -> AppResult<(Booking, FareBreakdown)> {
        if request.km_travelled < Decimal::ZERO {
            return Err(AppError::Validation(
                "km travelled cannot be negative".to_string(),
            ));
        }
        let late_return_fine = request.late_return_fine.unwrap_or(Decimal::ZERO);
        if late_return_fine < Decimal::ZERO {
            return Err(AppError::Validation(
                "late return fine cannot be negative".to_string(),
            ));
        }

        let booking = self.repository.bookings.get_by_id(id).await?;
        if request.actual_return_date < booking.start_date {
            return Err(AppError::Validation(
                "actual return date is before the pickup date".to_string(),
            ));
        }

        // Final fare from the same calculator that produced the estimate,
        // now with the recorded distance and any late fine
        let mut inputs = FareInputs::from_booking(&booking);
        inputs.km_travelled = request.km_travelled;
        inputs.late_return_fine = late_return_fine;
        let breakdown = fare::calculate(&self.pricing, &inputs);

        let updated = self
            .repository
            .bookings
            .complete(
                id,
                request.km_travelled,
                request.actual_return_date,
                late_return_fine,
                breakdown.chargeable,
            )
            .await?;

        tracing::info!(
            booking_id = id,
            final_amount = %breakdown.chargeable,
            "ride completed"
        );

        Ok((updated, breakdown))
    }

    /// Cancel a booking before pickup; only the cancellation fine remains
    /// chargeable
    pub async fn cancel_booking(&self, id: i32) -> AppResult<(Booking, FareBreakdown)> {
        let booking = self.repository.bookings.cancel(id).await?;
        let breakdown = fare::calculate(&self.pricing, &FareInputs::from_booking(&booking));

        tracing::info!(
            booking_id = id,
            cancellation_fine = %breakdown.cancellation_fine,
            "booking cancelled"
        );

        Ok((booking, breakdown))
    }

    /// Assign a driver ahead of pickup
    pub async fn assign_driver(&self, id: i32, driver_id: i32) -> AppResult<Booking> {
        self.repository.bookings.assign_driver(id, driver_id).await
    }

    /// One booking with its resolved status and current fare view
    pub async fn get_booking(&self, id: i32) -> AppResult<(Booking, BookingStatus, FareBreakdown)> {
        let booking = self.repository.bookings.get_by_id(id).await?;
        let today = Utc::now().date_naive();
        let state = status::resolve(&booking, today);
        let breakdown = fare::calculate(&self.pricing, &FareInputs::from_booking(&booking));
        Ok((booking, state, breakdown))
    }

    /// Role-scoped, filtered booking listing with per-bucket counts
    pub async fn get_bookings_for_actor(
        &self,
        role: ActorRole,
        actor_id: Option<i32>,
        filter: BookingFilter,
    ) -> AppResult<FilteredBookings> {
        let actor_id = match (role, actor_id) {
            (ActorRole::Admin, _) => 0,
            (_, Some(id)) => id,
            (_, None) => {
                return Err(AppError::Validation(format!(
                    "actor_id is required for role '{}'",
                    role
                )))
            }
        };

        let bookings = self.repository.bookings.list_for_actor(role, actor_id).await?;
        let today = Utc::now().date_naive();
        filter_for_role(bookings, role, filter, today)
    }
}

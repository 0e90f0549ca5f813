//! Vehicle availability checking

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    engine::dates::RentalPeriod,
    error::AppResult,
    models::Booking,
    repository::Repository,
};

/// Result of an availability check for one vehicle and period
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityReport {
    pub is_available: bool,
    /// Non-cancelled bookings whose inclusive interval overlaps the
    /// requested one
    pub conflicting_bookings: Vec<Booking>,
}

#[derive(Clone)]
pub struct AvailabilityService {
    repository: Repository,
}

impl AvailabilityService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Check whether a vehicle is free for the whole requested period.
    ///
    /// Standalone pre-check for the UI. Booking creation repeats this
    /// under the per-vehicle lock, so a clean answer here is advisory and
    /// may still lose the race at creation time.
    pub async fn check(&self, vehicle_id: i32, period: RentalPeriod) -> AppResult<AvailabilityReport> {
        // Verify vehicle exists
        self.repository.vehicles.get_by_id(vehicle_id).await?;

        let existing = self
            .repository
            .bookings
            .list_active_for_vehicle(vehicle_id)
            .await?;

        let conflicting_bookings: Vec<Booking> = existing
            .into_iter()
            .filter(|b| period.overlaps(&RentalPeriod::new(b.start_date, b.end_date)))
            .collect();

        Ok(AvailabilityReport {
            is_available: conflicting_bookings.is_empty(),
            conflicting_bookings,
        })
    }
}

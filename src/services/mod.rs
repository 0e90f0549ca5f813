//! Business logic services

pub mod availability;
pub mod bookings;
pub mod stats;
pub mod vehicles;

use crate::{config::PricingConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub bookings: bookings::BookingsService,
    pub availability: availability::AvailabilityService,
    pub vehicles: vehicles::VehiclesService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository and fare policy
    pub fn new(repository: Repository, pricing: PricingConfig) -> Self {
        Self {
            bookings: bookings::BookingsService::new(repository.clone(), pricing),
            availability: availability::AvailabilityService::new(repository.clone()),
            vehicles: vehicles::VehiclesService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
        }
    }
}

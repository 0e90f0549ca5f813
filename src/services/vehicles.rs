//! Vehicle registration service
//!
//! Minimal surface over the pricing source. Full vehicle CRUD and the
//! approval workflow live in the surrounding marketplace system.

use rust_decimal::Decimal;

use crate::{
    api::vehicles::CreateVehicleRequest,
    error::{AppError, AppResult},
    models::vehicle::{NewVehicle, Vehicle},
    repository::Repository,
};

#[derive(Clone)]
pub struct VehiclesService {
    repository: Repository,
}

impl VehiclesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_vehicle(&self, id: i32) -> AppResult<Vehicle> {
        self.repository.vehicles.get_by_id(id).await
    }

    /// Register a vehicle with its rental rates
    pub async fn register_vehicle(&self, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        if request.price_per_day < Decimal::ZERO || request.price_per_km < Decimal::ZERO {
            return Err(AppError::Validation(
                "rental rates cannot be negative".to_string(),
            ));
        }

        let new = NewVehicle {
            owner_id: request.owner_id,
            name: request.name,
            registration_no: request.registration_no,
            price_per_day: request.price_per_day,
            price_per_km: request.price_per_km,
        };

        let vehicle = self.repository.vehicles.create(&new).await?;

        tracing::info!(vehicle_id = vehicle.id, "vehicle registered");

        Ok(vehicle)
    }
}

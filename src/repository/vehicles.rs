//! Vehicles repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::vehicle::{NewVehicle, Vehicle},
};

#[derive(Clone)]
pub struct VehiclesRepository {
    pool: Pool<Postgres>,
}

impl VehiclesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get vehicle by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle with id {} not found", id)))
    }

    /// Register a vehicle with its rental rates
    pub async fn create(&self, vehicle: &NewVehicle) -> AppResult<Vehicle> {
        let created = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (owner_id, name, registration_no, price_per_day, price_per_km)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(vehicle.owner_id)
        .bind(&vehicle.name)
        .bind(&vehicle.registration_no)
        .bind(vehicle.price_per_day)
        .bind(vehicle.price_per_km)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(format!(
                "Vehicle with registration '{}' already exists",
                vehicle.registration_no
            )),
            _ => AppError::Database(e),
        })?;

        Ok(created)
    }
}

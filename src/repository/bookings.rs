//! Bookings repository for database operations
//!
//! All lifecycle flag mutations happen here as single guarded UPDATE
//! statements: the expected pre-state is part of the WHERE clause, so a
//! lost race surfaces as zero affected rows and never as partial state.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    engine::{dates::RentalPeriod, status},
    error::{AppError, AppResult},
    models::{
        booking::{Booking, NewBooking},
        enums::ActorRole,
    },
};

/// Advisory lock namespace for per-vehicle booking serialization
const VEHICLE_LOCK_CLASS: i32 = 1811;

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// All non-cancelled bookings for a vehicle. Cancelled bookings never
    /// occupy the calendar.
    pub async fn list_active_for_vehicle(&self, vehicle_id: i32) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE vehicle_id = $1 AND NOT is_cancelled ORDER BY start_date",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// All bookings, newest first
    pub async fn list_all(&self) -> AppResult<Vec<Booking>> {
        let bookings =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(bookings)
    }

    /// Bookings visible to one dashboard actor
    pub async fn list_for_actor(&self, role: ActorRole, actor_id: i32) -> AppResult<Vec<Booking>> {
        let bookings = match role {
            ActorRole::Customer => {
                sqlx::query_as::<_, Booking>(
                    "SELECT * FROM bookings WHERE customer_id = $1 ORDER BY created_at DESC",
                )
                .bind(actor_id)
                .fetch_all(&self.pool)
                .await?
            }
            ActorRole::Driver => {
                sqlx::query_as::<_, Booking>(
                    "SELECT * FROM bookings WHERE driver_id = $1 ORDER BY created_at DESC",
                )
                .bind(actor_id)
                .fetch_all(&self.pool)
                .await?
            }
            ActorRole::Owner => {
                sqlx::query_as::<_, Booking>(
                    r#"
                    SELECT b.* FROM bookings b
                    JOIN vehicles v ON v.id = b.vehicle_id
                    WHERE v.owner_id = $1
                    ORDER BY b.created_at DESC
                    "#,
                )
                .bind(actor_id)
                .fetch_all(&self.pool)
                .await?
            }
            ActorRole::Admin => self.list_all().await?,
        };

        Ok(bookings)
    }

    /// Create a booking, serialized per vehicle.
    ///
    /// The advisory transaction lock makes concurrent creation attempts
    /// for the same vehicle run the availability check one at a time; the
    /// `bookings_no_overlap` exclusion constraint backstops it so a second
    /// writer can never slip through.
    pub async fn create(&self, new: &NewBooking) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1, $2)")
            .bind(VEHICLE_LOCK_CLASS)
            .bind(new.vehicle_id)
            .execute(&mut *tx)
            .await?;

        let existing = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE vehicle_id = $1 AND NOT is_cancelled",
        )
        .bind(new.vehicle_id)
        .fetch_all(&mut *tx)
        .await?;

        let period = RentalPeriod::new(new.start_date, new.end_date);
        let conflicts: Vec<i32> = existing
            .iter()
            .filter(|b| period.overlaps(&RentalPeriod::new(b.start_date, b.end_date)))
            .map(|b| b.id)
            .collect();

        if !conflicts.is_empty() {
            return Err(AppError::Conflict(format!(
                "Vehicle {} is already booked for {} (bookings {:?})",
                new.vehicle_id, period, conflicts
            )));
        }

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                vehicle_id, customer_id, start_date, end_date, booking_type,
                is_ac, price_per_day, price_per_km, cancellation_fine
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(new.vehicle_id)
        .bind(new.customer_id)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(new.booking_type)
        .bind(new.is_ac)
        .bind(new.price_per_day)
        .bind(new.price_per_km)
        .bind(new.cancellation_fine)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| Self::map_overlap_violation(e, new.vehicle_id))?;

        tx.commit().await?;

        Ok(booking)
    }

    /// Mark the ride as started. Only legal from the requested state.
    pub async fn start(&self, id: i32) -> AppResult<Booking> {
        let updated = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings SET is_started = TRUE
            WHERE id = $1 AND NOT is_started AND NOT is_completed AND NOT is_cancelled
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(booking) => Ok(booking),
            None => Err(self.transition_error(id, "start").await),
        }
    }

    /// Record the drop-off: distance, actual return date, late fine and
    /// the final amount, flipping the completed flag in the same statement.
    pub async fn complete(
        &self,
        id: i32,
        km_travelled: Decimal,
        actual_return_date: NaiveDate,
        late_return_fine: Decimal,
        total_amount: Decimal,
    ) -> AppResult<Booking> {
        let updated = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET is_completed = TRUE,
                km_travelled = $2,
                actual_return_date = $3,
                late_return_fine = $4,
                total_amount = $5
            WHERE id = $1 AND is_started AND NOT is_completed AND NOT is_cancelled
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(km_travelled)
        .bind(actual_return_date)
        .bind(late_return_fine)
        .bind(total_amount)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(booking) => Ok(booking),
            None => Err(self.transition_error(id, "complete").await),
        }
    }

    /// Cancel a booking before pickup. The cancellation fine becomes the
    /// persisted amount owed.
    pub async fn cancel(&self, id: i32) -> AppResult<Booking> {
        let updated = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET is_cancelled = TRUE, total_amount = cancellation_fine
            WHERE id = $1 AND NOT is_started AND NOT is_completed AND NOT is_cancelled
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(booking) => Ok(booking),
            None => Err(self.transition_error(id, "cancel").await),
        }
    }

    /// Assign a driver. Only before the ride starts.
    pub async fn assign_driver(&self, id: i32, driver_id: i32) -> AppResult<Booking> {
        let updated = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings SET driver_id = $2
            WHERE id = $1 AND NOT is_started AND NOT is_completed AND NOT is_cancelled
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(driver_id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(booking) => Ok(booking),
            None => Err(self.transition_error(id, "assign a driver to").await),
        }
    }

    /// A guarded transition matched no row: either the booking does not
    /// exist, or its current state refuses the move.
    async fn transition_error(&self, id: i32, verb: &str) -> AppError {
        match self.get_by_id(id).await {
            Ok(booking) => {
                let state = status::resolve(&booking, Utc::now().date_naive());
                AppError::StateTransition(format!(
                    "cannot {} booking {} in state '{}'",
                    verb, id, state
                ))
            }
            Err(not_found) => not_found,
        }
    }

    fn map_overlap_violation(e: sqlx::Error, vehicle_id: i32) -> AppError {
        match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23P01") => {
                AppError::Conflict(format!(
                    "Vehicle {} was booked concurrently for an overlapping period",
                    vehicle_id
                ))
            }
            _ => AppError::Database(e),
        }
    }
}

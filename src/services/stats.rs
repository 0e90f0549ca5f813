//! Fleet statistics service

use chrono::Utc;
use rust_decimal::Decimal;

use crate::{
    api::stats::{BookingCounts, RevenueStats, StatsResponse},
    engine::status,
    error::AppResult,
    models::BookingStatus,
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Cheap connectivity probe for the readiness endpoint
    pub async fn ping_db(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.repository.pool).await?;
        Ok(())
    }

    /// Fleet-wide booking counts and collected revenue for the admin
    /// dashboard. Counts go through the status resolver like every other
    /// consumer.
    pub async fn booking_stats(&self) -> AppResult<StatsResponse> {
        let bookings = self.repository.bookings.list_all().await?;
        let today = Utc::now().date_naive();

        let mut counts = BookingCounts {
            total: bookings.len() as i64,
            active: 0,
            upcoming: 0,
            pending: 0,
            completed: 0,
            cancelled: 0,
        };
        let mut revenue = RevenueStats {
            completed: Decimal::ZERO,
            late_return_fines: Decimal::ZERO,
            cancellation_fines: Decimal::ZERO,
            total: Decimal::ZERO,
        };

        for booking in &bookings {
            match status::resolve(booking, today) {
                BookingStatus::Active => counts.active += 1,
                BookingStatus::Upcoming => counts.upcoming += 1,
                BookingStatus::Pending => counts.pending += 1,
                BookingStatus::Completed => {
                    counts.completed += 1;
                    if let Some(amount) = booking.total_amount {
                        revenue.completed += amount;
                    }
                    revenue.late_return_fines += booking.late_return_fine;
                }
                BookingStatus::Cancelled => {
                    counts.cancelled += 1;
                    if let Some(amount) = booking.total_amount {
                        revenue.cancellation_fines += amount;
                    }
                }
            }
        }

        revenue.total = revenue.completed + revenue.cancellation_fines;

        Ok(StatsResponse {
            bookings: counts,
            revenue,
        })
    }
}

//! Rental date-range validation and inclusive interval arithmetic

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// An inclusive calendar-day interval: both the first and the last day of
/// a rental count toward its length and its occupancy of the vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RentalPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl RentalPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Inclusive day count. A same-day rental is 1 day.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Closed-interval overlap test. A shared boundary day counts as an
    /// overlap: a vehicle cannot be dropped off and picked up by two
    /// different customers on the same calendar day.
    pub fn overlaps(&self, other: &RentalPeriod) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl std::fmt::Display for RentalPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Outcome of a successful date-range validation
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct DateRangeCheck {
    /// Inclusive rental length in days
    pub rental_days: i64,
    /// Pickup and drop-off fall on the same calendar day
    pub is_same_day: bool,
}

/// Validate a proposed rental interval against the current date and the
/// maximum bookable window. Dates carry no time-of-day significance.
pub fn validate_range(
    period: RentalPeriod,
    today: NaiveDate,
    max_rental_days: i64,
) -> AppResult<DateRangeCheck> {
    if period.end < period.start {
        return Err(AppError::Validation(
            "end date is before start date".to_string(),
        ));
    }
    if period.start < today {
        return Err(AppError::Validation(
            "start date is in the past".to_string(),
        ));
    }

    let rental_days = period.days();
    if rental_days > max_rental_days {
        return Err(AppError::Validation(format!(
            "rental window of {} days exceeds the maximum of {} days",
            rental_days, max_rental_days
        )));
    }

    Ok(DateRangeCheck {
        rental_days,
        is_same_day: period.start == period.end,
    })
}

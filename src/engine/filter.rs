//! Role-specific booking views and dashboard counts
//!
//! Pure functions over a booking collection. Bucket membership is decided
//! exclusively by `status::resolve`; roles only re-label and group.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::engine::status;
use crate::error::{AppError, AppResult};
use crate::models::{ActorRole, Booking, BookingStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Filter keys accepted by the booking listing endpoint. Which keys are
/// legal depends on the requesting role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingFilter {
    All,
    Active,
    Upcoming,
    Pending,
    Completed,
    Cancelled,
    /// Driver only: handed to the driver but the ride has not started
    Assigned,
}

impl BookingFilter {
    fn key(&self) -> &'static str {
        match self {
            BookingFilter::All => "all",
            BookingFilter::Active => "active",
            BookingFilter::Upcoming => "upcoming",
            BookingFilter::Pending => "pending",
            BookingFilter::Completed => "completed",
            BookingFilter::Cancelled => "cancelled",
            BookingFilter::Assigned => "assigned",
        }
    }
}

impl std::fmt::Display for BookingFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Buckets shown on each role's dashboard, in display order
fn buckets_for_role(role: ActorRole) -> &'static [BookingFilter] {
    match role {
        ActorRole::Customer | ActorRole::Admin => &[
            BookingFilter::All,
            BookingFilter::Active,
            BookingFilter::Upcoming,
            BookingFilter::Pending,
            BookingFilter::Completed,
            BookingFilter::Cancelled,
        ],
        ActorRole::Driver => &[
            BookingFilter::All,
            BookingFilter::Assigned,
            BookingFilter::Active,
            BookingFilter::Completed,
            BookingFilter::Cancelled,
        ],
        ActorRole::Owner => &[
            BookingFilter::All,
            BookingFilter::Pending,
            BookingFilter::Active,
            BookingFilter::Completed,
            BookingFilter::Cancelled,
        ],
    }
}

fn matches(booking: &Booking, role: ActorRole, filter: BookingFilter, today: NaiveDate) -> bool {
    let state = status::resolve(booking, today);
    match filter {
        BookingFilter::All => true,
        BookingFilter::Active => state == BookingStatus::Active,
        BookingFilter::Upcoming => state == BookingStatus::Upcoming,
        BookingFilter::Pending => {
            // The owner's pending bucket lists rides awaiting pickup that
            // already have a driver; without one there is nothing to hand over
            if role == ActorRole::Owner {
                state == BookingStatus::Pending && booking.driver_id.is_some()
            } else {
                state == BookingStatus::Pending
            }
        }
        BookingFilter::Completed => state == BookingStatus::Completed,
        BookingFilter::Cancelled => state == BookingStatus::Cancelled,
        BookingFilter::Assigned => {
            matches!(state, BookingStatus::Upcoming | BookingStatus::Pending)
        }
    }
}

/// One role's filtered view of a booking collection, with per-bucket
/// counts for dashboard badges
#[derive(Debug)]
pub struct FilteredBookings {
    pub items: Vec<Booking>,
    pub counts: BTreeMap<String, i64>,
}

/// Filter a booking collection for one dashboard.
///
/// Fails with a validation error when the filter key is not one of the
/// role's buckets (e.g. `assigned` for a customer).
pub fn filter_for_role(
    bookings: Vec<Booking>,
    role: ActorRole,
    filter: BookingFilter,
    today: NaiveDate,
) -> AppResult<FilteredBookings> {
    let buckets = buckets_for_role(role);
    if !buckets.contains(&filter) {
        return Err(AppError::Validation(format!(
            "filter '{}' is not valid for role '{}'",
            filter, role
        )));
    }

    let counts = buckets
        .iter()
        .map(|bucket| {
            let n = bookings
                .iter()
                .filter(|b| matches(b, role, *bucket, today))
                .count() as i64;
            (bucket.key().to_string(), n)
        })
        .collect();

    let items = bookings
        .into_iter()
        .filter(|b| matches(b, role, filter, today))
        .collect();

    Ok(FilteredBookings { items, counts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testutil::{booking, date};

    /// One booking in each lifecycle state, as of 2025-03-10
    fn fixture() -> Vec<Booking> {
        let today = date(2025, 3, 10);

        let upcoming = booking(1, today + chrono::Duration::days(5), today + chrono::Duration::days(7));

        let mut pending = booking(2, today - chrono::Duration::days(1), today + chrono::Duration::days(1));
        pending.driver_id = Some(50);

        let pending_no_driver = booking(3, today, today + chrono::Duration::days(2));

        let mut active = booking(4, today - chrono::Duration::days(2), today);
        active.is_started = true;
        active.driver_id = Some(50);

        let mut completed = booking(5, today - chrono::Duration::days(9), today - chrono::Duration::days(7));
        completed.is_started = true;
        completed.is_completed = true;

        let mut cancelled = booking(6, today + chrono::Duration::days(3), today + chrono::Duration::days(4));
        cancelled.is_cancelled = true;

        vec![upcoming, pending, pending_no_driver, active, completed, cancelled]
    }

    #[test]
    fn test_customer_buckets_and_counts() {
        let today = date(2025, 3, 10);
        let view =
            filter_for_role(fixture(), ActorRole::Customer, BookingFilter::All, today).unwrap();
        assert_eq!(view.items.len(), 6);
        assert_eq!(view.counts["all"], 6);
        assert_eq!(view.counts["active"], 1);
        assert_eq!(view.counts["upcoming"], 1);
        assert_eq!(view.counts["pending"], 2);
        assert_eq!(view.counts["completed"], 1);
        assert_eq!(view.counts["cancelled"], 1);
    }

    #[test]
    fn test_customer_pending_subset() {
        let today = date(2025, 3, 10);
        let view =
            filter_for_role(fixture(), ActorRole::Customer, BookingFilter::Pending, today).unwrap();
        let ids: Vec<i32> = view.items.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_owner_pending_requires_driver() {
        let today = date(2025, 3, 10);
        let view =
            filter_for_role(fixture(), ActorRole::Owner, BookingFilter::Pending, today).unwrap();
        let ids: Vec<i32> = view.items.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(view.counts["pending"], 1);
    }

    #[test]
    fn test_driver_assigned_bucket() {
        let today = date(2025, 3, 10);
        let view =
            filter_for_role(fixture(), ActorRole::Driver, BookingFilter::Assigned, today).unwrap();
        // Upcoming and pending, not yet started
        let ids: Vec<i32> = view.items.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(view.counts["assigned"], 3);
    }

    #[test]
    fn test_admin_mirrors_customer_buckets() {
        let today = date(2025, 3, 10);
        let admin =
            filter_for_role(fixture(), ActorRole::Admin, BookingFilter::Active, today).unwrap();
        let customer =
            filter_for_role(fixture(), ActorRole::Customer, BookingFilter::Active, today).unwrap();
        assert_eq!(admin.counts, customer.counts);
    }

    #[test]
    fn test_filter_not_valid_for_role() {
        let today = date(2025, 3, 10);
        let err = filter_for_role(fixture(), ActorRole::Driver, BookingFilter::Upcoming, today)
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = filter_for_role(fixture(), ActorRole::Customer, BookingFilter::Assigned, today)
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}

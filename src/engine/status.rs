//! Canonical booking status resolution
//!
//! Every consumer of a booking's lifecycle state goes through `resolve`.
//! Dashboards re-label and group its output but never re-derive the
//! precedence from the raw flags themselves.

use chrono::NaiveDate;

use crate::models::{Booking, BookingStatus};

/// Derive the canonical lifecycle state of a booking.
///
/// Precedence is strict: cancelled beats completed beats started beats
/// the wall-clock comparison against the pickup date.
pub fn resolve(booking: &Booking, today: NaiveDate) -> BookingStatus {
    if booking.is_cancelled {
        return BookingStatus::Cancelled;
    }
    if booking.is_completed {
        return BookingStatus::Completed;
    }
    if booking.is_started {
        return BookingStatus::Active;
    }
    if today < booking.start_date {
        BookingStatus::Upcoming
    } else {
        BookingStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testutil::{booking, date};

    #[test]
    fn test_cancelled_wins_over_everything() {
        let mut b = booking(1, date(2025, 3, 1), date(2025, 3, 3));
        b.is_cancelled = true;
        b.is_completed = true;
        b.is_started = true;
        assert_eq!(resolve(&b, date(2025, 3, 2)), BookingStatus::Cancelled);
    }

    #[test]
    fn test_completed_wins_over_started() {
        let mut b = booking(1, date(2025, 3, 1), date(2025, 3, 3));
        b.is_started = true;
        b.is_completed = true;
        assert_eq!(resolve(&b, date(2025, 3, 2)), BookingStatus::Completed);
    }

    #[test]
    fn test_started_is_active_regardless_of_dates() {
        let mut b = booking(1, date(2025, 3, 1), date(2025, 3, 3));
        b.is_started = true;
        // Still active even after the booked end date has passed
        assert_eq!(resolve(&b, date(2025, 3, 10)), BookingStatus::Active);
        assert_eq!(resolve(&b, date(2025, 2, 20)), BookingStatus::Active);
    }

    #[test]
    fn test_upcoming_before_start_date() {
        let b = booking(1, date(2025, 3, 1), date(2025, 3, 3));
        assert_eq!(resolve(&b, date(2025, 2, 28)), BookingStatus::Upcoming);
    }

    #[test]
    fn test_pending_from_start_date_onwards() {
        let b = booking(1, date(2025, 3, 1), date(2025, 3, 3));
        assert_eq!(resolve(&b, date(2025, 3, 1)), BookingStatus::Pending);
        assert_eq!(resolve(&b, date(2025, 3, 5)), BookingStatus::Pending);
    }
}

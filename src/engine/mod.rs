//! Booking lifecycle and fare engine
//!
//! Pure, synchronous business logic: date-range validation, interval
//! overlap, lifecycle status resolution, fare computation and role-based
//! filtering. Nothing in here touches the database; the repository and
//! service layers feed it persisted state and the current date.

pub mod dates;
pub mod fare;
pub mod filter;
pub mod status;

pub use dates::{validate_range, DateRangeCheck, RentalPeriod};
pub use fare::{FareBreakdown, FareInputs};
pub use filter::{filter_for_role, BookingFilter, FilteredBookings};

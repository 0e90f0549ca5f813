//! API handlers for Fleetride REST endpoints

pub mod bookings;
pub mod health;
pub mod openapi;
pub mod stats;
pub mod vehicles;

use validator::Validate;

use crate::error::{AppError, AppResult};

/// Run declarative DTO validation and surface failures as a validation
/// error with the field messages
pub(crate) fn validate_payload<T: Validate>(payload: &T) -> AppResult<()> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))
}

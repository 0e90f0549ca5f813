//! Fleetride Booking & Fare Server
//!
//! The authoritative backend for a car-rental marketplace's booking
//! lifecycle and fare computation, exposing a REST JSON API consumed by
//! the admin, customer, driver and car-owner dashboards.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

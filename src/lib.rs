//! Campus Booking Server
//!
//! A REST JSON API for a campus equipment-booking service: students and
//! faculty browse the equipment catalog and submit booking requests,
//! administrators work the pending queue and approve or reject them.

use std::sync::Arc;

pub mod api;
pub mod config;
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

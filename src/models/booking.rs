//! Booking model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::enums::{BookingStatus, Priority, UserRole};

/// Booking model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: i32,
    pub user_id: i32,
    pub equipment_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub purpose: String,
    pub notes: Option<String>,
    pub admin_notes: Option<String>,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Booking with joined user/equipment display fields
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingDetails {
    pub id: i32,
    pub user_id: i32,
    pub equipment_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub purpose: String,
    pub notes: Option<String>,
    pub admin_notes: Option<String>,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_role: Option<UserRole>,
    pub equipment_name: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

/// Create booking request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBooking {
    pub equipment_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub purpose: String,
    pub notes: Option<String>,
    /// Free-form; unknown values fall back to "medium"
    pub priority: Option<String>,
}

/// Admin status transition request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookingStatus {
    /// Target status; must be APPROVED, REJECTED or CANCELLED
    pub status: BookingStatus,
    pub admin_notes: Option<String>,
}

/// Booking listing filters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookingQuery {
    /// Single status filter
    pub status: Option<BookingStatus>,
}

/// Half-open interval intersection test over `[start, end)` ranges.
///
/// Adjoining bookings share an endpoint (`end_a == start_b`) and do not
/// overlap.
pub fn overlaps(
    start_a: DateTime<Utc>,
    end_a: DateTime<Utc>,
    start_b: DateTime<Utc>,
    end_b: DateTime<Utc>,
) -> bool {
    start_a < end_b && end_a > start_b
}

//! Equipment catalog model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    /// Number of units held by the campus
    pub quantity: i32,
    pub image_url: Option<String>,
    /// Unavailable equipment cannot be booked
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create equipment request (admin only)
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEquipment {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub image_url: Option<String>,
}

/// Update equipment request; absent fields retain their previous value
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEquipment {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

/// Dedicated availability toggle (admin only)
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetAvailability {
    pub is_available: bool,
}

/// Equipment listing filters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EquipmentQuery {
    /// Exact category filter
    pub category: Option<String>,
    /// Case-insensitive substring match over name and description
    pub search: Option<String>,
}

//! Audit log model and detail payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::BookingStatus;

/// Internal row structure for audit listing queries (entry joined with actor)
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogRow {
    id: i32,
    user_id: i32,
    action: String,
    details: Option<String>,
    timestamp: DateTime<Utc>,
    user_name: Option<String>,
    user_email: Option<String>,
}

impl From<AuditLogRow> for AuditLogDetails {
    fn from(row: AuditLogRow) -> Self {
        AuditLogDetails {
            id: row.id,
            user_id: row.user_id,
            action: row.action,
            details: row.details,
            timestamp: row.timestamp,
            user_name: row.user_name.unwrap_or_else(|| "Unknown".to_string()),
            user_email: row.user_email.unwrap_or_default(),
            // Filled in from the details payload by the audit service
            equipment_name: "Unknown Equipment".to_string(),
            admin_notes: None,
        }
    }
}

/// Audit log entry joined with actor display fields, with equipment name and
/// admin notes lifted out of the details payload. Entries are append-only
/// and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLogDetails {
    pub id: i32,
    /// Acting user
    pub user_id: i32,
    pub action: String,
    /// Serialized JSON payload describing the event
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub user_name: String,
    pub user_email: String,
    pub equipment_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
}

/// Details payload recorded when a booking request is created
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingCreatedDetails {
    pub booking_id: i32,
    pub equipment_id: i32,
    pub equipment_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub purpose: String,
}

/// Details payload recorded when an admin transitions a booking's status
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingStatusChangeDetails {
    pub booking_id: i32,
    pub equipment_id: i32,
    pub equipment_name: String,
    pub user_id: i32,
    pub user_name: String,
    pub previous_status: BookingStatus,
    pub new_status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
}

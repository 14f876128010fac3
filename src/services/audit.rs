//! Audit log service

use serde::Serialize;

use crate::{
    error::AppResult,
    models::{audit::AuditLogDetails, enums::AuditAction},
    repository::Repository,
};

const DEFAULT_PAGE_SIZE: i64 = 100;
const MAX_PAGE_SIZE: i64 = 500;

#[derive(Clone)]
pub struct AuditService {
    repository: Repository,
}

impl AuditService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Record a booking lifecycle event. Best-effort: a failed write is
    /// logged and swallowed so it never fails the primary operation.
    pub async fn record<T: Serialize>(&self, user_id: i32, action: AuditAction, details: &T) {
        let payload = match serde_json::to_string(details) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("Failed to serialize audit details for {}: {}", action, e);
                return;
            }
        };

        if let Err(e) = self
            .repository
            .audit
            .append(user_id, action.as_str(), &payload)
            .await
        {
            tracing::warn!("Failed to write audit entry {}: {}", action, e);
        }
    }

    /// Windowed listing, newest first, with equipment name and admin notes
    /// lifted out of each entry's details payload for display.
    pub async fn list(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> AppResult<(Vec<AuditLogDetails>, i64)> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = offset.unwrap_or(0).max(0);

        let mut entries = self.repository.audit.list(limit, offset).await?;
        for entry in &mut entries {
            lift_display_fields(entry);
        }

        let total = self.repository.audit.count().await?;
        Ok((entries, total))
    }
}

/// Pull display fields out of the serialized details payload. The payload is
/// authoritative for names captured at event time; the actor join only
/// covers entries whose user row still exists.
fn lift_display_fields(entry: &mut AuditLogDetails) {
    let Some(details) = entry.details.as_deref() else {
        return;
    };
    let Ok(parsed) = serde_json::from_str::<serde_json::Value>(details) else {
        return;
    };

    if let Some(name) = parsed.get("equipment_name").and_then(|v| v.as_str()) {
        entry.equipment_name = name.to_string();
    }
    if let Some(notes) = parsed.get("admin_notes").and_then(|v| v.as_str()) {
        entry.admin_notes = Some(notes.to_string());
    }
    if entry.user_name == "Unknown" {
        if let Some(name) = parsed.get("user_name").and_then(|v| v.as_str()) {
            entry.user_name = name.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry_with_details(details: &str) -> AuditLogDetails {
        AuditLogDetails {
            id: 1,
            user_id: 7,
            action: "BOOKING_REJECTED".to_string(),
            details: Some(details.to_string()),
            timestamp: Utc::now(),
            user_name: "Unknown".to_string(),
            user_email: String::new(),
            equipment_name: "Unknown Equipment".to_string(),
            admin_notes: None,
        }
    }

    #[test]
    fn lifts_equipment_name_and_admin_notes() {
        let mut entry = entry_with_details(
            r#"{"equipment_name":"Oscilloscope","admin_notes":"schedule conflict","user_name":"Ada"}"#,
        );
        lift_display_fields(&mut entry);
        assert_eq!(entry.equipment_name, "Oscilloscope");
        assert_eq!(entry.admin_notes.as_deref(), Some("schedule conflict"));
        assert_eq!(entry.user_name, "Ada");
    }

    #[test]
    fn tolerates_unparseable_details() {
        let mut entry = entry_with_details("not json");
        lift_display_fields(&mut entry);
        assert_eq!(entry.equipment_name, "Unknown Equipment");
        assert_eq!(entry.admin_notes, None);
    }

    #[test]
    fn join_result_wins_over_payload_actor_name() {
        let mut entry = entry_with_details(r#"{"user_name":"Stale Name"}"#);
        entry.user_name = "Current Name".to_string();
        lift_display_fields(&mut entry);
        assert_eq!(entry.user_name, "Current Name");
    }
}

//! Audit log endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{error::AppResult, models::audit::AuditLogDetails};

use super::AuthenticatedUser;

/// Audit log window parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AuditLogQuery {
    /// Page size, default 100
    pub limit: Option<i64>,
    /// Entries to skip
    pub offset: Option<i64>,
}

/// Audit log listing with total entry count
#[derive(Serialize, ToSchema)]
pub struct AuditLogResponse {
    pub logs: Vec<AuditLogDetails>,
    pub total: i64,
}

/// List audit log entries, newest first
#[utoipa::path(
    get,
    path = "/audit-log",
    tag = "audit",
    security(("bearer_auth" = [])),
    params(AuditLogQuery),
    responses(
        (status = 200, description = "Audit log window", body = AuditLogResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn list_audit_log(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<AuditLogQuery>,
) -> AppResult<Json<AuditLogResponse>> {
    claims.require_admin()?;

    let (logs, total) = state.services.audit.list(query.limit, query.offset).await?;
    Ok(Json(AuditLogResponse { logs, total }))
}

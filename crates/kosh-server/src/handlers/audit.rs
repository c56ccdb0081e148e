//! Audit log handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, MAX_PAGE_LIMIT};
use kosh_core::{AuditEntry, AuthContext};

/// Query parameters for audit log
#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    #[serde(default = "default_audit_limit")]
    pub limit: i64,
}

fn default_audit_limit() -> i64 {
    100
}

/// GET /api/audit - The caller's own audit entries, newest first
pub async fn list_audit_log(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthContext>,
    Query(params): Query<AuditQuery>,
) -> Result<Json<Vec<AuditEntry>>, AppError> {
    let limit = params.limit.clamp(1, MAX_PAGE_LIMIT);
    let entries = state.db.list_audit_log(&user.username, limit)?;
    Ok(Json(entries))
}

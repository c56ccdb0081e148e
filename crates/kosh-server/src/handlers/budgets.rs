//! Budget handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{resolve_month, AppError, AppState};
use kosh_core::models::{Budget, Category};
use kosh_core::AuthContext;

/// `?month=YYYY-MM`, defaulting to the current month
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

/// GET /api/budgets - Budgets for a month
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthContext>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<Vec<Budget>>, AppError> {
    let month = resolve_month(params.month.as_deref())?;
    Ok(Json(state.db.get_budgets(&user.username, month)?))
}

/// Request body for setting a budget
#[derive(Debug, Deserialize)]
pub struct SetBudgetRequest {
    pub category: String,
    pub limit: f64,
    pub month: Option<String>,
}

/// PUT /api/budgets - Create or overwrite the limit for a category and month
pub async fn set_budget(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthContext>,
    Json(req): Json<SetBudgetRequest>,
) -> Result<Json<Budget>, AppError> {
    let category: Category = req
        .category
        .parse()
        .map_err(|e: String| AppError::bad_request(&e))?;
    let month = resolve_month(req.month.as_deref())?;

    let id = state
        .db
        .set_budget(&user.username, category, req.limit, month)?;

    state.db.log_audit(
        &user.username,
        "set",
        Some("budget"),
        Some(id),
        Some(&format!("{} {} {}", category, month, req.limit)),
    )?;

    let budget = state
        .db
        .get_budget(&user.username, category, month)?
        .ok_or_else(|| kosh_core::Error::NotFound("Budget not found".to_string()))?;

    Ok(Json(budget))
}

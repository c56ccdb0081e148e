//! Dashboard and chart data handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use super::budgets::MonthQuery;
use crate::{resolve_month, AppError, AppState, MAX_PAGE_LIMIT};
use kosh_core::charts::{budget_health, BudgetHealth, CategoryShare, TrendPoint};
use kosh_core::{AuthContext, Dashboard};

/// Query parameters for the dashboard
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub month: Option<String>,
    /// How many recent transactions to include
    #[serde(default = "default_recent")]
    pub recent: i64,
}

fn default_recent() -> i64 {
    5
}

/// GET /api/dashboard - Totals, suggestions and chart data
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthContext>,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<Dashboard>, AppError> {
    let month = resolve_month(params.month.as_deref())?;
    let recent = params.recent.clamp(1, MAX_PAGE_LIMIT);
    Ok(Json(state.db.dashboard(&user.username, month, recent)?))
}

/// GET /api/charts/trend - Income and expense per month
pub async fn chart_trend(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthContext>,
) -> Result<Json<Vec<TrendPoint>>, AppError> {
    Ok(Json(state.db.monthly_trend(&user.username)?))
}

/// GET /api/charts/breakdown - Expense share per category
pub async fn chart_breakdown(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthContext>,
) -> Result<Json<Vec<CategoryShare>>, AppError> {
    Ok(Json(state.db.expense_breakdown(&user.username)?))
}

/// GET /api/charts/budget - Spent vs limit for a month's budgets
pub async fn chart_budget(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthContext>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<Vec<BudgetHealth>>, AppError> {
    let month = resolve_month(params.month.as_deref())?;
    let budgets = state.db.get_budgets(&user.username, month)?;
    let transactions = state.db.get_user_transactions(&user.username)?;
    Ok(Json(budget_health(&budgets, &transactions)))
}

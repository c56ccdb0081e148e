//! Suggestion handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use super::budgets::MonthQuery;
use crate::{resolve_month, AppError, AppState};
use kosh_core::insights::{generate_suggestions, Advisory};
use kosh_core::AuthContext;

/// GET /api/suggestions - Advisories for all transactions against a month's budgets
pub async fn get_suggestions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthContext>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<Vec<Advisory>>, AppError> {
    let month = resolve_month(params.month.as_deref())?;

    let transactions = state.db.get_user_transactions(&user.username)?;
    let budgets = state.db.get_budgets(&user.username, month)?;

    Ok(Json(generate_suggestions(&transactions, &budgets)))
}

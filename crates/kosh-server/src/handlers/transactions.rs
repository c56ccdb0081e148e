//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState, SuccessResponse, MAX_PAGE_LIMIT};
use kosh_core::models::{Category, NewTransaction, Transaction, TransactionKind};
use kosh_core::AuthContext;

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

#[derive(Serialize)]
pub struct TransactionResponse {
    /// Most recent first
    pub transactions: Vec<Transaction>,
    pub total: i64,
    pub limit: i64,
}

/// GET /api/transactions - Recent transactions
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthContext>,
    Query(params): Query<TransactionQuery>,
) -> Result<Json<TransactionResponse>, AppError> {
    // Input validation: clamp pagination parameters
    let limit = params.limit.clamp(1, MAX_PAGE_LIMIT);

    let transactions = state.db.list_recent_transactions(&user.username, limit)?;
    let total = state.db.count_transactions(&user.username)?;

    Ok(Json(TransactionResponse {
        transactions,
        total,
        limit,
    }))
}

/// Request body for adding a transaction
///
/// Category and type are free text here and parsed case-insensitively.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    #[serde(alias = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
}

impl CreateTransactionRequest {
    fn into_new_transaction(self) -> Result<NewTransaction, AppError> {
        let category: Category = self
            .category
            .parse()
            .map_err(|e: String| AppError::bad_request(&e))?;
        let kind: TransactionKind = self
            .kind
            .parse()
            .map_err(|e: String| AppError::bad_request(&e))?;
        Ok(NewTransaction {
            date: self.date,
            amount: self.amount,
            category,
            kind,
            description: self.description.trim().to_string(),
        })
    }
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// POST /api/transactions - Add a transaction
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthContext>,
    Json(req): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let tx = req.into_new_transaction()?;
    let id = state.db.add_transaction(&user.username, &tx)?;

    state.db.log_audit(
        &user.username,
        "create",
        Some("transaction"),
        Some(id),
        Some(&format!("{} {} {}", tx.kind, tx.category, tx.amount)),
    )?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// GET /api/transactions/:id - One of the caller's transactions
///
/// Another user's id is indistinguishable from a missing one.
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Json<Transaction>, AppError> {
    let tx = state
        .db
        .get_transaction(&user.username, id)?
        .ok_or_else(|| kosh_core::Error::NotFound("Transaction not found".to_string()))?;

    Ok(Json(tx))
}

/// DELETE /api/transactions/:id - Delete one of the caller's transactions
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    if !state.db.delete_transaction(&user.username, id)? {
        return Err(AppError::not_found("Transaction not found"));
    }

    state
        .db
        .log_audit(&user.username, "delete", Some("transaction"), Some(id), None)?;

    Ok(Json(SuccessResponse { success: true }))
}

//! Export handlers: transactions as CSV/JSON, PDF report

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, Response, StatusCode},
    Extension,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::{AppError, AppState};
use kosh_core::{render_report, AuthContext, ExportFormat, TransactionExportOptions};

/// Query parameters for transaction export
#[derive(Debug, Deserialize)]
pub struct TransactionExportQuery {
    /// Output format (default: csv)
    #[serde(default = "default_format")]
    pub format: String,
    /// Start date (YYYY-MM-DD)
    pub from: Option<String>,
    /// End date (YYYY-MM-DD)
    pub to: Option<String>,
}

fn default_format() -> String {
    "csv".to_string()
}

fn attachment(content_type: &str, filename: &str, body: Vec<u8>) -> Result<Response<Body>, AppError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from(body))
        .map_err(|e| AppError::internal(&e.to_string()))
}

/// GET /api/export/transactions - Export transactions to CSV or JSON
pub async fn export_transactions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthContext>,
    Query(params): Query<TransactionExportQuery>,
) -> Result<Response<Body>, AppError> {
    let format: ExportFormat = params
        .format
        .parse()
        .map_err(|_| AppError::bad_request("Invalid format. Use 'csv' or 'json'"))?;

    // Parse date options
    let from = params
        .from
        .map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d"))
        .transpose()
        .map_err(|_| AppError::bad_request("Invalid 'from' date format (use YYYY-MM-DD)"))?;

    let to = params
        .to
        .map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d"))
        .transpose()
        .map_err(|_| AppError::bad_request("Invalid 'to' date format (use YYYY-MM-DD)"))?;

    let opts = TransactionExportOptions { from, to };
    let body = state.db.export_transactions(&user.username, format, &opts)?;

    // Audit log
    state.db.log_audit(
        &user.username,
        "export_transactions",
        Some("transaction"),
        None,
        Some(&format!("format={}, from={:?}, to={:?}", format, from, to)),
    )?;

    attachment(
        format.content_type(),
        &format!("transactions.{}", format),
        body.into_bytes(),
    )
}

/// GET /api/export/report - Download the PDF financial report
pub async fn export_report(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthContext>,
) -> Result<Response<Body>, AppError> {
    let transactions = state.db.get_user_transactions(&user.username)?;
    let pdf = render_report(&transactions, &user.display_name);
    info!(user = %user.username, bytes = pdf.len(), "Rendered PDF report");

    state.db.log_audit(
        &user.username,
        "export_report",
        Some("report"),
        None,
        Some(&format!("transactions={}", transactions.len())),
    )?;

    attachment(
        "application/pdf",
        &format!("{}_report.pdf", user.username),
        pdf,
    )
}

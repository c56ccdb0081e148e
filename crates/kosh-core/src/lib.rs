//! Kosh Core Library
//!
//! Shared functionality for the Kosh personal finance tracker:
//! - Database access and migrations (users, transactions, budgets, sessions)
//! - Registration, login and password hashing
//! - Rule-based suggestion engine
//! - Chart data series and the dashboard summary
//! - CSV/JSON export and the PDF report
//! - Configuration file handling

pub mod auth;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod export;
pub mod insights;
pub mod models;
pub mod report;

pub use auth::AuthContext;
pub use config::Config;
pub use dashboard::Dashboard;
pub use db::{AuditEntry, Database};
pub use error::{Error, Result};
pub use export::{ExportFormat, TransactionExportOptions};
pub use insights::{generate_suggestions, Advisory, SuggestionPolicy};
pub use report::render_report;

//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `account` - Registration and whoami
//! - `budgets` - Budget set/list
//! - `core` - Init and shared utilities (open_db, authenticate, parse_month)
//! - `dashboard` - Dashboard and suggestions
//! - `export` - CSV/JSON export and the PDF report
//! - `serve` - Web server command
//! - `transactions` - Transaction commands (add, list, delete)

pub mod account;
pub mod budgets;
pub mod core;
pub mod dashboard;
pub mod export;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use account::*;
pub use budgets::*;
pub use core::*;
pub use dashboard::*;
pub use export::*;
pub use serve::*;
pub use transactions::*;

/// Truncate a string to at most `max` characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Rupee amount with thousands separators
pub fn money(amount: f64) -> String {
    format!("₹{}", kosh_core::models::format_amount(amount))
}

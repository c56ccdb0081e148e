//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod audit;
pub mod auth;
pub mod budgets;
pub mod dashboard;
pub mod export;
pub mod suggestions;
pub mod transactions;

// Re-export all handlers for use in router
pub use audit::*;
pub use auth::*;
pub use budgets::*;
pub use dashboard::*;
pub use export::*;
pub use suggestions::*;
pub use transactions::*;

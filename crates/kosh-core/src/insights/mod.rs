//! Suggestion Engine - rule-based spending advice
//!
//! Looks at a user's transactions and budgets and produces an ordered list
//! of advisories. Rules are fixed thresholds; there is no hidden state and
//! no randomness, so the same input always gives the same output.
//!
//! ## Rules (in output order)
//!
//! - **Savings Rate** - low vs healthy savings rate
//! - **Budget Limits** - breaches and near-limit warnings per budget
//! - **Top Spending** - largest expense category with a suggested cut
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kosh_core::insights::generate_suggestions;
//!
//! let advisories = generate_suggestions(&transactions, &budgets);
//! for advisory in &advisories {
//!     println!("{}", advisory);
//! }
//! ```

pub mod budget_limits;
pub mod engine;
pub mod savings_rate;
pub mod top_spending;
pub mod totals;
pub mod types;

pub use budget_limits::BudgetLimitRule;
pub use engine::{generate_suggestions, messages, AnalysisContext, Rule, SuggestionEngine};
pub use savings_rate::SavingsRateRule;
pub use top_spending::TopSpendingRule;
pub use totals::{expense_totals, top_category, Totals};
pub use types::{
    Advisory, AdvisoryKind, Severity, SuggestionPolicy, LOW_SAVINGS_RATE_PCT,
    NEAR_LIMIT_FRACTION, SUGGESTED_REDUCTION_FRACTION,
};

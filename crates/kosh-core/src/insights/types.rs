//! Core types for the suggestion engine

use serde::Serialize;
use std::fmt;

use crate::models::Category;

/// Savings rate (percent) below which savings are considered too low
pub const LOW_SAVINGS_RATE_PCT: f64 = 20.0;

/// Spending above this fraction of a limit triggers a near-limit warning
pub const NEAR_LIMIT_FRACTION: f64 = 0.9;

/// How much of the top category's spend the insight suggests cutting
pub const SUGGESTED_REDUCTION_FRACTION: f64 = 0.1;

/// Thresholds used by the rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestionPolicy {
    pub low_savings_rate_pct: f64,
    pub near_limit_fraction: f64,
    pub suggested_reduction_fraction: f64,
}

impl Default for SuggestionPolicy {
    fn default() -> Self {
        Self {
            low_savings_rate_pct: LOW_SAVINGS_RATE_PCT,
            near_limit_fraction: NEAR_LIMIT_FRACTION,
            suggested_reduction_fraction: SUGGESTED_REDUCTION_FRACTION,
        }
    }
}

/// What an advisory is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    LowSavings,
    HealthySavings,
    BudgetBreach,
    NearLimit,
    TopCategory,
}

impl AdvisoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LowSavings => "low_savings",
            Self::HealthySavings => "healthy_savings",
            Self::BudgetBreach => "budget_breach",
            Self::NearLimit => "near_limit",
            Self::TopCategory => "top_category",
        }
    }
}

impl fmt::Display for AdvisoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity level of an advisory
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational, no action needed
    Info,
    /// Worth attention but not urgent
    Warning,
    /// A limit has already been crossed
    Alert,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Alert => "alert",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One suggestion shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub severity: Severity,
    /// Category the advisory refers to, if any
    pub category: Option<Category>,
    /// The headline figure: savings rate for savings advisories, overage for
    /// a breach, amount spent for a near-limit warning, potential savings
    /// for the top category
    pub amount: f64,
    pub message: String,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

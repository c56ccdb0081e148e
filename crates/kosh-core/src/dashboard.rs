//! Dashboard summary shared by the CLI and the HTTP API

use serde::Serialize;

use crate::charts::{budget_health, BudgetHealth, CategoryShare, TrendPoint};
use crate::db::Database;
use crate::error::Result;
use crate::insights::{generate_suggestions, Advisory, Totals};
use crate::models::{Budget, BudgetMonth, Transaction};

/// Everything the dashboard shows for one user and month
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub month: BudgetMonth,
    pub totals: Totals,
    pub savings_rate: f64,
    /// `healthy` or `critical`
    pub balance_status: &'static str,
    pub recent: Vec<Transaction>,
    pub suggestions: Vec<Advisory>,
    pub budgets: Vec<Budget>,
    pub budget_health: Vec<BudgetHealth>,
    pub trend: Vec<TrendPoint>,
    pub breakdown: Vec<CategoryShare>,
}

impl Database {
    /// Build the dashboard for `username`, checking budgets of `month`
    pub fn dashboard(&self, username: &str, month: BudgetMonth, recent: i64) -> Result<Dashboard> {
        let transactions = self.get_user_transactions(username)?;
        let budgets = self.get_budgets(username, month)?;
        let totals = Totals::from_transactions(&transactions);

        Ok(Dashboard {
            month,
            totals,
            savings_rate: totals.savings_rate(),
            balance_status: totals.balance_status(),
            recent: self.list_recent_transactions(username, recent)?,
            suggestions: generate_suggestions(&transactions, &budgets),
            budget_health: budget_health(&budgets, &transactions),
            budgets,
            trend: self.monthly_trend(username)?,
            breakdown: self.expense_breakdown(username)?,
        })
    }
}

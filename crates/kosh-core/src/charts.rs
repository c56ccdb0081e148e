//! Chart data series for the dashboard
//!
//! Only the numbers behind each chart are produced here; drawing them is up
//! to whichever client consumes the API.

use serde::Serialize;

use crate::insights::expense_totals;
use crate::models::{Budget, Category, Transaction, TransactionKind};

/// Usage above this fraction of the limit is flagged as `caution`
pub const CAUTION_USAGE: f64 = 0.8;

/// Income or expense total for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// `YYYY-MM`
    pub month: String,
    pub kind: TransactionKind,
    pub total: f64,
}

/// One slice of the expense breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub total: f64,
    /// Percentage of all expenses (0-100)
    pub share: f64,
}

/// Traffic-light status of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Under,
    Caution,
    Over,
}

impl BudgetStatus {
    pub fn from_usage(usage: f64) -> Self {
        if usage > 1.0 {
            Self::Over
        } else if usage > CAUTION_USAGE {
            Self::Caution
        } else {
            Self::Under
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Under => "under",
            Self::Caution => "caution",
            Self::Over => "over",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spent vs limit for one budget row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetHealth {
    pub category: Category,
    pub limit: f64,
    pub spent: f64,
    /// spent / limit, or 0 when the limit is 0
    pub usage: f64,
    pub status: BudgetStatus,
}

/// Compare each budget against total expenses in its category
///
/// Rows come back in budget order; a category with no expenses has spent 0.
pub fn budget_health(budgets: &[Budget], transactions: &[Transaction]) -> Vec<BudgetHealth> {
    let spent_by_category = expense_totals(transactions);

    budgets
        .iter()
        .map(|budget| {
            let spent = spent_by_category
                .iter()
                .find(|(category, _)| *category == budget.category)
                .map(|(_, total)| *total)
                .unwrap_or(0.0);
            let usage = if budget.limit_amount > 0.0 {
                spent / budget.limit_amount
            } else {
                0.0
            };
            BudgetHealth {
                category: budget.category,
                limit: budget.limit_amount,
                spent,
                usage,
                status: BudgetStatus::from_usage(usage),
            }
        })
        .collect()
}

/// Turn per-category totals into shares of their sum
pub fn category_shares(totals: Vec<(Category, f64)>) -> Vec<CategoryShare> {
    let sum: f64 = totals.iter().map(|(_, total)| total).sum();
    totals
        .into_iter()
        .map(|(category, total)| CategoryShare {
            category,
            total,
            share: if sum > 0.0 { total / sum * 100.0 } else { 0.0 },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BudgetMonth;
    use chrono::NaiveDate;

    fn expense(id: i64, category: Category, amount: f64) -> Transaction {
        Transaction {
            id,
            username: "asha".into(),
            date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            amount,
            category,
            kind: TransactionKind::Expense,
            description: String::new(),
        }
    }

    fn budget(id: i64, category: Category, limit: f64) -> Budget {
        Budget {
            id,
            username: "asha".into(),
            category,
            limit_amount: limit,
            month: BudgetMonth::new(2024, 6).unwrap(),
        }
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(BudgetStatus::from_usage(0.0), BudgetStatus::Under);
        assert_eq!(BudgetStatus::from_usage(0.79), BudgetStatus::Under);
        assert_eq!(BudgetStatus::from_usage(0.8), BudgetStatus::Under);
        assert_eq!(BudgetStatus::from_usage(0.81), BudgetStatus::Caution);
        assert_eq!(BudgetStatus::from_usage(1.0), BudgetStatus::Caution);
        assert_eq!(BudgetStatus::from_usage(1.5), BudgetStatus::Over);
    }

    #[test]
    fn test_budget_health_rows_follow_budget_order() {
        let txs = vec![
            expense(1, Category::Food, 2000.0),
            expense(2, Category::Entertainment, 3000.0),
            expense(3, Category::Food, 500.0),
        ];
        let budgets = vec![
            budget(1, Category::Entertainment, 2000.0),
            budget(2, Category::Food, 2700.0),
            budget(3, Category::Transport, 5000.0),
            budget(4, Category::Rent, 0.0),
        ];

        let health = budget_health(&budgets, &txs);
        assert_eq!(health.len(), 4);

        assert_eq!(health[0].category, Category::Entertainment);
        assert_eq!(health[0].spent, 3000.0);
        assert_eq!(health[0].status, BudgetStatus::Over);

        assert_eq!(health[1].spent, 2500.0);
        assert_eq!(health[1].status, BudgetStatus::Caution);

        assert_eq!(health[2].spent, 0.0);
        assert_eq!(health[2].status, BudgetStatus::Under);

        assert_eq!(health[3].usage, 0.0);
        assert_eq!(health[3].status, BudgetStatus::Under);
    }

    #[test]
    fn test_exactly_eighty_percent_spent_is_under() {
        let txs = vec![expense(1, Category::Food, 800.0)];
        let budgets = vec![budget(1, Category::Food, 1000.0)];

        let health = budget_health(&budgets, &txs);
        assert_eq!(health[0].usage, 0.8);
        assert_eq!(health[0].status, BudgetStatus::Under);
    }

    #[test]
    fn test_category_shares() {
        let shares = category_shares(vec![(Category::Rent, 750.0), (Category::Food, 250.0)]);
        assert_eq!(shares[0].share, 75.0);
        assert_eq!(shares[1].share, 25.0);

        assert!(category_shares(Vec::new()).is_empty());
        let zero = category_shares(vec![(Category::Food, 0.0)]);
        assert_eq!(zero[0].share, 0.0);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&BudgetStatus::Caution).unwrap();
        assert_eq!(json, "\"caution\"");
    }
}

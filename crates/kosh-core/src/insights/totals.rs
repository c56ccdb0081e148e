//! Totals and per-category sums over a transaction set

use serde::Serialize;

use crate::models::{Category, Transaction, TransactionKind};

/// Income, expense and balance over a set of transactions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

impl Totals {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let (income, expense) =
            transactions
                .iter()
                .fold((0.0, 0.0), |(income, expense), tx| match tx.kind {
                    TransactionKind::Income => (income + tx.amount, expense),
                    TransactionKind::Expense => (income, expense + tx.amount),
                });
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }

    /// Share of income kept, as a percentage; 0 when there is no income
    pub fn savings_rate(&self) -> f64 {
        if self.income > 0.0 {
            self.balance / self.income * 100.0
        } else {
            0.0
        }
    }

    /// `healthy` while the balance is positive, `critical` otherwise
    pub fn balance_status(&self) -> &'static str {
        if self.balance > 0.0 {
            "healthy"
        } else {
            "critical"
        }
    }
}

/// Sum expenses per category, in order of each category's first expense
pub fn expense_totals(transactions: &[Transaction]) -> Vec<(Category, f64)> {
    let mut totals: Vec<(Category, f64)> = Vec::new();
    for tx in transactions
        .iter()
        .filter(|tx| tx.kind == TransactionKind::Expense)
    {
        match totals.iter_mut().find(|(category, _)| *category == tx.category) {
            Some((_, total)) => *total += tx.amount,
            None => totals.push((tx.category, tx.amount)),
        }
    }
    totals
}

/// Category with the largest expense total
///
/// Among equal totals the category whose first expense came earliest wins.
/// `None` when there are no expenses.
pub fn top_category(transactions: &[Transaction]) -> Option<(Category, f64)> {
    expense_totals(transactions)
        .into_iter()
        .fold(None, |best, (category, total)| match best {
            Some((_, best_total)) if best_total >= total => best,
            _ => Some((category, total)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(category: Category, kind: TransactionKind, amount: f64) -> Transaction {
        Transaction {
            id: 0,
            username: "asha".into(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            amount,
            category,
            kind,
            description: String::new(),
        }
    }

    #[test]
    fn test_empty_totals_are_zero() {
        let totals = Totals::from_transactions(&[]);
        assert_eq!(totals, Totals::default());
        assert_eq!(totals.savings_rate(), 0.0);
        assert_eq!(totals.balance_status(), "critical");
    }

    #[test]
    fn test_no_income_means_zero_rate() {
        let totals =
            Totals::from_transactions(&[tx(Category::Food, TransactionKind::Expense, 300.0)]);
        assert_eq!(totals.balance, -300.0);
        assert_eq!(totals.savings_rate(), 0.0);
    }

    #[test]
    fn test_totals_and_rate() {
        let txs = vec![
            tx(Category::Salary, TransactionKind::Income, 1000.0),
            tx(Category::Food, TransactionKind::Expense, 250.0),
        ];
        let totals = Totals::from_transactions(&txs);
        assert_eq!(totals.income, 1000.0);
        assert_eq!(totals.expense, 250.0);
        assert_eq!(totals.balance, 750.0);
        assert_eq!(totals.savings_rate(), 75.0);
        assert_eq!(totals.balance_status(), "healthy");
    }

    #[test]
    fn test_expense_totals_ignore_income() {
        let txs = vec![
            tx(Category::Salary, TransactionKind::Income, 1000.0),
            tx(Category::Food, TransactionKind::Expense, 100.0),
            tx(Category::Rent, TransactionKind::Expense, 500.0),
            tx(Category::Food, TransactionKind::Expense, 50.0),
        ];
        assert_eq!(
            expense_totals(&txs),
            vec![(Category::Food, 150.0), (Category::Rent, 500.0)]
        );
    }

    #[test]
    fn test_top_category_tie_goes_to_first_seen() {
        let txs = vec![
            tx(Category::Transport, TransactionKind::Expense, 400.0),
            tx(Category::Food, TransactionKind::Expense, 400.0),
        ];
        assert_eq!(top_category(&txs), Some((Category::Transport, 400.0)));

        let income_only = vec![tx(Category::Salary, TransactionKind::Income, 10.0)];
        assert_eq!(top_category(&income_only), None);
    }
}

//! Sample data for newly registered users

use chrono::NaiveDate;
use rusqlite::params;
use tracing::info;

use super::Database;
use crate::error::Result;
use crate::models::{BudgetMonth, Category, TransactionKind};

/// (amount, category, kind, description) rows given to every new user
const SAMPLE_TRANSACTIONS: [(f64, Category, TransactionKind, &str); 6] = [
    (50000.0, Category::Salary, TransactionKind::Income, "Monthly Salary"),
    (5000.0, Category::Freelance, TransactionKind::Income, "Side Project"),
    (2000.0, Category::Food, TransactionKind::Expense, "Grocery"),
    (1500.0, Category::Transport, TransactionKind::Expense, "Fuel"),
    (5000.0, Category::Rent, TransactionKind::Expense, "House Rent"),
    (3000.0, Category::Entertainment, TransactionKind::Expense, "Weekend Party"),
];

const SAMPLE_BUDGETS: [(Category, f64); 4] = [
    (Category::Food, 10000.0),
    (Category::Transport, 5000.0),
    (Category::Entertainment, 2000.0),
    (Category::Rent, 6000.0),
];

impl Database {
    /// Give a user sample transactions dated `today` and budgets for its month
    ///
    /// Does nothing if the user already has transactions. Returns whether
    /// anything was inserted.
    pub fn seed_sample_data(&self, username: &str, today: NaiveDate) -> Result<bool> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let existing: i64 = tx.query_row(
            "SELECT COUNT(*) FROM transactions WHERE username = ?",
            params![username],
            |row| row.get(0),
        )?;
        if existing > 0 {
            return Ok(false);
        }

        let date = today.to_string();
        for (amount, category, kind, description) in SAMPLE_TRANSACTIONS {
            tx.execute(
                "INSERT INTO transactions (username, date, amount, category, kind, description)
                 VALUES (?, ?, ?, ?, ?, ?)",
                params![username, date, amount, category.as_str(), kind.as_str(), description],
            )?;
        }

        let month = BudgetMonth::containing(today).to_string();
        for (category, limit) in SAMPLE_BUDGETS {
            tx.execute(
                "INSERT INTO budgets (username, category, limit_amount, month) VALUES (?, ?, ?, ?)
                 ON CONFLICT(username, category, month) DO NOTHING",
                params![username, category.as_str(), limit, month],
            )?;
        }

        tx.commit()?;
        info!(username, %month, "Seeded sample data");
        Ok(true)
    }
}

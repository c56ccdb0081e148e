//! Budget operations

use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::transactions::parse_column;
use super::Database;
use crate::error::{Error, Result};
use crate::models::{validate_amount, Budget, BudgetMonth, Category};

fn row_to_budget(row: &Row<'_>) -> rusqlite::Result<Budget> {
    let category_str: String = row.get(2)?;
    let month_str: String = row.get(4)?;
    Ok(Budget {
        id: row.get(0)?,
        username: row.get(1)?,
        category: parse_column(2, &category_str)?,
        limit_amount: row.get(3)?,
        month: parse_column(4, &month_str)?,
    })
}

impl Database {
    /// Set a user's limit for a category in a month
    ///
    /// Overwrites the existing limit for (username, category, month) or inserts
    /// a new row. A single statement against the unique index, so the key can
    /// never end up duplicated. Returns the budget id.
    pub fn set_budget(
        &self,
        username: &str,
        category: Category,
        limit: f64,
        month: BudgetMonth,
    ) -> Result<i64> {
        if !category.is_budgetable() {
            return Err(Error::InvalidData(format!(
                "{} is an income category and cannot have a budget",
                category
            )));
        }
        validate_amount(limit, "limit")?;

        let conn = self.conn()?;
        let id: i64 = conn.query_row(
            r#"
            INSERT INTO budgets (username, category, limit_amount, month)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(username, category, month)
            DO UPDATE SET limit_amount = excluded.limit_amount
            RETURNING id
            "#,
            params![username, category.as_str(), limit, month.to_string()],
            |row| row.get(0),
        )?;

        debug!(username, %category, %month, limit, id, "Budget set");
        Ok(id)
    }

    /// A user's budgets for one month, in the order they were first set
    pub fn get_budgets(&self, username: &str, month: BudgetMonth) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, username, category, limit_amount, month FROM budgets
             WHERE username = ? AND month = ? ORDER BY id",
        )?;

        let budgets = stmt
            .query_map(params![username, month.to_string()], row_to_budget)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(budgets)
    }

    /// Get the budget row for a single key
    pub fn get_budget(
        &self,
        username: &str,
        category: Category,
        month: BudgetMonth,
    ) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                "SELECT id, username, category, limit_amount, month FROM budgets
                 WHERE username = ? AND category = ? AND month = ?",
                params![username, category.as_str(), month.to_string()],
                row_to_budget,
            )
            .optional()?;
        Ok(budget)
    }
}

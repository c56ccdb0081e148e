//! Aggregate queries behind the dashboard charts

use rusqlite::params;

use super::transactions::parse_column;
use super::Database;
use crate::charts::{category_shares, CategoryShare, TrendPoint};
use crate::error::Result;
use crate::models::TransactionKind;

impl Database {
    /// Income and expense totals per calendar month, oldest month first
    pub fn monthly_trend(&self, username: &str) -> Result<Vec<TrendPoint>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT strftime('%Y-%m', date) AS month, kind, SUM(amount)
            FROM transactions
            WHERE username = ?
            GROUP BY month, kind
            ORDER BY month, kind
            "#,
        )?;

        let points = stmt
            .query_map(params![username], |row| {
                let kind: String = row.get(1)?;
                Ok(TrendPoint {
                    month: row.get(0)?,
                    kind: parse_column::<TransactionKind>(1, &kind)?,
                    total: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(points)
    }

    /// Expense totals per category with their share of all expenses,
    /// largest first
    pub fn expense_breakdown(&self, username: &str) -> Result<Vec<CategoryShare>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT category, SUM(amount) AS total
            FROM transactions
            WHERE username = ? AND kind = 'Expense'
            GROUP BY category
            ORDER BY total DESC, category
            "#,
        )?;

        let totals = stmt
            .query_map(params![username], |row| {
                let category: String = row.get(0)?;
                Ok((parse_column(0, &category)?, row.get::<_, f64>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(category_shares(totals))
    }
}

//! Transaction operations

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::Database;
use crate::error::Result;
use crate::models::{NewTransaction, Transaction};

const TRANSACTION_COLUMNS: &str = "id, username, date, amount, category, kind, description";

/// Parse a text column through `FromStr`, surfacing failures as conversion errors
pub(crate) fn parse_column<T>(idx: usize, value: &str) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.to_string().into())
    })
}

fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let date_str: String = row.get(2)?;
    let category_str: String = row.get(4)?;
    let kind_str: String = row.get(5)?;

    Ok(Transaction {
        id: row.get(0)?,
        username: row.get(1)?,
        date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e))
        })?,
        amount: row.get(3)?,
        category: parse_column(4, &category_str)?,
        kind: parse_column(5, &kind_str)?,
        description: row.get(6)?,
    })
}

impl Database {
    /// Add a transaction for a user, returning its id
    pub fn add_transaction(&self, username: &str, tx: &NewTransaction) -> Result<i64> {
        tx.validate()?;
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO transactions (username, date, amount, category, kind, description)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                username,
                tx.date.to_string(),
                tx.amount,
                tx.category.as_str(),
                tx.kind.as_str(),
                tx.description,
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(username, id, kind = %tx.kind, "Transaction added");
        Ok(id)
    }

    /// All of a user's transactions, in insertion order
    pub fn get_user_transactions(&self, username: &str) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions WHERE username = ? ORDER BY id",
            TRANSACTION_COLUMNS
        ))?;

        let transactions = stmt
            .query_map(params![username], row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Most recent transactions first (by date, then by id)
    pub fn list_recent_transactions(&self, username: &str, limit: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions WHERE username = ? ORDER BY date DESC, id DESC LIMIT ?",
            TRANSACTION_COLUMNS
        ))?;

        let transactions = stmt
            .query_map(params![username, limit], row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Get one transaction, only if it belongs to `username`
    pub fn get_transaction(&self, username: &str, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let tx = conn
            .query_row(
                &format!(
                    "SELECT {} FROM transactions WHERE id = ? AND username = ?",
                    TRANSACTION_COLUMNS
                ),
                params![id, username],
                row_to_transaction,
            )
            .optional()?;
        Ok(tx)
    }

    /// Delete a transaction owned by `username`
    ///
    /// Returns `false` when no such transaction exists for this user; other
    /// users' rows are never touched.
    pub fn delete_transaction(&self, username: &str, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM transactions WHERE id = ? AND username = ?",
            params![id, username],
        )?;
        debug!(username, id, deleted, "Transaction delete");
        Ok(deleted == 1)
    }

    /// Number of transactions a user has
    pub fn count_transactions(&self, username: &str) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE username = ?",
            params![username],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

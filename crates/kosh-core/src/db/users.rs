//! User operations

use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::User;

/// What the auth layer needs to verify a login
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
}

impl Database {
    /// Insert a user unless the username is taken
    ///
    /// Returns `false` (and leaves the existing row untouched) when the
    /// username already exists.
    pub fn create_user(&self, username: &str, password_hash: &str, name: &str) -> Result<bool> {
        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT INTO users (username, password_hash, name) VALUES (?, ?, ?)
             ON CONFLICT(username) DO NOTHING",
            params![username, password_hash, name],
        )?;
        Ok(inserted == 1)
    }

    /// Get a user by username
    pub fn get_user(&self, username: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT username, name, created_at FROM users WHERE username = ?",
                params![username],
                |row| {
                    let created_at: String = row.get(2)?;
                    Ok(User {
                        username: row.get(0)?,
                        display_name: row.get(1)?,
                        created_at: parse_datetime(&created_at),
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    /// Fetch the stored password hash and display name for a username
    pub fn get_credentials(&self, username: &str) -> Result<Option<StoredCredentials>> {
        let conn = self.conn()?;
        let creds = conn
            .query_row(
                "SELECT username, password_hash, name FROM users WHERE username = ?",
                params![username],
                |row| {
                    Ok(StoredCredentials {
                        username: row.get(0)?,
                        password_hash: row.get(1)?,
                        display_name: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(creds)
    }
}

//! Login sessions
//!
//! Tokens are handed to the client once; the table only keeps their SHA-256
//! digest, so a leaked database doesn't leak usable sessions.

use chrono::{Duration, Utc};
use rand::RngCore;
use rusqlite::{params, OptionalExtension};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::Database;
use crate::auth::AuthContext;
use crate::error::Result;

const SQLITE_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

impl Database {
    /// Start a session for `username`, returning the bearer token
    pub fn create_session(&self, username: &str, ttl: Duration) -> Result<String> {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);

        let expires_at = (Utc::now() + ttl).format(SQLITE_DATETIME).to_string();
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO sessions (token_hash, username, expires_at) VALUES (?, ?, ?)",
            params![token_digest(&token), username, expires_at],
        )?;

        debug!(username, %expires_at, "Session created");
        Ok(token)
    }

    /// Look up the user behind a token, if the session is still live
    pub fn resolve_session(&self, token: &str) -> Result<Option<AuthContext>> {
        let now = Utc::now().format(SQLITE_DATETIME).to_string();
        let conn = self.conn()?;
        let ctx = conn
            .query_row(
                r#"
                SELECT u.username, u.name
                FROM sessions s
                JOIN users u ON u.username = s.username
                WHERE s.token_hash = ? AND s.expires_at > ?
                "#,
                params![token_digest(token), now],
                |row| {
                    Ok(AuthContext {
                        username: row.get(0)?,
                        display_name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(ctx)
    }

    /// End a session; returns whether it existed
    pub fn delete_session(&self, token: &str) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM sessions WHERE token_hash = ?",
            params![token_digest(token)],
        )?;
        Ok(deleted == 1)
    }

    /// Remove sessions past their expiry
    pub fn purge_expired_sessions(&self) -> Result<usize> {
        let now = Utc::now().format(SQLITE_DATETIME).to_string();
        let conn = self.conn()?;
        let purged = conn.execute("DELETE FROM sessions WHERE expires_at <= ?", params![now])?;
        if purged > 0 {
            debug!(purged, "Expired sessions removed");
        }
        Ok(purged)
    }
}

//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `authenticate` - Turn `--user`/`--password` into an `AuthContext`
//! - `parse_month` / `parse_date` - Argument parsing shared by commands
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use kosh_core::db::Database;
use kosh_core::models::BudgetMonth;
use kosh_core::{auth, AuthContext};

use crate::cli::Credentials;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Verify credentials for a user-scoped command
pub fn authenticate(db: &Database, creds: &Credentials) -> Result<AuthContext> {
    auth::login(db, &creds.user, &creds.password).context("Login failed")
}

/// `YYYY-MM`, or the current month when absent
pub fn parse_month(month: Option<&str>) -> Result<BudgetMonth> {
    match month {
        Some(m) => m.parse().context("Month must be YYYY-MM"),
        None => Ok(BudgetMonth::current()),
    }
}

pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", date))
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;
    let encrypted = db.is_encrypted().context("Failed to read database")?;

    if encrypted {
        println!("   🔒 Encryption: ENABLED");
    } else if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   ⚠️  Encryption: DISABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Create an account: kosh register -u <name> --name \"Your Name\"");
    println!("  2. See where you stand: kosh dashboard -u <name>");
    println!("  3. Start web API: kosh serve");

    Ok(())
}

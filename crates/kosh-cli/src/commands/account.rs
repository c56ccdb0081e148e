//! Account commands (register, whoami)

use anyhow::{bail, Result};
use kosh_core::db::Database;
use kosh_core::{auth, AuthContext};

pub fn cmd_register(db: &Database, username: &str, password: &str, name: &str) -> Result<()> {
    if !auth::register(db, username, password, name)? {
        tracing::warn!(username = username.trim(), "Registration rejected");
        bail!("Username '{}' already exists", username.trim());
    }

    println!("✅ Registered {}", username.trim());
    println!("   Sample transactions and budgets were added to get you started.");
    println!();
    println!("Next: kosh dashboard -u {}", username.trim());
    Ok(())
}

pub fn cmd_whoami(db: &Database, ctx: &AuthContext) -> Result<()> {
    let user = db.get_user(&ctx.username)?;
    let transactions = db.count_transactions(&ctx.username)?;

    println!();
    println!("👤 {} ({})", ctx.display_name, ctx.username);
    if let Some(user) = user {
        println!("   Member since: {}", user.created_at.format("%Y-%m-%d"));
    }
    println!("   Transactions: {}", transactions);
    Ok(())
}

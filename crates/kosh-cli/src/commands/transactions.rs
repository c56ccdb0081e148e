//! Transaction command implementations (add, list, delete)

use anyhow::{anyhow, bail, Result};
use kosh_core::db::Database;
use kosh_core::models::{Category, NewTransaction, TransactionKind};
use kosh_core::AuthContext;

use super::{money, parse_date, truncate};

pub fn cmd_add(
    db: &Database,
    ctx: &AuthContext,
    amount: f64,
    category: &str,
    kind: &str,
    date: Option<&str>,
    description: &str,
) -> Result<()> {
    let category: Category = category.parse().map_err(|e: String| anyhow!(e))?;
    let kind: TransactionKind = kind.parse().map_err(|e: String| anyhow!(e))?;
    let date = match date {
        Some(d) => parse_date(d)?,
        None => chrono::Local::now().date_naive(),
    };

    let tx = NewTransaction {
        date,
        amount,
        category,
        kind,
        description: description.to_string(),
    };
    let id = db.add_transaction(&ctx.username, &tx)?;
    tracing::debug!(user = %ctx.username, id, "Transaction added from CLI");

    println!(
        "✅ Added {} of {} ({}) on {} [id {}]",
        kind.as_str().to_lowercase(),
        money(amount),
        category,
        date,
        id
    );
    Ok(())
}

pub fn cmd_list(db: &Database, ctx: &AuthContext, limit: i64) -> Result<()> {
    let transactions = db.list_recent_transactions(&ctx.username, limit.max(1))?;

    if transactions.is_empty() {
        println!("No transactions found. Add one with:");
        println!("  kosh add -u {} -a 250 -c Food -t Expense", ctx.username);
        return Ok(());
    }

    let total = db.count_transactions(&ctx.username)?;

    println!();
    println!(
        "📝 Recent Transactions ({} of {})",
        transactions.len(),
        total
    );
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        let amount_str = match tx.kind {
            TransactionKind::Expense => format!("\x1b[31m-{}\x1b[0m", money(tx.amount)), // Red for expenses
            TransactionKind::Income => format!("\x1b[32m+{}\x1b[0m", money(tx.amount)), // Green for income
        };

        println!(
            "   {:>5} │ {} │ {:<13} │ {:>22} │ {}",
            tx.id,
            tx.date,
            tx.category.as_str(),
            amount_str,
            truncate(&tx.description, 30)
        );
    }

    Ok(())
}

pub fn cmd_delete(db: &Database, ctx: &AuthContext, id: i64) -> Result<()> {
    if !db.delete_transaction(&ctx.username, id)? {
        tracing::warn!(user = %ctx.username, id, "Delete of unknown or foreign transaction");
        bail!("Transaction {} not found", id);
    }
    tracing::info!(user = %ctx.username, id, "Transaction deleted");

    println!("🗑️  Deleted transaction {}", id);
    Ok(())
}

//! Budget commands (set, list)

use anyhow::{anyhow, Result};
use kosh_core::charts::{budget_health, BudgetStatus};
use kosh_core::db::Database;
use kosh_core::models::Category;
use kosh_core::AuthContext;

use super::{money, parse_month};

pub fn cmd_budget_set(
    db: &Database,
    ctx: &AuthContext,
    category: &str,
    limit: f64,
    month: Option<&str>,
) -> Result<()> {
    let category: Category = category.parse().map_err(|e: String| anyhow!(e))?;
    let month = parse_month(month)?;

    let id = db.set_budget(&ctx.username, category, limit, month)?;
    tracing::debug!(user = %ctx.username, id, "Budget saved");

    println!("✅ {} budget for {} set to {}", category, month, money(limit));
    Ok(())
}

pub fn cmd_budget_list(db: &Database, ctx: &AuthContext, month: Option<&str>) -> Result<()> {
    let month = parse_month(month)?;
    let budgets = db.get_budgets(&ctx.username, month)?;

    if budgets.is_empty() {
        println!("No budgets for {}. Set one with:", month);
        println!(
            "  kosh budget set -u {} -c Food -l 10000 -m {}",
            ctx.username, month
        );
        return Ok(());
    }

    let transactions = db.get_user_transactions(&ctx.username)?;

    println!();
    println!("🎯 Budgets for {}", month);
    println!("   ─────────────────────────────────────────────────────────────");

    for row in budget_health(&budgets, &transactions) {
        let icon = match row.status {
            BudgetStatus::Under => "🟢",
            BudgetStatus::Caution => "🟡",
            BudgetStatus::Over => "🔴",
        };
        println!(
            "   {} {:<13} {:>14} of {:>14}  ({:.0}%)",
            icon,
            row.category.as_str(),
            money(row.spent),
            money(row.limit),
            row.usage * 100.0
        );
    }

    Ok(())
}

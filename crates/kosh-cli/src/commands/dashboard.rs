//! Dashboard and suggestion commands

use anyhow::{Context, Result};
use kosh_core::db::Database;
use kosh_core::insights::{generate_suggestions, Advisory, Severity};
use kosh_core::AuthContext;

use super::{money, parse_month, truncate};

/// Recent transactions shown on the dashboard
const DASHBOARD_RECENT: i64 = 5;

fn severity_icon(advisory: &Advisory) -> &'static str {
    match advisory.severity {
        Severity::Info => "💡",
        Severity::Warning => "⚠️ ",
        Severity::Alert => "🚨",
    }
}

pub fn cmd_dashboard(
    db: &Database,
    ctx: &AuthContext,
    month: Option<&str>,
    json: bool,
) -> Result<()> {
    let month = parse_month(month)?;
    let dashboard = db.dashboard(&ctx.username, month, DASHBOARD_RECENT)?;

    if json {
        let out =
            serde_json::to_string_pretty(&dashboard).context("Failed to serialize dashboard")?;
        println!("{}", out);
        return Ok(());
    }

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│           💰 Kosh Dashboard             │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {} · budgets for {}", ctx.display_name, dashboard.month);
    println!();
    println!("  Income:          {}", money(dashboard.totals.income));
    println!("  Expenses:        {}", money(dashboard.totals.expense));
    println!(
        "  Balance:         {} ({})",
        money(dashboard.totals.balance),
        dashboard.balance_status
    );
    println!("  Savings rate:    {:.1}%", dashboard.savings_rate);

    if !dashboard.budget_health.is_empty() {
        println!();
        println!("  🎯 Budgets");
        for row in &dashboard.budget_health {
            println!(
                "     {:<13} {:>14} of {:>14}  [{}]",
                row.category.as_str(),
                money(row.spent),
                money(row.limit),
                row.status
            );
        }
    }

    if !dashboard.breakdown.is_empty() {
        println!();
        println!("  📊 Spending by category");
        for slice in &dashboard.breakdown {
            println!(
                "     {:<13} {:>14}  {:>5.1}%",
                slice.category.as_str(),
                money(slice.total),
                slice.share
            );
        }
    }

    if !dashboard.recent.is_empty() {
        println!();
        println!("  📝 Recent");
        for tx in &dashboard.recent {
            println!(
                "     {} {:<13} {:>14}  {}",
                tx.date,
                tx.category.as_str(),
                money(tx.amount),
                truncate(&tx.description, 24)
            );
        }
    }

    if !dashboard.suggestions.is_empty() {
        println!();
        println!("  Suggestions");
        for advisory in &dashboard.suggestions {
            println!("     {} {}", severity_icon(advisory), advisory);
        }
    }

    println!();
    Ok(())
}

pub fn cmd_suggest(db: &Database, ctx: &AuthContext, month: Option<&str>) -> Result<()> {
    let month = parse_month(month)?;
    let transactions = db.get_user_transactions(&ctx.username)?;
    let budgets = db.get_budgets(&ctx.username, month)?;

    let advisories = generate_suggestions(&transactions, &budgets);

    if advisories.is_empty() {
        println!("No suggestions yet. Record some income to get started.");
        return Ok(());
    }

    println!();
    println!("💬 Suggestions ({} budgets)", month);
    println!("   ─────────────────────────────────────────────────────────────");
    for advisory in &advisories {
        println!("   {} {}", severity_icon(advisory), advisory);
    }
    println!();

    Ok(())
}

//! Kosh CLI - Personal finance tracker
//!
//! Usage:
//!   kosh init                                   Initialize database
//!   kosh register -u NAME --name "Full Name"    Create an account
//!   kosh add -u NAME -a 250 -c Food -t Expense  Record a transaction
//!   kosh dashboard -u NAME                      Totals, budgets, suggestions
//!   kosh serve --port 3000                      Start web server
//!
//! User-scoped commands read the password from --password or KOSH_PASSWORD.

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use clap::Parser;
use kosh_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    // Priority: --db flag > KOSH_DB > config file > default
    let config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| config.database.path.clone());

    match cli.command {
        Commands::Init => commands::cmd_init(&db_path, cli.no_encrypt),
        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            commands::cmd_serve(&db_path, &config, &host, port, cli.no_encrypt).await
        }
        Commands::Register { creds, name } => {
            let db = commands::open_db(&db_path, cli.no_encrypt)?;
            commands::cmd_register(&db, &creds.user, &creds.password, &name)
        }
        Commands::Whoami { creds } => {
            let db = commands::open_db(&db_path, cli.no_encrypt)?;
            let ctx = commands::authenticate(&db, &creds)?;
            commands::cmd_whoami(&db, &ctx)
        }
        Commands::Dashboard { creds, month, json } => {
            let db = commands::open_db(&db_path, cli.no_encrypt)?;
            let ctx = commands::authenticate(&db, &creds)?;
            commands::cmd_dashboard(&db, &ctx, month.as_deref(), json)
        }
        Commands::Add {
            creds,
            amount,
            category,
            kind,
            date,
            description,
        } => {
            let db = commands::open_db(&db_path, cli.no_encrypt)?;
            let ctx = commands::authenticate(&db, &creds)?;
            commands::cmd_add(
                &db,
                &ctx,
                amount,
                &category,
                &kind,
                date.as_deref(),
                &description,
            )
        }
        Commands::List { creds, limit } => {
            let db = commands::open_db(&db_path, cli.no_encrypt)?;
            let ctx = commands::authenticate(&db, &creds)?;
            commands::cmd_list(&db, &ctx, limit)
        }
        Commands::Delete { creds, id } => {
            let db = commands::open_db(&db_path, cli.no_encrypt)?;
            let ctx = commands::authenticate(&db, &creds)?;
            commands::cmd_delete(&db, &ctx, id)
        }
        Commands::Budget { action } => match action {
            BudgetAction::Set {
                creds,
                category,
                limit,
                month,
            } => {
                let db = commands::open_db(&db_path, cli.no_encrypt)?;
                let ctx = commands::authenticate(&db, &creds)?;
                commands::cmd_budget_set(&db, &ctx, &category, limit, month.as_deref())
            }
            BudgetAction::List { creds, month } => {
                let db = commands::open_db(&db_path, cli.no_encrypt)?;
                let ctx = commands::authenticate(&db, &creds)?;
                commands::cmd_budget_list(&db, &ctx, month.as_deref())
            }
        },
        Commands::Suggest { creds, month } => {
            let db = commands::open_db(&db_path, cli.no_encrypt)?;
            let ctx = commands::authenticate(&db, &creds)?;
            commands::cmd_suggest(&db, &ctx, month.as_deref())
        }
        Commands::Export {
            creds,
            format,
            output,
            from,
            to,
        } => {
            let db = commands::open_db(&db_path, cli.no_encrypt)?;
            let ctx = commands::authenticate(&db, &creds)?;
            commands::cmd_export(
                &db,
                &ctx,
                format,
                output.as_deref(),
                from.as_deref(),
                to.as_deref(),
            )
        }
    }
}

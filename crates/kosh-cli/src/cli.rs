//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Kosh - Track income, expenses and monthly budgets
#[derive(Parser)]
#[command(name = "kosh")]
#[command(about = "Self-hosted personal finance tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (overrides the config file and KOSH_DB)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (default: ~/.config/kosh/config.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set KOSH_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Who is running a user-scoped command
#[derive(Args, Debug, Clone)]
pub struct Credentials {
    /// Username
    #[arg(short, long)]
    pub user: String,

    /// Password
    #[arg(long, env = "KOSH_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Create a user account (seeded with sample data)
    Register {
        #[command(flatten)]
        creds: Credentials,

        /// Display name
        #[arg(long)]
        name: String,
    },

    /// Check credentials and show the account
    Whoami {
        #[command(flatten)]
        creds: Credentials,
    },

    /// Show totals, budgets and suggestions
    Dashboard {
        #[command(flatten)]
        creds: Credentials,

        /// Budget month (YYYY-MM, default: current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Print the dashboard as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record a transaction
    Add {
        #[command(flatten)]
        creds: Credentials,

        /// Amount (non-negative)
        #[arg(short, long)]
        amount: f64,

        /// Category (Food, Transport, Rent, Entertainment, Salary, Freelance,
        /// Health, Shopping, Other)
        #[arg(short, long)]
        category: String,

        /// Income or Expense
        #[arg(short = 't', long = "type")]
        kind: String,

        /// Date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,

        /// Free-text description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List recent transactions
    List {
        #[command(flatten)]
        creds: Credentials,

        /// Maximum number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },

    /// Delete one of your transactions
    Delete {
        #[command(flatten)]
        creds: Credentials,

        /// Transaction ID
        id: i64,
    },

    /// Manage monthly budgets
    Budget {
        #[command(subcommand)]
        action: BudgetAction,
    },

    /// Show savings and spending suggestions
    Suggest {
        #[command(flatten)]
        creds: Credentials,

        /// Budget month (YYYY-MM, default: current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Export transactions or the PDF report
    Export {
        #[command(flatten)]
        creds: Credentials,

        /// Output format
        #[arg(value_enum)]
        format: ExportKind,

        /// Output file (default: transactions.<ext>, or <user>_report.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only transactions on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Only transactions on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on (default: config file, KOSH_PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (default: config file, KOSH_HOST or 127.0.0.1)
        #[arg(long)]
        host: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Set (or overwrite) the limit for a category
    Set {
        #[command(flatten)]
        creds: Credentials,

        /// Expense category
        #[arg(short, long)]
        category: String,

        /// Monthly limit
        #[arg(short, long)]
        limit: f64,

        /// Budget month (YYYY-MM, default: current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List budgets and how much of each is spent
    List {
        #[command(flatten)]
        creds: Credentials,

        /// Budget month (YYYY-MM, default: current month)
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// What `kosh export` writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    Csv,
    Json,
    Pdf,
}

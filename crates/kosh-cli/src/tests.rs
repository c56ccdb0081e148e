//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use clap::{CommandFactory, Parser};
use kosh_core::db::Database;
use kosh_core::models::BudgetMonth;
use kosh_core::{auth, AuthContext};

use crate::cli::{BudgetAction, Cli, Commands, Credentials, ExportKind};
use crate::commands::{self, money, truncate};

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

/// Register a seeded user and return the context commands run as
fn setup_user(db: &Database) -> AuthContext {
    assert!(auth::register(db, "asha", "secret1", "Asha Rao").unwrap());
    AuthContext {
        username: "asha".to_string(),
        display_name: "Asha Rao".to_string(),
    }
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_add() {
    let cli = Cli::try_parse_from([
        "kosh", "add", "-u", "asha", "--password", "pw", "-a", "250", "-c", "food", "-t",
        "expense", "--date", "2024-03-01",
    ])
    .unwrap();

    match cli.command {
        Commands::Add {
            creds,
            amount,
            category,
            kind,
            date,
            description,
        } => {
            assert_eq!(creds.user, "asha");
            assert_eq!(amount, 250.0);
            assert_eq!(category, "food");
            assert_eq!(kind, "expense");
            assert_eq!(date.as_deref(), Some("2024-03-01"));
            assert_eq!(description, "");
        }
        _ => panic!("expected add"),
    }
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "kosh",
        "budget",
        "list",
        "-u",
        "asha",
        "--password",
        "pw",
        "--db",
        "/tmp/k.db",
        "--no-encrypt",
    ])
    .unwrap();

    assert_eq!(cli.db.as_deref(), Some(std::path::Path::new("/tmp/k.db")));
    assert!(cli.no_encrypt);
    assert!(matches!(
        cli.command,
        Commands::Budget {
            action: BudgetAction::List { month: None, .. }
        }
    ));
}

#[test]
fn test_parse_export_format() {
    let cli = Cli::try_parse_from([
        "kosh", "export", "pdf", "-u", "asha", "--password", "pw",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Export {
            format: ExportKind::Pdf,
            ..
        }
    ));

    assert!(Cli::try_parse_from(["kosh", "export", "xml", "-u", "a", "--password", "p"]).is_err());
}

// ========== Account Command Tests ==========

#[test]
fn test_cmd_register() {
    let db = setup_test_db();
    commands::cmd_register(&db, "ravi", "secret1", "Ravi").unwrap();

    assert!(db.get_user("ravi").unwrap().is_some());
    assert_eq!(db.count_transactions("ravi").unwrap(), 6);
}

#[test]
fn test_cmd_register_duplicate() {
    let db = setup_test_db();
    setup_user(&db);

    let result = commands::cmd_register(&db, "asha", "other-pass", "Someone");
    assert!(result.is_err());
    assert!(auth::login(&db, "asha", "secret1").is_ok());
}

#[test]
fn test_authenticate() {
    let db = setup_test_db();
    setup_user(&db);

    let good = Credentials {
        user: "asha".to_string(),
        password: "secret1".to_string(),
    };
    let ctx = commands::authenticate(&db, &good).unwrap();
    assert_eq!(ctx.display_name, "Asha Rao");

    let bad = Credentials {
        user: "asha".to_string(),
        password: "wrong-pass".to_string(),
    };
    assert!(commands::authenticate(&db, &bad).is_err());
}

#[test]
fn test_cmd_whoami() {
    let db = setup_test_db();
    let ctx = setup_user(&db);
    assert!(commands::cmd_whoami(&db, &ctx).is_ok());
}

// ========== Transaction Command Tests ==========

#[test]
fn test_cmd_add() {
    let db = setup_test_db();
    let ctx = setup_user(&db);

    commands::cmd_add(&db, &ctx, 750.0, "health", "Expense", Some("2024-02-10"), "Dentist")
        .unwrap();

    let recent = db.list_recent_transactions("asha", 50).unwrap();
    let added = recent.iter().find(|tx| tx.description == "Dentist").unwrap();
    assert_eq!(added.amount, 750.0);
    assert_eq!(added.date.to_string(), "2024-02-10");
    assert_eq!(added.category.as_str(), "Health");
}

#[test]
fn test_cmd_add_rejects_bad_input() {
    let db = setup_test_db();
    let ctx = setup_user(&db);

    assert!(commands::cmd_add(&db, &ctx, 10.0, "Crypto", "Expense", None, "").is_err());
    assert!(commands::cmd_add(&db, &ctx, 10.0, "Food", "Transfer", None, "").is_err());
    assert!(commands::cmd_add(&db, &ctx, -10.0, "Food", "Expense", None, "").is_err());
    assert!(commands::cmd_add(&db, &ctx, 10.0, "Food", "Expense", Some("03/01/2024"), "").is_err());
    assert_eq!(db.count_transactions("asha").unwrap(), 6);
}

#[test]
fn test_cmd_list() {
    let db = setup_test_db();
    let ctx = setup_user(&db);
    assert!(commands::cmd_list(&db, &ctx, 3).is_ok());
}

#[test]
fn test_cmd_list_empty() {
    let db = setup_test_db();
    let ctx = AuthContext {
        username: "nobody".to_string(),
        display_name: "Nobody".to_string(),
    };
    assert!(commands::cmd_list(&db, &ctx, 20).is_ok());
}

#[test]
fn test_cmd_delete() {
    let db = setup_test_db();
    let ctx = setup_user(&db);
    let id = db.get_user_transactions("asha").unwrap()[0].id;

    commands::cmd_delete(&db, &ctx, id).unwrap();
    assert_eq!(db.count_transactions("asha").unwrap(), 5);

    // Already gone
    assert!(commands::cmd_delete(&db, &ctx, id).is_err());
}

#[test]
fn test_cmd_delete_other_users_transaction() {
    let db = setup_test_db();
    let ctx = setup_user(&db);
    auth::register(&db, "ravi", "secret2", "Ravi").unwrap();
    let ravis = db.get_user_transactions("ravi").unwrap()[0].id;

    assert!(commands::cmd_delete(&db, &ctx, ravis).is_err());
    assert_eq!(db.count_transactions("ravi").unwrap(), 6);
}

// ========== Budget Command Tests ==========

#[test]
fn test_cmd_budget_set_overwrites() {
    let db = setup_test_db();
    let ctx = setup_user(&db);

    commands::cmd_budget_set(&db, &ctx, "shopping", 1500.0, Some("2030-02")).unwrap();
    commands::cmd_budget_set(&db, &ctx, "Shopping", 2500.0, Some("2030-02")).unwrap();

    let month: BudgetMonth = "2030-02".parse().unwrap();
    let budgets = db.get_budgets("asha", month).unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].limit_amount, 2500.0);
}

#[test]
fn test_cmd_budget_set_rejects_bad_input() {
    let db = setup_test_db();
    let ctx = setup_user(&db);

    assert!(commands::cmd_budget_set(&db, &ctx, "Salary", 100.0, None).is_err());
    assert!(commands::cmd_budget_set(&db, &ctx, "Food", 100.0, Some("2030-13")).is_err());
    assert!(commands::cmd_budget_set(&db, &ctx, "Food", -1.0, None).is_err());
}

#[test]
fn test_cmd_budget_list() {
    let db = setup_test_db();
    let ctx = setup_user(&db);

    assert!(commands::cmd_budget_list(&db, &ctx, None).is_ok());
    // A month with no budgets just prints a hint
    assert!(commands::cmd_budget_list(&db, &ctx, Some("1999-01")).is_ok());
}

// ========== Dashboard Tests ==========

#[test]
fn test_cmd_dashboard() {
    let db = setup_test_db();
    let ctx = setup_user(&db);
    assert!(commands::cmd_dashboard(&db, &ctx, None, false).is_ok());
    assert!(commands::cmd_dashboard(&db, &ctx, None, true).is_ok());
}

#[test]
fn test_cmd_dashboard_empty() {
    let db = setup_test_db();
    let ctx = AuthContext {
        username: "nobody".to_string(),
        display_name: "Nobody".to_string(),
    };
    assert!(commands::cmd_dashboard(&db, &ctx, None, false).is_ok());
}

#[test]
fn test_cmd_suggest() {
    let db = setup_test_db();
    let ctx = setup_user(&db);
    assert!(commands::cmd_suggest(&db, &ctx, None).is_ok());
    assert!(commands::cmd_suggest(&db, &ctx, Some("June")).is_err());
}

// ========== Export Command Tests ==========

#[test]
fn test_cmd_export_csv() {
    use tempfile::tempdir;

    let db = setup_test_db();
    let ctx = setup_user(&db);
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");

    commands::cmd_export(&db, &ctx, ExportKind::Csv, Some(&path), None, None).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("id,username,date,amount,category,type,description")
    );
    assert_eq!(lines.count(), 6);
}

#[test]
fn test_cmd_export_json_with_date_range() {
    use tempfile::tempdir;

    let db = setup_test_db();
    let ctx = setup_user(&db);
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.json");

    commands::cmd_export(
        &db,
        &ctx,
        ExportKind::Json,
        Some(&path),
        Some("1990-01-01"),
        Some("1990-12-31"),
    )
    .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 0);
}

#[test]
fn test_cmd_export_pdf() {
    use tempfile::tempdir;

    let db = setup_test_db();
    let ctx = setup_user(&db);
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.pdf");

    commands::cmd_export(&db, &ctx, ExportKind::Pdf, Some(&path), None, None).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
}

#[test]
fn test_cmd_export_bad_date() {
    let db = setup_test_db();
    let ctx = setup_user(&db);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let result = commands::cmd_export(&db, &ctx, ExportKind::Csv, Some(&path), Some("yesterday"), None);
    assert!(result.is_err());
    assert!(!path.exists());
}

#[test]
fn test_default_export_path() {
    assert_eq!(
        commands::default_export_path(ExportKind::Csv, "asha"),
        std::path::PathBuf::from("transactions.csv")
    );
    assert_eq!(
        commands::default_export_path(ExportKind::Pdf, "asha"),
        std::path::PathBuf::from("asha_report.pdf")
    );
}

// ========== Helper Function Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a longer description", 10), "a longe...");
    assert_eq!(truncate("₹₹₹₹₹₹", 5), "₹₹...");
}

#[test]
fn test_money() {
    assert_eq!(money(43500.0), "₹43,500.00");
}

#[test]
fn test_parse_month() {
    assert_eq!(commands::parse_month(None).unwrap(), BudgetMonth::current());
    assert_eq!(
        commands::parse_month(Some("2024-07")).unwrap(),
        BudgetMonth::new(2024, 7).unwrap()
    );
    assert!(commands::parse_month(Some("July")).is_err());
}

#[test]
fn test_cmd_init() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kosh.db");

    commands::cmd_init(&path, true).unwrap();
    assert!(path.exists());
}

//! Export command (CSV/JSON transactions, PDF report)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kosh_core::db::Database;
use kosh_core::{render_report, AuthContext, ExportFormat, TransactionExportOptions};

use super::parse_date;
use crate::cli::ExportKind;

/// Where an export lands when `--output` is not given
pub fn default_export_path(kind: ExportKind, username: &str) -> PathBuf {
    match kind {
        ExportKind::Csv => PathBuf::from("transactions.csv"),
        ExportKind::Json => PathBuf::from("transactions.json"),
        ExportKind::Pdf => PathBuf::from(format!("{}_report.pdf", username)),
    }
}

pub fn cmd_export(
    db: &Database,
    ctx: &AuthContext,
    kind: ExportKind,
    output: Option<&Path>,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<()> {
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_export_path(kind, &ctx.username));

    let bytes = match kind {
        ExportKind::Csv | ExportKind::Json => {
            let format = if kind == ExportKind::Csv {
                ExportFormat::Csv
            } else {
                ExportFormat::Json
            };
            let opts = TransactionExportOptions {
                from: from.map(parse_date).transpose()?,
                to: to.map(parse_date).transpose()?,
            };
            db.export_transactions(&ctx.username, format, &opts)?
                .into_bytes()
        }
        ExportKind::Pdf => {
            let transactions = db.get_user_transactions(&ctx.username)?;
            render_report(&transactions, &ctx.display_name)
        }
    };

    fs::write(&path, &bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(
        user = %ctx.username,
        format = ?kind,
        path = %path.display(),
        "Export written"
    );

    println!(
        "📤 Exported to {} ({} bytes)",
        path.display(),
        bytes.len()
    );
    Ok(())
}

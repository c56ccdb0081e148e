//! Transaction export to CSV and JSON
//!
//! CSV columns: `id,username,date,amount,category,type,description`.
//! JSON is a pretty-printed array of transaction objects.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{Category, Transaction, TransactionKind};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Json => "application/json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {} (expected csv or json)", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options for transaction export
#[derive(Debug, Clone, Default)]
pub struct TransactionExportOptions {
    /// Start date filter (inclusive)
    pub from: Option<NaiveDate>,
    /// End date filter (inclusive)
    pub to: Option<NaiveDate>,
}

impl TransactionExportOptions {
    fn includes(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// One CSV line
#[derive(Serialize)]
struct CsvRow<'a> {
    id: i64,
    username: &'a str,
    date: String,
    amount: f64,
    category: Category,
    #[serde(rename = "type")]
    kind: TransactionKind,
    description: &'a str,
}

/// Write transactions as CSV with a header row
pub fn transactions_to_csv(transactions: &[Transaction]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if transactions.is_empty() {
        writer.write_record([
            "id",
            "username",
            "date",
            "amount",
            "category",
            "type",
            "description",
        ])?;
    }

    for tx in transactions {
        writer.serialize(CsvRow {
            id: tx.id,
            username: &tx.username,
            date: tx.date.to_string(),
            amount: tx.amount,
            category: tx.category,
            kind: tx.kind,
            description: &tx.description,
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| Error::InvalidData(e.to_string()))
}

/// Write transactions as a pretty-printed JSON array
pub fn transactions_to_json(transactions: &[Transaction]) -> Result<String> {
    Ok(serde_json::to_string_pretty(transactions)?)
}

impl Database {
    /// Export a user's transactions in insertion order
    pub fn export_transactions(
        &self,
        username: &str,
        format: ExportFormat,
        opts: &TransactionExportOptions,
    ) -> Result<String> {
        let transactions: Vec<Transaction> = self
            .get_user_transactions(username)?
            .into_iter()
            .filter(|tx| opts.includes(tx.date))
            .collect();

        let out = match format {
            ExportFormat::Csv => transactions_to_csv(&transactions)?,
            ExportFormat::Json => transactions_to_json(&transactions)?,
        };

        info!(username, %format, count = transactions.len(), "Transactions exported");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction {
                id: 1,
                username: "asha".into(),
                date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                amount: 50000.0,
                category: Category::Salary,
                kind: TransactionKind::Income,
                description: "Monthly Salary".into(),
            },
            Transaction {
                id: 2,
                username: "asha".into(),
                date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                amount: 250.5,
                category: Category::Food,
                kind: TransactionKind::Expense,
                description: "Dinner, with \"friends\"".into(),
            },
        ]
    }

    #[test]
    fn test_csv_layout() {
        let csv = transactions_to_csv(&sample()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "id,username,date,amount,category,type,description");
        assert_eq!(lines[1], "1,asha,2024-06-01,50000.0,Salary,Income,Monthly Salary");
        assert_eq!(
            lines[2],
            "2,asha,2024-06-03,250.5,Food,Expense,\"Dinner, with \"\"friends\"\"\""
        );
    }

    #[test]
    fn test_empty_csv_still_has_header() {
        let csv = transactions_to_csv(&[]).unwrap();
        assert_eq!(csv, "id,username,date,amount,category,type,description\n");
    }

    #[test]
    fn test_csv_parses_back() {
        let csv = transactions_to_csv(&sample()).unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][6], "Dinner, with \"friends\"");
    }

    #[test]
    fn test_json_is_array() {
        let json = transactions_to_json(&sample()).unwrap();
        let parsed: Vec<Transaction> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_date_filter() {
        let opts = TransactionExportOptions {
            from: NaiveDate::from_ymd_opt(2024, 6, 2),
            to: None,
        };
        assert!(!opts.includes(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        assert!(opts.includes(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()));
    }
}

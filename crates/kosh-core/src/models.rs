//! Domain models for Kosh

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A registered user (the password hash never leaves the db layer)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transaction categories
///
/// The set is closed; free-form strings are parsed into one of these at the
/// input boundary and stored by canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Rent,
    Entertainment,
    Salary,
    Freelance,
    Health,
    Shopping,
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Self::Food,
        Self::Transport,
        Self::Rent,
        Self::Entertainment,
        Self::Salary,
        Self::Freelance,
        Self::Health,
        Self::Shopping,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Rent => "Rent",
            Self::Entertainment => "Entertainment",
            Self::Salary => "Salary",
            Self::Freelance => "Freelance",
            Self::Health => "Health",
            Self::Shopping => "Shopping",
            Self::Other => "Other",
        }
    }

    /// Income-only categories can't carry a spending limit
    pub fn is_budgetable(&self) -> bool {
        !matches!(self, Self::Salary | Self::Freelance)
    }

    /// Categories a budget can be set for
    pub fn budgetable() -> impl Iterator<Item = Category> {
        Self::ALL.into_iter().filter(|c| c.is_budgetable())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
                format!("Unknown category: {} (expected one of: {})", s, allowed.join(", "))
            })
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub username: String,
    pub date: NaiveDate,
    /// Always non-negative; direction comes from `kind`
    pub amount: f64,
    pub category: Category,
    pub kind: TransactionKind,
    pub description: String,
}

/// A transaction to be inserted (before it has an id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: Category,
    pub kind: TransactionKind,
    #[serde(default)]
    pub description: String,
}

impl NewTransaction {
    /// Reject negative or non-finite amounts
    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount, "amount")?;
        Ok(())
    }
}

/// A monthly category budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub username: String,
    pub category: Category,
    pub limit_amount: f64,
    pub month: BudgetMonth,
}

/// A calendar month in `YYYY-MM` form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BudgetMonth {
    year: i32,
    month: u32,
}

impl BudgetMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || !(1..=9999).contains(&year) {
            return Err(Error::InvalidData(format!(
                "Invalid month: {:04}-{:02}",
                year, month
            )));
        }
        Ok(Self { year, month })
    }

    /// The month a date falls in
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current month in local time
    pub fn current() -> Self {
        Self::containing(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl std::str::FromStr for BudgetMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidData(format!("Invalid month '{}' (use YYYY-MM)", s));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl std::fmt::Display for BudgetMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for BudgetMonth {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<BudgetMonth> for String {
    fn from(month: BudgetMonth) -> Self {
        month.to_string()
    }
}

/// Check that a money value is finite and non-negative
pub fn validate_amount(value: f64, field: &str) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidData(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )));
    }
    Ok(value)
}

/// Format an amount with thousands separators and two decimals (e.g. `43,500.00`)
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((&fixed, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!(" RENT ".parse::<Category>().unwrap(), Category::Rent);
        assert!("Groceries".parse::<Category>().is_err());
    }

    #[test]
    fn test_income_categories_not_budgetable() {
        assert!(!Category::Salary.is_budgetable());
        assert!(!Category::Freelance.is_budgetable());
        assert!(Category::Food.is_budgetable());
        assert_eq!(Category::budgetable().count(), 7);
    }

    #[test]
    fn test_transaction_kind_parse() {
        assert_eq!(
            "income".parse::<TransactionKind>().unwrap(),
            TransactionKind::Income
        );
        assert_eq!(
            "Expense".parse::<TransactionKind>().unwrap(),
            TransactionKind::Expense
        );
        assert!("transfer".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_budget_month_parse() {
        let month: BudgetMonth = "2024-06".parse().unwrap();
        assert_eq!(month.year(), 2024);
        assert_eq!(month.month(), 6);
        assert_eq!(month.to_string(), "2024-06");

        assert!("2024-13".parse::<BudgetMonth>().is_err());
        assert!("2024-6".parse::<BudgetMonth>().is_err());
        assert!("June".parse::<BudgetMonth>().is_err());
    }

    #[test]
    fn test_budget_month_serde() {
        let month = BudgetMonth::new(2025, 1).unwrap();
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "\"2025-01\"");
        let parsed: BudgetMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, month);
        assert!(serde_json::from_str::<BudgetMonth>("\"2025-00\"").is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(0.0, "amount").is_ok());
        assert!(validate_amount(12.5, "amount").is_ok());
        assert!(validate_amount(-1.0, "amount").is_err());
        assert!(validate_amount(f64::NAN, "amount").is_err());
        assert!(validate_amount(f64::INFINITY, "amount").is_err());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(500.0), "500.00");
        assert_eq!(format_amount(1000.0), "1,000.00");
        assert_eq!(format_amount(43500.0), "43,500.00");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(-2500.5), "-2,500.50");
    }
}

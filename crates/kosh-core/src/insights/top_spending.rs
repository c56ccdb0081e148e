//! Top Spending Rule
//!
//! Points at the category with the largest expense total and suggests
//! trimming it.

use crate::models::format_amount;

use super::engine::{AnalysisContext, Rule};
use super::totals::top_category;
use super::types::{Advisory, AdvisoryKind, Severity};

pub struct TopSpendingRule;

impl Rule for TopSpendingRule {
    fn name(&self) -> &'static str {
        "Top Spending"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Advisory> {
        let Some((category, spent)) = top_category(ctx.transactions) else {
            return vec![];
        };

        let fraction = ctx.policy.suggested_reduction_fraction;
        let savings = spent * fraction;

        vec![Advisory {
            kind: AdvisoryKind::TopCategory,
            severity: Severity::Info,
            category: Some(category),
            amount: savings,
            message: format!(
                "Insight: Your highest spending is on {} (₹{}). Try to reduce this by {:.0}% to save ₹{}.",
                category,
                format_amount(spent),
                fraction * 100.0,
                format_amount(savings)
            ),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::SuggestionPolicy;
    use crate::models::{Category, Transaction, TransactionKind};
    use chrono::NaiveDate;

    fn tx(category: Category, kind: TransactionKind, amount: f64) -> Transaction {
        Transaction {
            id: 0,
            username: "asha".into(),
            date: NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
            amount,
            category,
            kind,
            description: String::new(),
        }
    }

    #[test]
    fn test_no_expenses_no_insight() {
        let txs = vec![tx(Category::Salary, TransactionKind::Income, 1000.0)];
        assert!(TopSpendingRule
            .evaluate(&AnalysisContext::new(&txs, &[]))
            .is_empty());
    }

    #[test]
    fn test_custom_reduction() {
        let txs = vec![
            tx(Category::Shopping, TransactionKind::Expense, 12000.0),
            tx(Category::Food, TransactionKind::Expense, 3000.0),
        ];
        let policy = SuggestionPolicy {
            suggested_reduction_fraction: 0.25,
            ..SuggestionPolicy::default()
        };
        let advisories =
            TopSpendingRule.evaluate(&AnalysisContext::new(&txs, &[]).with_policy(policy));

        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].amount, 3000.0);
        assert_eq!(
            advisories[0].message,
            "Insight: Your highest spending is on Shopping (₹12,000.00). Try to reduce this by 25% to save ₹3,000.00."
        );
    }
}

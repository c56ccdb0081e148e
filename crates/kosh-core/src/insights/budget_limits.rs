//! Budget Limit Rule
//!
//! Checks each budget, in budget order, against total expenses in its
//! category. Categories without a budget are ignored and budgets with a
//! zero limit are skipped.

use crate::models::format_amount;

use super::engine::{AnalysisContext, Rule};
use super::totals::expense_totals;
use super::types::{Advisory, AdvisoryKind, Severity};

pub struct BudgetLimitRule;

impl Rule for BudgetLimitRule {
    fn name(&self) -> &'static str {
        "Budget Limits"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Advisory> {
        let spent_by_category = expense_totals(ctx.transactions);
        let mut advisories = Vec::new();

        for budget in ctx.budgets {
            let limit = budget.limit_amount;
            if limit <= 0.0 {
                continue;
            }

            let spent = spent_by_category
                .iter()
                .find(|(category, _)| *category == budget.category)
                .map(|(_, total)| *total)
                .unwrap_or(0.0);

            if spent > limit {
                let overage = spent - limit;
                advisories.push(Advisory {
                    kind: AdvisoryKind::BudgetBreach,
                    severity: Severity::Alert,
                    category: Some(budget.category),
                    amount: overage,
                    message: format!(
                        "Budget Breach: You exceeded your {} budget by ₹{}.",
                        budget.category,
                        format_amount(overage)
                    ),
                });
            } else if spent > ctx.policy.near_limit_fraction * limit {
                advisories.push(Advisory {
                    kind: AdvisoryKind::NearLimit,
                    severity: Severity::Warning,
                    category: Some(budget.category),
                    amount: spent,
                    message: format!(
                        "Warning: You are near the limit for {}.",
                        budget.category
                    ),
                });
            }
        }

        advisories
    }
}

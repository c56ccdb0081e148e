//! Savings Rate Rule
//!
//! Always emits exactly one advisory: low savings below the policy threshold,
//! healthy otherwise.

use super::engine::{AnalysisContext, Rule};
use super::totals::Totals;
use super::types::{Advisory, AdvisoryKind, Severity};

pub struct SavingsRateRule;

impl Rule for SavingsRateRule {
    fn name(&self) -> &'static str {
        "Savings Rate"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Advisory> {
        let rate = Totals::from_transactions(ctx.transactions).savings_rate();
        let threshold = ctx.policy.low_savings_rate_pct;

        let advisory = if rate < threshold {
            Advisory {
                kind: AdvisoryKind::LowSavings,
                severity: Severity::Warning,
                category: None,
                amount: rate,
                message: format!(
                    "Low Savings Rate: You are saving only {:.1}%. Aim for at least {}%.",
                    rate, threshold
                ),
            }
        } else {
            Advisory {
                kind: AdvisoryKind::HealthySavings,
                severity: Severity::Info,
                category: None,
                amount: rate,
                message: format!("Good Job: Your savings rate is healthy at {:.1}%.", rate),
            }
        };

        vec![advisory]
    }
}

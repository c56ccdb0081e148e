//! Suggestion engine - runs the registered rules in order

use crate::models::{Budget, Transaction};

use super::types::{Advisory, SuggestionPolicy};
use super::{BudgetLimitRule, SavingsRateRule, TopSpendingRule};

/// Data the rules look at
pub struct AnalysisContext<'a> {
    /// Every transaction the user has
    pub transactions: &'a [Transaction],
    /// The budgets to check, in stored order
    pub budgets: &'a [Budget],
    pub policy: SuggestionPolicy,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(transactions: &'a [Transaction], budgets: &'a [Budget]) -> Self {
        Self {
            transactions,
            budgets,
            policy: SuggestionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: SuggestionPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// A single suggestion rule
///
/// Rules are pure: the same context always yields the same advisories.
pub trait Rule: Send + Sync {
    /// Human-readable name
    fn name(&self) -> &'static str;

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Advisory>;
}

/// Runs rules and concatenates their advisories in registration order
pub struct SuggestionEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionEngine {
    /// Engine with the built-in rules: savings rate, budget limits, top spending
    pub fn new() -> Self {
        let mut engine = Self { rules: vec![] };

        engine.register(Box::new(SavingsRateRule));
        engine.register(Box::new(BudgetLimitRule));
        engine.register(Box::new(TopSpendingRule));

        engine
    }

    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Advisory> {
        let mut advisories = Vec::new();
        for rule in &self.rules {
            let found = rule.evaluate(ctx);
            tracing::debug!(rule = rule.name(), count = found.len(), "Rule evaluated");
            advisories.extend(found);
        }
        advisories
    }

    /// Names of the registered rules, in order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

/// Suggestions for a user's transactions and budgets with the default policy
pub fn generate_suggestions(transactions: &[Transaction], budgets: &[Budget]) -> Vec<Advisory> {
    SuggestionEngine::new().analyze(&AnalysisContext::new(transactions, budgets))
}

/// Message strings only, in the same order
pub fn messages(advisories: &[Advisory]) -> Vec<String> {
    advisories.iter().map(|a| a.message.clone()).collect()
}

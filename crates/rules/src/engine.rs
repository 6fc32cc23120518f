//! Rule application orchestrator.

use std::sync::Arc;

use firmo_core::attr::AttributeSource;
use firmo_llm::BooleanOracle;
use tracing::debug;

use crate::composer::compose;
use crate::error::EngineError;
use crate::evaluator::evaluate_condition;
use crate::model::{Rule, RuleOutcome};

/// Applies rules to attribute-bearing entities.
///
/// Holds no mutable state: clones share the oracle, and independent
/// applications may run concurrently without locking. Without an oracle,
/// `LLM` conditions evaluate to no-match.
#[derive(Clone)]
pub struct RuleEngine {
    oracle: Option<Arc<dyn BooleanOracle>>,
}

impl RuleEngine {
    pub fn new(oracle: Option<Arc<dyn BooleanOracle>>) -> Self {
        Self { oracle }
    }

    /// Apply `rule` to `entity`, yielding the match flag and the emitted
    /// feature value.
    ///
    /// Every condition is resolved and evaluated in declaration order
    /// before composition. Resolution and coercion errors abort the
    /// whole application and propagate to the caller.
    pub async fn apply<E: AttributeSource>(
        &self,
        rule: &Rule,
        entity: &E,
    ) -> Result<RuleOutcome, EngineError> {
        let mut results = Vec::with_capacity(rule.conditions.len());
        for condition in &rule.conditions {
            let value = entity.attribute(&condition.target_object)?;
            let result = evaluate_condition(condition, &value, self.oracle.as_deref()).await?;
            results.push(result);
        }

        let matched = compose(rule.boolean_operator.as_deref(), &results)?;
        let value = if matched {
            rule.match_value
        } else {
            rule.default_value
        };

        debug!(
            "rule '{}' applied: matched={} value={}",
            rule.feature_name, matched, value
        );

        Ok(RuleOutcome { matched, value })
    }
}

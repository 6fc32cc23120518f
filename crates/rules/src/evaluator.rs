//! Per-condition evaluation.
//!
//! Comparisons are intentionally asymmetric: equality and containment
//! operate on the string form of the resolved value, while ordering
//! operators coerce both sides to f64. Rule authors lean on both:
//! categorical features compare as text, numeric features as numbers.

use firmo_core::attr::AttrValue;
use firmo_llm::BooleanOracle;
use tracing::warn;

use crate::error::EngineError;
use crate::model::{Condition, Operator};

/// Evaluate one condition against an already-resolved attribute value.
///
/// Ordering operators fail loudly when either side is not numeric; that
/// signals a rule/data mismatch, not a non-match. Oracle failures count
/// as a non-match, never as an error. Unknown operators are a non-match
/// by contract.
pub async fn evaluate_condition(
    condition: &Condition,
    value: &AttrValue,
    oracle: Option<&dyn BooleanOracle>,
) -> Result<bool, EngineError> {
    match condition.operator {
        Operator::Equals => Ok(value.to_string() == condition.value),
        Operator::NotEquals => Ok(value.to_string() != condition.value),
        Operator::GreaterThan => {
            let (lhs, rhs) = numeric_sides(condition, value)?;
            Ok(lhs > rhs)
        }
        Operator::LessThan => {
            let (lhs, rhs) = numeric_sides(condition, value)?;
            Ok(lhs < rhs)
        }
        Operator::Contains => Ok(value.to_string().contains(&condition.value)),
        Operator::NotContains => Ok(!value.to_string().contains(&condition.value)),
        Operator::Llm => {
            let context = format!("{}: {}", condition.target_object, value);
            ask_oracle(oracle, &condition.value, &context).await
        }
        Operator::Unknown => Ok(false),
    }
}

fn numeric_sides(condition: &Condition, value: &AttrValue) -> Result<(f64, f64), EngineError> {
    let lhs = value.as_f64().ok_or_else(|| EngineError::NumericCoercion {
        operator: condition.operator.to_string(),
        value: value.to_string(),
    })?;
    let rhs = condition
        .value
        .trim()
        .parse()
        .map_err(|_| EngineError::NumericCoercion {
            operator: condition.operator.to_string(),
            value: condition.value.clone(),
        })?;
    Ok((lhs, rhs))
}

async fn ask_oracle(
    oracle: Option<&dyn BooleanOracle>,
    question: &str,
    context: &str,
) -> Result<bool, EngineError> {
    let Some(oracle) = oracle else {
        warn!("LLM condition evaluated without a configured oracle; treating as no match");
        return Ok(false);
    };

    match oracle.ask(question, context).await {
        Ok(answer) => Ok(answer),
        Err(err) => {
            warn!("oracle call failed, treating as no match: {}", err);
            Ok(false)
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────
